use super::dto::{CreateFleetVehicle, UpdateFleetVehicle};
use crate::database::error::DbError;
use entity::fleet_vehicle;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

pub async fn list_active(
    conn: &DatabaseConnection,
) -> Result<Vec<fleet_vehicle::Model>, DbError> {
    let vehicles = fleet_vehicle::Entity::find()
        .filter(fleet_vehicle::Column::IsActive.eq(true))
        .order_by_asc(fleet_vehicle::Column::Name)
        .all(conn)
        .await?;

    Ok(vehicles)
}

pub async fn list_all(conn: &DatabaseConnection) -> Result<Vec<fleet_vehicle::Model>, DbError> {
    let vehicles = fleet_vehicle::Entity::find()
        .order_by_asc(fleet_vehicle::Column::Id)
        .all(conn)
        .await?;

    Ok(vehicles)
}

pub async fn find_by_id(
    conn: &DatabaseConnection,
    vehicle_id: i32,
) -> Result<fleet_vehicle::Model, DbError> {
    fleet_vehicle::Entity::find_by_id(vehicle_id)
        .one(conn)
        .await?
        .ok_or(DbError(DbErr::RecordNotFound(String::from(
            "fleet vehicle not found",
        ))))
}

pub async fn create(
    conn: &DatabaseConnection,
    dto: &CreateFleetVehicle,
) -> Result<fleet_vehicle::Model, DbError> {
    let vehicle = fleet_vehicle::ActiveModel {
        name: Set(dto.name.clone()),
        category: Set(dto.category.clone()),
        seats: Set(dto.seats),
        base_price_per_km: Set(dto.base_price_per_km),
        image: Set(dto.image.clone()),
        is_active: Set(true),
        ..Default::default()
    };

    Ok(vehicle.insert(conn).await?)
}

pub async fn update(
    conn: &DatabaseConnection,
    current: fleet_vehicle::Model,
    dto: &UpdateFleetVehicle,
) -> Result<fleet_vehicle::Model, DbError> {
    let mut vehicle: fleet_vehicle::ActiveModel = current.into();

    if let Some(name) = &dto.name {
        vehicle.name = Set(name.clone());
    }
    if let Some(category) = &dto.category {
        vehicle.category = Set(Some(category.clone()));
    }
    if let Some(seats) = dto.seats {
        vehicle.seats = Set(seats);
    }
    if let Some(price) = dto.base_price_per_km {
        vehicle.base_price_per_km = Set(price);
    }
    if let Some(image) = &dto.image {
        vehicle.image = Set(Some(image.clone()));
    }
    if let Some(is_active) = dto.is_active {
        vehicle.is_active = Set(is_active);
    }

    Ok(vehicle.update(conn).await?)
}

/// catalog rows are referenced by company assignments, so removal
/// is a soft delete that only clears the active flag
pub async fn soft_delete(
    conn: &DatabaseConnection,
    current: fleet_vehicle::Model,
) -> Result<fleet_vehicle::Model, DbError> {
    let mut vehicle: fleet_vehicle::ActiveModel = current.into();
    vehicle.is_active = Set(false);

    Ok(vehicle.update(conn).await?)
}
