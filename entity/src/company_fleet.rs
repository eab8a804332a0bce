use sea_orm::entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

/// Assignment of a fleet vehicle to a B2B company with a negotiated
/// price per km, unique on (company_id, fleet_vehicle_id) so retried
/// assignments upsert instead of duplicating
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, ToSchema)]
#[schema(as = CompanyFleetAssignment)]
#[sea_orm(table_name = "company_fleet")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub created_at: DateTimeWithTimeZone,

    pub company_id: i32,
    pub fleet_vehicle_id: i32,

    /// overrides the vehicle base_price_per_km for this company
    pub custom_price_per_km: f64,

    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::b2b_company::Entity",
        from = "Column::CompanyId",
        to = "super::b2b_company::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    B2bCompany,
    #[sea_orm(
        belongs_to = "super::fleet_vehicle::Entity",
        from = "Column::FleetVehicleId",
        to = "super::fleet_vehicle::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    FleetVehicle,
}

impl Related<super::b2b_company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::B2bCompany.def()
    }
}

impl Related<super::fleet_vehicle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FleetVehicle.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
