use sea_orm::entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, ToSchema)]
#[schema(as = FleetVehicle)]
#[sea_orm(table_name = "fleet_vehicle")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub created_at: DateTimeWithTimeZone,

    pub name: String,
    pub category: Option<String>,
    pub seats: i16,

    /// default fare rate, overridden per company by company_fleet assignments
    pub base_price_per_km: f64,

    pub image: Option<String>,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::company_fleet::Entity")]
    CompanyFleet,
}

impl Related<super::company_fleet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CompanyFleet.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
