use sea_orm::entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

/// Driver registry entry, deactivated (soft deleted) rather than removed
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, ToSchema)]
#[schema(as = Driver)]
#[sea_orm(table_name = "driver")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub created_at: DateTimeWithTimeZone,

    pub name: String,

    #[sea_orm(unique)]
    pub phone: String,

    pub license_no: Option<String>,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
