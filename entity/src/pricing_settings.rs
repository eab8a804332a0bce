use sea_orm::entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

/// Global pricing settings, a single row created lazily with defaults
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, ToSchema)]
#[schema(as = PricingSettings)]
#[sea_orm(table_name = "pricing_settings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// minimum distance in km billed for trips the floor applies to
    pub min_km_threshold: f64,

    pub min_km_airport_apply: bool,
    pub min_km_oneway_apply: bool,
    pub min_km_roundtrip_apply: bool,

    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
