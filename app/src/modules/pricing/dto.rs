use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Partial update of the global pricing settings, absent fields keep
/// their current value
#[derive(Deserialize, Validate, ToSchema)]
pub struct UpdatePricingSettings {
    #[validate(range(min = 0.0, message = "threshold must not be negative"))]
    pub min_km_threshold: Option<f64>,

    pub min_km_airport_apply: Option<bool>,
    pub min_km_oneway_apply: Option<bool>,
    pub min_km_roundtrip_apply: Option<bool>,
}
