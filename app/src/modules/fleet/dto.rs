use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Deserialize, Validate, ToSchema)]
pub struct CreateFleetVehicle {
    #[validate(length(min = 1, max = 128, message = "name must have 1 to 128 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 64, message = "category must have 1 to 64 characters"))]
    pub category: Option<String>,

    #[validate(range(min = 1, max = 60, message = "seats must be between 1 and 60"))]
    pub seats: i16,

    #[validate(range(min = 0.0, message = "price per km must not be negative"))]
    pub base_price_per_km: f64,

    pub image: Option<String>,
}

/// Partial update, absent fields keep their current value
#[derive(Deserialize, Validate, ToSchema)]
pub struct UpdateFleetVehicle {
    #[validate(length(min = 1, max = 128, message = "name must have 1 to 128 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 64, message = "category must have 1 to 64 characters"))]
    pub category: Option<String>,

    #[validate(range(min = 1, max = 60, message = "seats must be between 1 and 60"))]
    pub seats: Option<i16>,

    #[validate(range(min = 0.0, message = "price per km must not be negative"))]
    pub base_price_per_km: Option<f64>,

    pub image: Option<String>,
    pub is_active: Option<bool>,
}
