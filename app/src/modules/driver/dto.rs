use crate::modules::common::validators::REGEX_PHONE_NUMBER;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Deserialize, Validate, ToSchema)]
pub struct CreateDriver {
    #[validate(length(min = 1, max = 128, message = "name must have 1 to 128 characters"))]
    pub name: String,

    #[validate(regex(path = "REGEX_PHONE_NUMBER", message = "must be a valid phone number"))]
    pub phone: String,

    #[validate(length(min = 1, max = 64, message = "license must have 1 to 64 characters"))]
    pub license_no: Option<String>,

    pub is_active: Option<bool>,
}

/// Partial update, absent fields keep their current value
#[derive(Deserialize, Validate, ToSchema)]
pub struct UpdateDriver {
    #[validate(length(min = 1, max = 128, message = "name must have 1 to 128 characters"))]
    pub name: Option<String>,

    #[validate(regex(path = "REGEX_PHONE_NUMBER", message = "must be a valid phone number"))]
    pub phone: Option<String>,

    #[validate(length(min = 1, max = 64, message = "license must have 1 to 64 characters"))]
    pub license_no: Option<String>,

    pub is_active: Option<bool>,
}

#[derive(Deserialize, Validate, IntoParams)]
pub struct ListDriversQuery {
    /// when true only active drivers are returned
    pub active_only: Option<bool>,
}
