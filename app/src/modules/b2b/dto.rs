use crate::modules::common::validators::REGEX_PHONE_NUMBER;
use entity::{
    b2b_booking, b2b_company, b2b_request, b2b_user, company_fleet, enums::RequestStatus,
    fleet_vehicle, taxi_assignment,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Contact form payload for a company onboarding request
#[derive(Deserialize, Validate, ToSchema)]
pub struct SubmitRequest {
    #[validate(length(min = 2, max = 128, message = "name must have 2 to 128 characters"))]
    pub name: String,

    #[validate(length(min = 2, max = 128, message = "company must have 2 to 128 characters"))]
    pub company: String,

    #[validate(email(message = "must be a valid email address"))]
    pub email: String,

    #[validate(regex(path = "REGEX_PHONE_NUMBER", message = "must be a valid phone number"))]
    pub phone: String,

    pub message: Option<String>,
}

/// Admin review payload for approving or rejecting a request
#[derive(Deserialize, Validate, ToSchema)]
pub struct ReviewRequest {
    pub admin_notes: Option<String>,
}

#[derive(Deserialize, Validate, IntoParams)]
pub struct ListRequestsQuery {
    /// filter by review status
    pub status: Option<RequestStatus>,
}

#[derive(Deserialize, Validate, ToSchema)]
pub struct ManageCompanyFleet {
    pub fleet_vehicle_id: i32,

    #[validate(range(min = 0.01, message = "price per km must be greater than zero"))]
    pub custom_price_per_km: f64,

    pub is_active: Option<bool>,
}

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCreditBooking {
    #[validate(length(min = 1, max = 255, message = "pickup location is required"))]
    pub pickup_location: String,

    #[validate(length(min = 1, max = 255, message = "drop location is required"))]
    pub drop_location: String,

    pub scheduled_at: Option<chrono::DateTime<chrono::FixedOffset>>,

    #[validate(range(min = 0.0, message = "distance must not be negative"))]
    pub distance_km: Option<f64>,

    #[validate(range(min = 0.0, message = "estimated fare must not be negative"))]
    pub estimated_fare: Option<f64>,

    #[validate(range(min = 0.01, message = "total amount must be greater than zero"))]
    pub total_amount: f64,

    pub car_model: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct RequestWithCompany {
    #[serde(flatten)]
    pub request: b2b_request::Model,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<b2b_company::Model>,
}

/// Slim user payload returned by a request approval, the account password
/// is the system assigned default until the first login flow replaces it
#[derive(Serialize, ToSchema)]
pub struct ApprovedUser {
    pub id: i32,
    pub email: String,
    pub name: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct ApprovalOutcome {
    pub company: b2b_company::Model,
    pub user: ApprovedUser,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyMember {
    pub id: i32,
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub is_primary: bool,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDetails {
    #[serde(flatten)]
    pub company: b2b_company::Model,
    pub members: Vec<CompanyMember>,
}

/// Credit booking joined with its taxi assignment, if dispatched
#[derive(Serialize, ToSchema)]
pub struct CreditBookingRow {
    #[serde(flatten)]
    pub booking: b2b_booking::Model,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignment: Option<taxi_assignment::Model>,
}

/// Fleet assignment joined with its catalog vehicle
#[derive(Serialize, ToSchema)]
pub struct FleetAssignment {
    #[serde(flatten)]
    pub assignment: company_fleet::Model,
    pub vehicle: Option<fleet_vehicle::Model>,
}

impl CompanyMember {
    pub fn from_link_and_user(link: &b2b_user::Model, user: entity::user::Model) -> CompanyMember {
        CompanyMember {
            id: user.id,
            email: user.email,
            name: user.name,
            phone: user.phone,
            is_primary: link.is_primary,
        }
    }
}
