use entity::{
    b2b_booking, b2b_company, booking,
    enums::{B2bBookingStatus, BookingStatus},
    taxi_assignment,
};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.message = Some(Cow::from("must not be blank"));
        return Err(error);
    }

    Ok(())
}

/// Driver and cab details for a taxi assignment
#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignTaxi {
    #[validate(custom = "not_blank")]
    pub driver_name: String,

    #[validate(custom = "not_blank")]
    pub driver_number: String,

    #[validate(custom = "not_blank")]
    pub cab_number: String,

    #[validate(custom = "not_blank")]
    pub cab_name: String,
}

#[derive(Deserialize, Validate, ToSchema)]
pub struct UpdateStatus {
    pub status: BookingStatus,
}

#[derive(Deserialize, Validate, ToSchema)]
pub struct UpdateB2bStatus {
    pub status: B2bBookingStatus,
}

/// Trip completion payload, the final fare is recomputed server side
#[derive(Deserialize, Validate, ToSchema)]
pub struct CompleteTrip {
    #[validate(range(min = 0.0, message = "actual km must not be negative"))]
    pub actual_km: f64,

    #[validate(range(min = 0.0, message = "toll charges must not be negative"))]
    pub toll_charges: Option<f64>,

    /// falls back to the rate implied by the booking estimate when absent
    #[validate(range(min = 0.01, message = "rate per km must be greater than zero"))]
    pub rate_per_km: Option<f64>,
}

#[derive(Deserialize, Validate, ToSchema)]
pub struct CancelBooking {
    #[validate(custom = "not_blank")]
    pub reason: String,
}

#[derive(Deserialize, Validate, ToSchema)]
pub struct AddNote {
    #[validate(custom = "not_blank")]
    pub note: String,
}

/// Offline settlement payload for a B2B bill
#[derive(Deserialize, Validate, ToSchema)]
pub struct MarkPaid {
    #[validate(custom = "not_blank")]
    pub mode: String,

    pub remarks: Option<String>,
}

/// Slim customer payload shown on the dispatch panel ticket view
#[derive(Serialize, ToSchema)]
pub struct CustomerInfo {
    pub id: i32,
    pub name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
}

impl From<entity::user::Model> for CustomerInfo {
    fn from(user: entity::user::Model) -> CustomerInfo {
        CustomerInfo {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
        }
    }
}

/// Booking joined with its taxi assignment, if dispatched
#[derive(Serialize, ToSchema)]
pub struct BookingRow {
    #[serde(flatten)]
    pub booking: booking::Model,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignment: Option<taxi_assignment::Model>,
}

/// Full dispatch ticket: booking, assignment and the customer that booked it
#[derive(Serialize, ToSchema)]
pub struct BookingDetail {
    #[serde(flatten)]
    pub booking: booking::Model,
    pub assignment: Option<taxi_assignment::Model>,
    pub customer: Option<CustomerInfo>,
}

/// B2B booking joined for the admin dispatch listing
#[derive(Serialize, ToSchema)]
pub struct B2bDispatchRow {
    #[serde(flatten)]
    pub booking: b2b_booking::Model,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignment: Option<taxi_assignment::Model>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<b2b_company::Model>,
}
