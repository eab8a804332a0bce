use entity::{b2b_booking, b2b_payment};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Deserialize, Validate, ToSchema)]
pub struct RecordPayment {
    pub company_id: i32,

    #[validate(range(min = 0.01, message = "amount must be greater than zero"))]
    pub amount: f64,

    #[validate(length(min = 1, max = 32, message = "payment mode must have 1 to 32 characters"))]
    pub payment_mode: String,

    #[validate(length(max = 64, message = "reference must have at most 64 characters"))]
    pub reference_no: Option<String>,

    pub notes: Option<String>,
}

/// Totals of the company ledger against its booked amounts
#[derive(Serialize, Debug, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BillingSummary {
    pub total_billed: f64,
    pub total_paid: f64,
    pub outstanding: f64,
    pub total_bookings: usize,
}

/// Per month totals, bookings are bucketed by creation date and
/// payments by the date the money arrived
#[derive(Serialize, Debug, Default, PartialEq, Clone, ToSchema)]
pub struct MonthlyBucket {
    pub count: usize,
    pub billed: f64,
    pub paid: f64,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyBillingView {
    pub bookings: Vec<b2b_booking::Model>,
    pub payments: Vec<b2b_payment::Model>,
    pub billing_summary: BillingSummary,

    /// keyed by `YYYY-MM`
    pub monthly_breakdown: BTreeMap<String, MonthlyBucket>,
}
