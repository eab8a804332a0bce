use super::enums::{B2bBookingStatus, TaxiAssignStatus};
use sea_orm::entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, ToSchema)]
#[schema(as = B2bBooking)]
#[sea_orm(table_name = "b2b_booking")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub created_at: DateTimeWithTimeZone,

    pub company_id: i32,

    /// the B2B user that placed the booking
    pub booked_by: i32,

    pub pickup_location: String,
    pub drop_location: String,
    pub scheduled_at: Option<DateTimeWithTimeZone>,

    pub distance_km: Option<f64>,
    pub estimated_fare: Option<f64>,

    /// billed against the company ledger, fixed at creation
    pub total_amount: f64,

    pub car_model: Option<String>,

    pub status: B2bBookingStatus,
    pub taxi_assign_status: TaxiAssignStatus,

    pub actual_km: Option<f64>,
    pub toll_charges: Option<f64>,

    #[sea_orm(column_type = "Text", nullable)]
    pub cancel_reason: Option<String>,

    /// offline settlement details, set by the admin mark-paid flow
    pub payment_mode: Option<String>,
    pub payment_remarks: Option<String>,
    pub paid_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::b2b_company::Entity",
        from = "Column::CompanyId",
        to = "super::b2b_company::Column::Id",
        on_update = "Cascade",
        on_delete = "NoAction"
    )]
    B2bCompany,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::BookedBy",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "NoAction"
    )]
    User,
    #[sea_orm(has_many = "super::taxi_assignment::Entity")]
    TaxiAssignment,
}

impl Related<super::b2b_company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::B2bCompany.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::taxi_assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TaxiAssignment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
