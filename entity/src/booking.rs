use super::enums::{BookingStatus, TaxiAssignStatus};
use sea_orm::entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, ToSchema)]
#[schema(as = Booking)]
#[sea_orm(table_name = "booking")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub created_at: DateTimeWithTimeZone,

    pub customer_id: i32,

    pub pickup_location: String,
    pub drop_location: String,
    pub scheduled_at: Option<DateTimeWithTimeZone>,

    pub status: BookingStatus,
    pub taxi_assign_status: TaxiAssignStatus,

    pub distance_km: Option<f64>,
    pub estimated_fare: Option<f64>,

    /// final amount, recomputed by the pricing helper on trip completion
    pub total_amount: Option<f64>,

    pub actual_km: Option<f64>,
    pub toll_charges: Option<f64>,

    #[sea_orm(column_type = "Text", nullable)]
    pub cancel_reason: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CustomerId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "NoAction"
    )]
    User,
    #[sea_orm(has_many = "super::booking_note::Entity")]
    BookingNote,
    #[sea_orm(has_many = "super::taxi_assignment::Entity")]
    TaxiAssignment,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::booking_note::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BookingNote.def()
    }
}

impl Related<super::taxi_assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TaxiAssignment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
