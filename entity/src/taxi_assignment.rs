use sea_orm::entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

/// Driver and cab assigned to a booking, at most one row per booking,
/// re-assignments overwrite the previous values (last write wins)
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, ToSchema)]
#[schema(as = TaxiAssignment)]
#[sea_orm(table_name = "taxi_assignment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: Option<DateTimeWithTimeZone>,

    /// set for consumer bookings, mutually exclusive with b2b_booking_id
    #[sea_orm(unique, nullable)]
    pub booking_id: Option<i32>,

    /// set for B2B bookings, mutually exclusive with booking_id
    #[sea_orm(unique, nullable)]
    pub b2b_booking_id: Option<i32>,

    pub driver_name: String,
    pub driver_number: String,
    pub cab_number: String,
    pub cab_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::booking::Entity",
        from = "Column::BookingId",
        to = "super::booking::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Booking,
    #[sea_orm(
        belongs_to = "super::b2b_booking::Entity",
        from = "Column::B2bBookingId",
        to = "super::b2b_booking::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    B2bBooking,
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Booking.def()
    }
}

impl Related<super::b2b_booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::B2bBooking.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
