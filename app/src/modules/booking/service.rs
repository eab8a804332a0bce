use super::dto::AssignTaxi;
use chrono::Utc;
use entity::{b2b_booking, booking, enums::TaxiAssignStatus, taxi_assignment};
use sea_orm::{
    sea_query::OnConflict, ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Set,
};

/// Rate per km implied by the booking estimate, used when the completion
/// payload carries no explicit rate
pub fn implied_rate(estimated_fare: Option<f64>, distance_km: Option<f64>) -> Option<f64> {
    match (estimated_fare, distance_km) {
        (Some(fare), Some(distance)) if distance > 0.0 => Some(fare / distance),
        _ => None,
    }
}

async fn upsert_assignment(
    db: &DatabaseConnection,
    assignment: taxi_assignment::ActiveModel,
    conflict_column: taxi_assignment::Column,
) -> Result<taxi_assignment::Model, DbErr> {
    taxi_assignment::Entity::insert(assignment)
        .on_conflict(
            OnConflict::column(conflict_column)
                .update_columns([
                    taxi_assignment::Column::DriverName,
                    taxi_assignment::Column::DriverNumber,
                    taxi_assignment::Column::CabNumber,
                    taxi_assignment::Column::CabName,
                    taxi_assignment::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_with_returning(db)
        .await
}

/// Assigns a driver and cab to a consumer booking, last write wins
pub async fn assign_taxi_to_booking(
    db: &DatabaseConnection,
    booking: booking::Model,
    payload: AssignTaxi,
) -> Result<taxi_assignment::Model, DbErr> {
    let assignment = upsert_assignment(
        db,
        taxi_assignment::ActiveModel {
            booking_id: Set(Some(booking.id)),
            driver_name: Set(payload.driver_name),
            driver_number: Set(payload.driver_number),
            cab_number: Set(payload.cab_number),
            cab_name: Set(payload.cab_name),
            updated_at: Set(Some(Utc::now().into())),
            ..Default::default()
        },
        taxi_assignment::Column::BookingId,
    )
    .await?;

    if booking.taxi_assign_status != TaxiAssignStatus::Assigned {
        let mut update: booking::ActiveModel = booking.into();
        update.taxi_assign_status = Set(TaxiAssignStatus::Assigned);
        update.update(db).await?;
    }

    Ok(assignment)
}

/// Assigns a driver and cab to a B2B booking, last write wins
pub async fn assign_taxi_to_b2b_booking(
    db: &DatabaseConnection,
    booking: b2b_booking::Model,
    payload: AssignTaxi,
) -> Result<taxi_assignment::Model, DbErr> {
    let assignment = upsert_assignment(
        db,
        taxi_assignment::ActiveModel {
            b2b_booking_id: Set(Some(booking.id)),
            driver_name: Set(payload.driver_name),
            driver_number: Set(payload.driver_number),
            cab_number: Set(payload.cab_number),
            cab_name: Set(payload.cab_name),
            updated_at: Set(Some(Utc::now().into())),
            ..Default::default()
        },
        taxi_assignment::Column::B2bBookingId,
    )
    .await?;

    if booking.taxi_assign_status != TaxiAssignStatus::Assigned {
        let mut update: b2b_booking::ActiveModel = booking.into();
        update.taxi_assign_status = Set(TaxiAssignStatus::Assigned);
        update.update(db).await?;
    }

    Ok(assignment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn implied_rate_divides_the_estimate_by_the_distance() {
        assert_eq!(implied_rate(Some(1200.0), Some(100.0)), Some(12.0));
    }

    #[test]
    fn implied_rate_needs_both_an_estimate_and_a_positive_distance() {
        assert_eq!(implied_rate(None, Some(100.0)), None);
        assert_eq!(implied_rate(Some(1200.0), None), None);
        assert_eq!(implied_rate(Some(1200.0), Some(0.0)), None);
    }
}
