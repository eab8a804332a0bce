use super::dto::{BillingSummary, MonthlyBucket};
use chrono::{DateTime, Datelike, FixedOffset};
use entity::{b2b_booking, b2b_payment};
use std::collections::BTreeMap;

/// `YYYY-MM` bucket key for the monthly breakdown
fn month_key(date: &DateTime<FixedOffset>) -> String {
    format!("{}-{:02}", date.year(), date.month())
}

/// Totals over every booking billed to the company and every ledger payment
///
/// outstanding can go negative when a company pre pays
pub fn summarize(
    bookings: &[b2b_booking::Model],
    payments: &[b2b_payment::Model],
) -> BillingSummary {
    let total_billed: f64 = bookings.iter().map(|b| b.total_amount).sum();
    let total_paid: f64 = payments.iter().map(|p| p.amount).sum();

    BillingSummary {
        total_billed,
        total_paid,
        outstanding: total_billed - total_paid,
        total_bookings: bookings.len(),
    }
}

/// Month by month totals, bookings are bucketed by their creation date
/// and payments by their paid date, independently, so a trip booked in
/// january and settled in march shows up in both months
pub fn monthly_breakdown(
    bookings: &[b2b_booking::Model],
    payments: &[b2b_payment::Model],
) -> BTreeMap<String, MonthlyBucket> {
    let mut breakdown: BTreeMap<String, MonthlyBucket> = BTreeMap::new();

    for booking in bookings {
        let bucket = breakdown.entry(month_key(&booking.created_at)).or_default();

        bucket.count += 1;
        bucket.billed += booking.total_amount;
    }

    for payment in payments {
        let bucket = breakdown.entry(month_key(&payment.paid_at)).or_default();

        bucket.paid += payment.amount;
    }

    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use entity::enums::{B2bBookingStatus, TaxiAssignStatus};

    fn at(year: i32, month: u32, day: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(year, month, day, 12, 0, 0)
            .unwrap()
    }

    fn booking(amount: f64, created_at: DateTime<FixedOffset>) -> b2b_booking::Model {
        b2b_booking::Model {
            id: 1,
            created_at,
            company_id: 1,
            booked_by: 1,
            pickup_location: String::from("airport"),
            drop_location: String::from("downtown"),
            scheduled_at: None,
            distance_km: None,
            estimated_fare: None,
            total_amount: amount,
            car_model: None,
            status: B2bBookingStatus::Confirmed,
            taxi_assign_status: TaxiAssignStatus::NotAssigned,
            actual_km: None,
            toll_charges: None,
            cancel_reason: None,
            payment_mode: None,
            payment_remarks: None,
            paid_at: None,
        }
    }

    fn payment(amount: f64, paid_at: DateTime<FixedOffset>) -> b2b_payment::Model {
        b2b_payment::Model {
            id: 1,
            company_id: 1,
            amount,
            payment_mode: String::from("NEFT"),
            reference_no: None,
            notes: None,
            paid_at,
            created_by: None,
        }
    }

    #[test]
    fn summary_totals_billed_paid_and_outstanding() {
        let bookings = vec![booking(500.0, at(2026, 1, 10)), booking(700.0, at(2026, 1, 20))];
        let payments = vec![payment(600.0, at(2026, 2, 1))];

        let summary = summarize(&bookings, &payments);

        assert_eq!(summary.total_billed, 1200.0);
        assert_eq!(summary.total_paid, 600.0);
        assert_eq!(summary.outstanding, 600.0);
        assert_eq!(summary.total_bookings, 2);
    }

    #[test]
    fn summary_of_nothing_is_all_zeros() {
        let summary = summarize(&[], &[]);

        assert_eq!(summary.total_billed, 0.0);
        assert_eq!(summary.total_paid, 0.0);
        assert_eq!(summary.outstanding, 0.0);
        assert_eq!(summary.total_bookings, 0);
    }

    #[test]
    fn prepayment_makes_outstanding_negative() {
        let payments = vec![payment(250.0, at(2026, 3, 5))];

        let summary = summarize(&[], &payments);

        assert_eq!(summary.outstanding, -250.0);
    }

    #[test]
    fn bookings_and_payments_are_bucketed_by_their_own_dates() {
        let bookings = vec![booking(500.0, at(2026, 1, 10))];
        let payments = vec![payment(500.0, at(2026, 3, 2))];

        let breakdown = monthly_breakdown(&bookings, &payments);

        let january = breakdown.get("2026-01").unwrap();
        assert_eq!(january.count, 1);
        assert_eq!(january.billed, 500.0);
        assert_eq!(january.paid, 0.0);

        let march = breakdown.get("2026-03").unwrap();
        assert_eq!(march.count, 0);
        assert_eq!(march.billed, 0.0);
        assert_eq!(march.paid, 500.0);
    }

    #[test]
    fn same_month_activity_lands_in_one_bucket() {
        let bookings = vec![booking(300.0, at(2026, 5, 1)), booking(200.0, at(2026, 5, 28))];
        let payments = vec![payment(100.0, at(2026, 5, 15))];

        let breakdown = monthly_breakdown(&bookings, &payments);

        assert_eq!(breakdown.len(), 1);
        let may = breakdown.get("2026-05").unwrap();
        assert_eq!(may.count, 2);
        assert_eq!(may.billed, 500.0);
        assert_eq!(may.paid, 100.0);
    }

    #[test]
    fn month_keys_are_zero_padded() {
        let breakdown = monthly_breakdown(&[booking(1.0, at(2026, 9, 9))], &[]);

        assert!(breakdown.contains_key("2026-09"));
    }
}
