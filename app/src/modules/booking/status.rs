use entity::enums::{B2bBookingStatus, BookingStatus};

/// Whether a consumer booking may move from `from` to `to`
///
/// COMPLETED, CANCELLED and PAID are terminal, skipping intermediate
/// statuses (eg: PENDING straight to COMPLETED) is refused
pub fn consumer_transition_allowed(from: BookingStatus, to: BookingStatus) -> bool {
    use BookingStatus::*;

    matches!(
        (from, to),
        (Pending, Confirmed)
            | (Pending, InProgress)
            | (Pending, Cancelled)
            | (PendingPayment, Paid)
            | (PendingPayment, Cancelled)
            | (Confirmed, InProgress)
            | (Confirmed, Cancelled)
            | (InProgress, Completed)
            | (InProgress, Cancelled)
    )
}

/// Whether a B2B credit booking may move from `from` to `to`
///
/// credit bookings start CONFIRMED and only reach PAID after completion,
/// when the dispatch team settles them against the company ledger
pub fn b2b_transition_allowed(from: B2bBookingStatus, to: B2bBookingStatus) -> bool {
    use B2bBookingStatus::*;

    matches!(
        (from, to),
        (Confirmed, InProgress)
            | (Confirmed, Cancelled)
            | (InProgress, Completed)
            | (InProgress, Cancelled)
            | (Completed, Paid)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity::enums::{B2bBookingStatus as B, BookingStatus as C};
    use strum::IntoEnumIterator;

    #[test]
    fn pending_bookings_cannot_jump_to_completed() {
        assert!(!consumer_transition_allowed(C::Pending, C::Completed));
        assert!(!consumer_transition_allowed(C::Pending, C::Paid));
    }

    #[test]
    fn happy_path_for_consumer_bookings() {
        assert!(consumer_transition_allowed(C::Pending, C::Confirmed));
        assert!(consumer_transition_allowed(C::Confirmed, C::InProgress));
        assert!(consumer_transition_allowed(C::InProgress, C::Completed));
    }

    #[test]
    fn cancellation_is_allowed_from_any_active_consumer_status() {
        for from in [C::Pending, C::PendingPayment, C::Confirmed, C::InProgress] {
            assert!(consumer_transition_allowed(from, C::Cancelled));
        }
    }

    #[test]
    fn terminal_consumer_statuses_accept_no_transition() {
        for from in [C::Completed, C::Cancelled, C::Paid] {
            for to in C::iter() {
                assert!(!consumer_transition_allowed(from, to));
            }
        }
    }

    #[test]
    fn self_transitions_are_refused() {
        for status in C::iter() {
            assert!(!consumer_transition_allowed(status, status));
        }
        for status in B::iter() {
            assert!(!b2b_transition_allowed(status, status));
        }
    }

    #[test]
    fn b2b_bookings_are_paid_only_after_completion() {
        assert!(!b2b_transition_allowed(B::Confirmed, B::Paid));
        assert!(!b2b_transition_allowed(B::InProgress, B::Paid));
        assert!(b2b_transition_allowed(B::Completed, B::Paid));
    }

    #[test]
    fn cancelled_b2b_bookings_are_terminal() {
        for to in B::iter() {
            assert!(!b2b_transition_allowed(B::Cancelled, to));
            assert!(!b2b_transition_allowed(B::Paid, to));
        }
    }
}
