use entity::pricing_settings;

/// Whether the minimum distance floor is in force, settings carry a
/// flag per trip category and bookings do not record a category, so
/// the floor is applied once any category has it enabled
pub fn min_km_floor_active(settings: &pricing_settings::Model) -> bool {
    settings.min_km_airport_apply
        || settings.min_km_oneway_apply
        || settings.min_km_roundtrip_apply
}

/// Final fare for a completed trip
///
/// deterministic: same inputs always yield the same amount, so a
/// retried completion recomputes the identical value
pub fn compute_final_fare(
    actual_km: f64,
    rate_per_km: f64,
    toll_charges: f64,
    settings: &pricing_settings::Model,
) -> f64 {
    let billed_km = if min_km_floor_active(settings) {
        actual_km.max(settings.min_km_threshold)
    } else {
        actual_km
    };

    round_half_up(billed_km * rate_per_km + toll_charges)
}

/// rounds to 2 decimal places, half up
fn round_half_up(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(threshold: f64, floor_on: bool) -> pricing_settings::Model {
        pricing_settings::Model {
            id: 1,
            min_km_threshold: threshold,
            min_km_airport_apply: floor_on,
            min_km_oneway_apply: false,
            min_km_roundtrip_apply: false,
            updated_at: None,
        }
    }

    #[test]
    fn fare_is_distance_times_rate_plus_tolls() {
        let s = settings(100.0, false);
        assert_eq!(compute_final_fare(120.0, 12.0, 250.0, &s), 1690.0);
    }

    #[test]
    fn short_trips_are_billed_at_the_minimum_distance_when_the_floor_is_on() {
        let s = settings(100.0, true);
        assert_eq!(compute_final_fare(40.0, 10.0, 0.0, &s), 1000.0);
    }

    #[test]
    fn floor_is_ignored_when_no_category_enables_it() {
        let s = settings(100.0, false);
        assert_eq!(compute_final_fare(40.0, 10.0, 0.0, &s), 400.0);
    }

    #[test]
    fn trips_over_the_threshold_are_unaffected_by_the_floor() {
        let s = settings(100.0, true);
        assert_eq!(compute_final_fare(150.0, 10.0, 0.0, &s), 1500.0);
    }

    #[test]
    fn amounts_are_rounded_half_up_to_two_decimals() {
        let s = settings(100.0, false);
        // 0.375 is exactly representable, the .5 cent rounds up
        assert_eq!(compute_final_fare(0.0, 0.0, 0.375, &s), 0.38);
        assert_eq!(compute_final_fare(1.0, 1.004, 0.0, &s), 1.0);
    }

    #[test]
    fn recomputation_with_identical_inputs_is_stable() {
        let s = settings(100.0, true);
        let first = compute_final_fare(87.3, 11.5, 120.0, &s);
        let second = compute_final_fare(87.3, 11.5, 120.0, &s);
        assert_eq!(first, second);
    }
}
