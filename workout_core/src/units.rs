//! Unit conversion helpers.
//!
//! - Distances are normalized to meters
//! - Pace in minutes per km becomes speed in m/s
//! - Single target values are widened into a symmetric range

use crate::tables::PACE;
use crate::DistanceUnit;

/// The only target unit that is converted; every other unit passes through
pub const MIN_PER_KM: &str = "min_per_km";

/// Half-width of a synthesized pace range: ten seconds per km, in minutes
const PACE_HALF_WIDTH_MINUTES: f64 = 10.0 / 60.0;

/// Synthesized range bounds for every other metric, relative to the value
const RANGE_LOW_FACTOR: f64 = 0.95;
const RANGE_HIGH_FACTOR: f64 = 1.05;

/// Convert a distance to meters
///
/// Kilometre results of at least 1000 m are rounded to whole meters; miles
/// keep the full-precision factor and are never rounded.
pub fn distance_to_meters(value: f64, unit: &DistanceUnit) -> f64 {
    let meters = value * unit.factor;
    match unit.unit_key {
        "km" if meters >= 1000.0 => meters.round(),
        _ => meters,
    }
}

/// Convert a pace in minutes per km to a speed in meters per second
///
/// Decreasing in its input: a faster (lower) pace gives a higher speed.
pub fn pace_to_speed(pace_minutes_per_km: f64) -> f64 {
    1000.0 / (pace_minutes_per_km * 60.0)
}

/// Widen a single target value into a `(low, high)` pair in input units
pub fn synthesize_range(value: f64, target_key: &str) -> (f64, f64) {
    if target_key == PACE {
        (value - PACE_HALF_WIDTH_MINUTES, value + PACE_HALF_WIDTH_MINUTES)
    } else {
        (value * RANGE_LOW_FACTOR, value * RANGE_HIGH_FACTOR)
    }
}

/// Convert one target bound from its input unit to the wire unit
pub fn convert_target_value(value: f64, unit: Option<&str>) -> f64 {
    match unit {
        Some(MIN_PER_KM) => pace_to_speed(value),
        _ => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::distance_unit;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_mile_keeps_full_precision() {
        let mile = distance_unit("mile").unwrap();
        assert_eq!(distance_to_meters(1.0, &mile), 1609.344);
        assert!(approx(distance_to_meters(2.5, &mile), 4023.36));
    }

    #[test]
    fn test_km_rounds_at_or_above_one_km() {
        let km = distance_unit("km").unwrap();
        assert_eq!(distance_to_meters(1.0, &km), 1000.0);
        assert_eq!(distance_to_meters(1.2, &km), 1200.0);
        assert_eq!(distance_to_meters(5.0004, &km), 5000.0);
        // Below one kilometre the raw product is kept
        assert_eq!(distance_to_meters(0.25, &km), 250.0);
    }

    #[test]
    fn test_meters_pass_through() {
        let m = distance_unit("m").unwrap();
        assert_eq!(distance_to_meters(400.0, &m), 400.0);
        assert_eq!(distance_to_meters(0.5, &m), 0.5);
    }

    #[test]
    fn test_pace_to_speed() {
        assert_eq!(pace_to_speed(5.0), 3.3333333333333335);
        assert_eq!(pace_to_speed(6.0), 2.7777777777777777);
    }

    #[test]
    fn test_synthesized_ranges() {
        let (low, high) = synthesize_range(6.5, "pace");
        assert!(approx(low, 6.5 - 1.0 / 6.0));
        assert!(approx(high, 6.5 + 1.0 / 6.0));

        let (low, high) = synthesize_range(200.0, "power");
        assert!(approx(low, 190.0));
        assert!(approx(high, 210.0));
    }

    #[test]
    fn test_non_pace_units_pass_through() {
        assert_eq!(convert_target_value(150.0, Some("bpm")), 150.0);
        assert_eq!(convert_target_value(3.5, Some("m/s")), 3.5);
        assert_eq!(convert_target_value(250.0, None), 250.0);
        assert_eq!(convert_target_value(5.0, Some(MIN_PER_KM)), pace_to_speed(5.0));
    }
}
