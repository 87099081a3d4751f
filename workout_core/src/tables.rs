//! Lookup tables for sports, step types, targets, units and end conditions.
//!
//! Tables are keyed by lowercase strings and built once. Two lookup flavors
//! exist and every caller goes through one of them:
//! - [`require`]: a miss is an error naming the raw input
//! - [`or_fallback`]: a miss silently yields a default record
//!
//! Step types are the only table looked up with fallback.

use crate::{DistanceUnit, EndCondition, Error, Result, SportType, StepType, TargetType};
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const NO_TARGET: &str = "no target";
pub const PACE: &str = "pace";
pub const INTERVAL: &str = "interval";
pub const REPEAT: &str = "repeat";

static SPORT_TYPES: Lazy<HashMap<&'static str, SportType>> = Lazy::new(|| {
    let sport = |sport_type_id, sport_type_key, display_order| SportType {
        sport_type_id,
        sport_type_key,
        display_order,
    };
    HashMap::from([
        ("running", sport(1, "running", 1)),
        ("cycling", sport(2, "cycling", 2)),
        ("swimming", sport(4, "swimming", 5)),
        ("strength", sport(5, "strength_training", 9)),
        ("cardio", sport(6, "cardio_training", 8)),
    ])
});

static STEP_TYPES: Lazy<HashMap<&'static str, StepType>> = Lazy::new(|| {
    let step = |step_type_id, step_type_key, display_order| StepType {
        step_type_id,
        step_type_key,
        display_order,
    };
    HashMap::from([
        ("warmup", step(1, "warmup", 1)),
        ("cooldown", step(2, "cooldown", 2)),
        (INTERVAL, step(3, INTERVAL, 3)),
        ("recovery", step(4, "recovery", 4)),
        ("rest", step(5, "rest", 5)),
        (REPEAT, step(6, REPEAT, 6)),
    ])
});

static TARGET_TYPES: Lazy<HashMap<&'static str, TargetType>> = Lazy::new(|| {
    let target = |workout_target_type_id, workout_target_type_key, display_order| TargetType {
        workout_target_type_id,
        workout_target_type_key,
        display_order,
    };
    HashMap::from([
        (NO_TARGET, target(1, "no.target", 1)),
        ("power", target(2, "power.zone", 2)),
        ("cadence", target(3, "cadence.zone", 3)),
        ("heart rate", target(4, "heart.rate.zone", 4)),
        ("speed", target(5, "speed.zone", 5)),
        (PACE, target(6, "pace.zone", 6)),
    ])
});

static DISTANCE_UNITS: Lazy<HashMap<&'static str, DistanceUnit>> = Lazy::new(|| {
    let unit = |unit_id, unit_key, factor| DistanceUnit {
        unit_id,
        unit_key,
        factor,
    };
    HashMap::from([
        ("m", unit(2, "m", 1.0)),
        ("km", unit(3, "km", 1000.0)),
        ("mile", unit(4, "mile", 1609.344)),
    ])
});

pub const LAP_BUTTON: EndCondition = EndCondition {
    condition_type_id: 1,
    condition_type_key: "lap.button",
    display_order: 1,
    displayable: true,
};

pub const TIME: EndCondition = EndCondition {
    condition_type_id: 2,
    condition_type_key: "time",
    display_order: 2,
    displayable: true,
};

pub const DISTANCE: EndCondition = EndCondition {
    condition_type_id: 3,
    condition_type_key: "distance",
    display_order: 3,
    displayable: true,
};

pub const ITERATIONS: EndCondition = EndCondition {
    condition_type_id: 7,
    condition_type_key: "iterations",
    display_order: 7,
    displayable: false,
};

static END_CONDITIONS: Lazy<HashMap<&'static str, EndCondition>> = Lazy::new(|| {
    HashMap::from([
        (LAP_BUTTON.condition_type_key, LAP_BUTTON),
        (TIME.condition_type_key, TIME),
        (DISTANCE.condition_type_key, DISTANCE),
        (ITERATIONS.condition_type_key, ITERATIONS),
    ])
});

/// Estimated seconds per meter when a distance step has no usable target
static DEFAULT_SECONDS_PER_METER: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    HashMap::from([
        ("running", 0.36),
        ("cycling", 0.05),
        ("swimming", 0.5),
        ("walking", 0.3),
        ("strength", 0.36),
        ("cardio", 0.36),
    ])
});

const DEFAULT_SPORT_PACE_KEY: &str = "running";

/// Strict lookup: the lowercased key must exist
fn require<T: Copy>(
    table: &HashMap<&'static str, T>,
    raw: &str,
    missing: impl FnOnce(String) -> Error,
) -> Result<T> {
    table
        .get(raw.to_lowercase().as_str())
        .copied()
        .ok_or_else(|| missing(raw.to_string()))
}

/// Lenient lookup: a miss yields the record stored under `fallback`
fn or_fallback<T: Copy>(table: &HashMap<&'static str, T>, raw: &str, fallback: &str) -> T {
    match table.get(raw.to_lowercase().as_str()) {
        Some(record) => *record,
        None => table[fallback],
    }
}

pub fn sport_type(raw: &str) -> Result<SportType> {
    require(&*SPORT_TYPES, raw, Error::UnsupportedSportType)
}

pub fn target_type(raw: &str) -> Result<TargetType> {
    require(&*TARGET_TYPES, raw, Error::UnsupportedTargetType)
}

pub fn distance_unit(raw: &str) -> Result<DistanceUnit> {
    require(&*DISTANCE_UNITS, raw, Error::UnsupportedDistanceUnit)
}

pub fn end_condition(raw: &str) -> Result<EndCondition> {
    require(&*END_CONDITIONS, raw, Error::UnsupportedEndConditionType)
}

/// Unknown step types compile as intervals
pub fn step_type_or_interval(raw: &str) -> StepType {
    or_fallback(&*STEP_TYPES, raw, INTERVAL)
}

pub fn repeat_step_type() -> StepType {
    STEP_TYPES[REPEAT]
}

pub fn no_target() -> TargetType {
    TARGET_TYPES[NO_TARGET]
}

/// Default pacing for a sport key, running's value when the sport is unlisted
pub fn default_seconds_per_meter(sport_key: &str) -> f64 {
    or_fallback(&*DEFAULT_SECONDS_PER_METER, sport_key, DEFAULT_SPORT_PACE_KEY)
}

/// Sport keys accepted in a workout's `type` field, sorted
pub fn sport_keys() -> Vec<&'static str> {
    let mut keys: Vec<_> = SPORT_TYPES.keys().copied().collect();
    keys.sort_unstable();
    keys
}

/// Target keys accepted in `target.type`, sorted by display order
pub fn target_keys() -> Vec<&'static str> {
    let mut entries: Vec<_> = TARGET_TYPES.iter().collect();
    entries.sort_by_key(|(_, record)| record.display_order);
    entries.into_iter().map(|(key, _)| *key).collect()
}

/// Step keys accepted in `stepType`, sorted by display order
pub fn step_keys() -> Vec<&'static str> {
    let mut entries: Vec<_> = STEP_TYPES.iter().collect();
    entries.sort_by_key(|(_, record)| record.display_order);
    entries.into_iter().map(|(key, _)| *key).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sport_lookup_is_case_insensitive() {
        let sport = sport_type("Running").unwrap();
        assert_eq!(sport.sport_type_id, 1);
        assert_eq!(sport.sport_type_key, "running");

        let strength = sport_type("STRENGTH").unwrap();
        assert_eq!(strength.sport_type_key, "strength_training");
    }

    #[test]
    fn test_unknown_sport_names_raw_input() {
        match sport_type("Unknown_Sport") {
            Err(Error::UnsupportedSportType(raw)) => assert_eq!(raw, "Unknown_Sport"),
            other => panic!("Expected UnsupportedSportType, got {:?}", other),
        }
    }

    #[test]
    fn test_step_type_falls_back_to_interval() {
        assert_eq!(step_type_or_interval("warmup").step_type_id, 1);
        assert_eq!(step_type_or_interval("sprint").step_type_key, "interval");
        assert_eq!(step_type_or_interval("").step_type_id, 3);
    }

    #[test]
    fn test_target_and_unit_lookups_fail_hard() {
        assert!(matches!(
            target_type("unknown_target"),
            Err(Error::UnsupportedTargetType(_))
        ));
        assert!(matches!(
            distance_unit("invalid_unit"),
            Err(Error::UnsupportedDistanceUnit(_))
        ));
        assert_eq!(target_type("Heart Rate").unwrap().workout_target_type_key, "heart.rate.zone");
        assert_eq!(distance_unit("KM").unwrap().factor, 1000.0);
    }

    #[test]
    fn test_end_condition_lookup() {
        assert_eq!(end_condition("time").unwrap(), TIME);
        assert_eq!(end_condition("Distance").unwrap(), DISTANCE);
        assert!(matches!(
            end_condition("calories"),
            Err(Error::UnsupportedEndConditionType(raw)) if raw == "calories"
        ));
    }

    #[test]
    fn test_default_pace_table() {
        assert_eq!(default_seconds_per_meter("cycling"), 0.05);
        assert_eq!(default_seconds_per_meter("swimming"), 0.5);
        assert_eq!(default_seconds_per_meter("rowing"), 0.36);
    }

    #[test]
    fn test_key_listings() {
        assert_eq!(
            sport_keys(),
            vec!["cardio", "cycling", "running", "strength", "swimming"]
        );
        assert_eq!(target_keys().first(), Some(&NO_TARGET));
        assert_eq!(step_keys().last(), Some(&REPEAT));
    }
}
