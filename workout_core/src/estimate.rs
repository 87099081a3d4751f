//! Duration estimation over compiled steps.
//!
//! Runs after compilation because distance steps are timed from their
//! resolved targets, which are already in m/s at this point.

use crate::tables;
use crate::{CompiledStep, ExecutableStep};

const PACE_ZONE: &str = "pace.zone";
const SPEED_ZONE: &str = "speed.zone";

/// Total estimated seconds for a list of compiled steps
///
/// `sport_key` is the workout's sport key (e.g. "cycling") and selects the
/// default pacing for distance steps without a usable target.
pub fn estimate_duration(steps: &[CompiledStep], sport_key: &str) -> f64 {
    steps
        .iter()
        .map(|step| estimate_step(step, sport_key))
        .sum()
}

/// Estimated seconds for one compiled step, repeats included
pub fn estimate_step(step: &CompiledStep, sport_key: &str) -> f64 {
    match step {
        CompiledStep::Executable(step) => {
            if step.end_condition == tables::DISTANCE {
                step.end_condition_value * seconds_per_meter(step, sport_key)
            } else {
                step.end_condition_value
            }
        }
        CompiledStep::Repeat(group) => {
            f64::from(group.number_of_iterations) * estimate_duration(&group.workout_steps, sport_key)
        }
    }
}

fn seconds_per_meter(step: &ExecutableStep, sport_key: &str) -> f64 {
    let speeds = match (step.target_value_one, step.target_value_two) {
        (Some(one), Some(two)) if one + two > 0.0 => Some((one, two)),
        _ => None,
    };

    match (step.target_type.workout_target_type_key, speeds) {
        // Both bounds are speeds; 2 / (a + b) is the reciprocal of their mean
        (PACE_ZONE, Some((one, two))) => 2.0 / (one + two),
        (SPEED_ZONE, Some((one, two))) => 1.0 / ((one + two) / 2.0),
        _ => tables::default_seconds_per_meter(sport_key),
    }
}
