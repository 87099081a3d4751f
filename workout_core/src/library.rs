//! Built-in example workouts.
//!
//! These double as documentation of the input format and as fixtures for
//! exercising the compiler end to end.

use crate::{StepSpec, TargetSpec, WorkoutSpec};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// Cached example library - built once and reused
static LIBRARY: Lazy<BTreeMap<&'static str, WorkoutSpec>> = Lazy::new(build_library);

/// Names of all built-in examples, sorted
pub fn example_names() -> Vec<&'static str> {
    LIBRARY.keys().copied().collect()
}

/// Look up a built-in example by name
pub fn get_example(name: &str) -> Option<&'static WorkoutSpec> {
    LIBRARY.get(name)
}

fn workout(name: &str, sport: &str, steps: Vec<StepSpec>) -> WorkoutSpec {
    WorkoutSpec {
        name: name.into(),
        sport: sport.into(),
        steps,
    }
}

fn build_library() -> BTreeMap<&'static str, WorkoutSpec> {
    let mut library = BTreeMap::new();

    library.insert(
        "simple_run",
        workout(
            "Example Workout",
            "running",
            vec![
                StepSpec::timed("warmup", 600.0)
                    .named("Warm Up", "Warm up for 10 minutes")
                    .with_target(TargetSpec::range("heart rate", 120.0, 140.0, Some("bpm"))),
                StepSpec::timed("interval", 1800.0)
                    .named("Run Interval", "Run at target pace")
                    .with_target(TargetSpec::range("pace", 4.5, 5.5, Some("min_per_km"))),
                StepSpec::timed("cooldown", 600.0)
                    .named("Cool Down", "Cool down for 10 minutes")
                    .with_target(TargetSpec::none()),
            ],
        ),
    );

    library.insert(
        "simple_cycling",
        workout(
            "Cycling Workout",
            "cycling",
            vec![
                StepSpec::timed("warmup", 900.0)
                    .named("Warm Up", "Warm up for 15 minutes")
                    .with_target(TargetSpec::range("power", 100.0, 150.0, Some("watts"))),
                StepSpec::timed("interval", 1800.0)
                    .named("Main Interval", "Ride at target power")
                    .with_target(TargetSpec::range("power", 200.0, 250.0, Some("watts"))),
                StepSpec::timed("cooldown", 600.0)
                    .named("Cool Down", "Cool down for 10 minutes")
                    .with_target(TargetSpec::none()),
            ],
        ),
    );

    library.insert(
        "interval_running",
        workout(
            "Interval Workout with Repeats",
            "running",
            vec![
                StepSpec::timed("warmup", 600.0).named("Warm Up", "Warm up for 10 minutes"),
                StepSpec::repeat(
                    3,
                    vec![
                        StepSpec::timed("interval", 300.0)
                            .named("Run Hard", "Run hard for 5 minutes")
                            .with_target(TargetSpec::range("pace", 4.0, 5.0, None)),
                        StepSpec::timed("recovery", 120.0)
                            .named("Recover", "Recover for 2 minutes"),
                    ],
                ),
                StepSpec::timed("cooldown", 600.0).named("Cool Down", "Cool down for 10 minutes"),
            ],
        ),
    );

    library.insert(
        "single_value",
        workout(
            "Tempo Running Workout",
            "running",
            vec![
                StepSpec::timed("warmup", 300.0)
                    .named("5 min Tempo Run at 6:30 min/km pace", "Warmup")
                    .with_target(TargetSpec::single("pace", 6.5, Some("min_per_km"))),
                StepSpec::timed("interval", 600.0)
                    .named("10 min Tempo Run at 5:00 min/km pace", "Interval")
                    .with_target(TargetSpec::single("pace", 5.0, Some("min_per_km"))),
                StepSpec::timed("interval", 2700.0)
                    .named("45 min Tempo Run at 4:30 min/km pace", "Interval")
                    .with_target(TargetSpec::single("pace", 4.5, Some("min_per_km"))),
            ],
        ),
    );

    library.insert(
        "distance_based",
        workout(
            "Distance-based Interval Workout",
            "running",
            vec![
                StepSpec::distance("warmup", 1.0, "km")
                    .named("Warm Up", "Warm up with easy jogging")
                    .with_target(TargetSpec::none()),
                StepSpec::repeat(
                    5,
                    vec![
                        StepSpec::distance("interval", 400.0, "m")
                            .named("Fast 400m", "Run fast for 400 meters")
                            .with_target(TargetSpec::range("pace", 4.0, 4.5, Some("min_per_km"))),
                        StepSpec::distance("recovery", 200.0, "m")
                            .named("Recovery", "Easy jog for recovery")
                            .with_target(TargetSpec::range("heart rate", 120.0, 130.0, Some("bpm"))),
                    ],
                ),
                StepSpec::distance("cooldown", 1.0, "km")
                    .named("Cool Down", "Slow jog to cool down")
                    .with_target(TargetSpec::none()),
            ],
        ),
    );

    let mut mixed_warmup = StepSpec::timed("warmup", 600.0)
        .named("Warm Up", "Warm up with easy jogging")
        .with_target(TargetSpec::range("heart rate", 120.0, 130.0, Some("bpm")));
    mixed_warmup.end_condition_type = Some("time".into());

    library.insert(
        "mixed",
        workout(
            "Mixed Time and Distance Workout",
            "running",
            vec![
                mixed_warmup,
                StepSpec::repeat(
                    3,
                    vec![
                        StepSpec::distance("interval", 1.0, "mile")
                            .named("Mile Repeat", "Run one mile at target pace")
                            .with_target(TargetSpec::range("pace", 4.5, 5.0, Some("min_per_km"))),
                        StepSpec::timed("recovery", 180.0)
                            .named("Recovery", "Recovery period")
                            .with_target(TargetSpec::range("heart rate", 120.0, 130.0, Some("bpm"))),
                    ],
                ),
                StepSpec::timed("cooldown", 600.0)
                    .named("Cool Down", "Slow jog to cool down")
                    .with_target(TargetSpec::none()),
            ],
        ),
    );

    library
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile;

    #[test]
    fn test_library_loads() {
        assert_eq!(
            example_names(),
            vec![
                "distance_based",
                "interval_running",
                "mixed",
                "simple_cycling",
                "simple_run",
                "single_value"
            ]
        );
        assert!(get_example("nonexistent").is_none());
    }

    #[test]
    fn test_every_example_compiles() {
        for name in example_names() {
            let spec = get_example(name).unwrap();
            let payload = compile(spec)
                .unwrap_or_else(|e| panic!("Example {} failed to compile: {}", name, e));
            assert!(
                payload.estimated_duration_in_secs > 0.0,
                "Example {} has no duration",
                name
            );
        }
    }

    #[test]
    fn test_interval_running_duration() {
        let payload = compile(get_example("interval_running").unwrap()).unwrap();
        assert_eq!(payload.estimated_duration_in_secs, 600.0 + 3.0 * 420.0 + 600.0);
    }

    #[test]
    fn test_distance_based_step_orders() {
        let payload = compile(get_example("distance_based").unwrap()).unwrap();
        let steps = payload.steps();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[1].step_order(), 2);
        let group = steps[1].as_repeat().unwrap();
        assert_eq!(group.workout_steps[1].step_order(), 4);
        assert_eq!(steps[2].step_order(), 5);
    }

    #[test]
    fn test_examples_roundtrip_through_json() {
        let spec = get_example("mixed").unwrap();
        let text = serde_json::to_string(spec).unwrap();
        let parsed: WorkoutSpec = serde_json::from_str(&text).unwrap();
        assert_eq!(&parsed, spec);
    }
}
