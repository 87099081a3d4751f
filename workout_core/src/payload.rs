//! Payload assembly: the compiler's entry point.
//!
//! 1. Resolve the sport (fails before anything else is looked at)
//! 2. Compile the step tree
//! 3. Estimate the duration over the compiled steps
//! 4. Wrap everything in the single-segment payload

use crate::compiler::{CompileOptions, StepCompiler};
use crate::estimate::estimate_duration;
use crate::tables;
use crate::{EstimatedDistanceUnit, Result, WorkoutPayload, WorkoutSegment, WorkoutSpec};

/// Compile a workout with the default ceilings
pub fn compile(spec: &WorkoutSpec) -> Result<WorkoutPayload> {
    compile_with(spec, &CompileOptions::default())
}

/// Compile a workout into the workout-service request body
pub fn compile_with(spec: &WorkoutSpec, options: &CompileOptions) -> Result<WorkoutPayload> {
    let sport_type = tables::sport_type(&spec.sport)?;

    let mut compiler = StepCompiler::new(options);
    let workout_steps = compiler.compile(&spec.steps)?;

    let estimated_duration_in_secs = estimate_duration(&workout_steps, &spec.sport.to_lowercase());

    Ok(WorkoutPayload {
        sport_type,
        sub_sport_type: None,
        workout_name: spec.name.clone(),
        estimated_distance_unit: EstimatedDistanceUnit::default(),
        workout_segments: vec![WorkoutSegment {
            segment_order: 1,
            sport_type,
            workout_steps,
        }],
        avg_training_speed: None,
        estimated_duration_in_secs,
        estimated_distance_in_meters: 0,
        estimate_type: None,
    })
}
