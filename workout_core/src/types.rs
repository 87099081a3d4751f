//! Core domain types for the workout compiler.
//!
//! This module defines the two sides of the compile step:
//! - Untrusted input (`WorkoutSpec`, `StepSpec`, `TargetSpec`) as produced by
//!   a person or a text-completion service
//! - Canonical lookup records carried verbatim into the wire payload
//! - Compiled output (`CompiledStep`, `WorkoutPayload`) in the field layout
//!   the workout service expects

use serde::{Deserialize, Serialize, Serializer};

// ============================================================================
// Input Types
// ============================================================================

/// A workout description as received from the user or a generation service
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSpec {
    pub name: String,
    /// Sport key, e.g. "running"
    #[serde(rename = "type")]
    pub sport: String,
    pub steps: Vec<StepSpec>,
}

/// A single input step, either a leaf or a repeat container
///
/// The two shapes are told apart by which fields are present, so every field
/// is optional here and [`StepSpec::is_repeat`] does the classification.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StepSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_condition_type: Option<String>,
    /// Seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<TargetSpec>,
    /// Kept as a JSON number so non-integers can be rejected explicitly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_iterations: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<StepSpec>>,
}

impl StepSpec {
    /// Time-based leaf step
    pub fn timed(step_type: &str, seconds: f64) -> Self {
        Self {
            step_type: Some(step_type.into()),
            step_duration: Some(seconds),
            ..Self::default()
        }
    }

    /// Distance-based leaf step
    pub fn distance(step_type: &str, distance: f64, unit: &str) -> Self {
        Self {
            step_type: Some(step_type.into()),
            end_condition_type: Some("distance".into()),
            step_distance: Some(distance),
            distance_unit: Some(unit.into()),
            ..Self::default()
        }
    }

    /// Repeat container
    pub fn repeat(iterations: u32, steps: Vec<StepSpec>) -> Self {
        Self {
            step_type: Some("repeat".into()),
            number_of_iterations: Some(f64::from(iterations)),
            steps: Some(steps),
            ..Self::default()
        }
    }

    pub fn named(mut self, name: &str, description: &str) -> Self {
        self.step_name = Some(name.into());
        self.step_description = Some(description.into());
        self
    }

    pub fn with_target(mut self, target: TargetSpec) -> Self {
        self.target = Some(target);
        self
    }

    /// Name used in error messages
    pub fn display_name(&self) -> &str {
        self.step_name.as_deref().unwrap_or("Unnamed Step")
    }

    /// Whether this step should compile as a repeat group
    ///
    /// A step is a repeat when it carries a child `steps` array and is marked
    /// as a repeat through `stepType` or the legacy `endConditionType`, or
    /// when it has no `stepType` at all but does carry `numberOfIterations`.
    pub fn is_repeat(&self) -> bool {
        if self.steps.is_none() {
            return false;
        }
        let marked = |field: &Option<String>| {
            field
                .as_deref()
                .is_some_and(|v| v.eq_ignore_ascii_case("repeat"))
        };
        marked(&self.step_type)
            || marked(&self.end_condition_type)
            || (self.step_type.is_none() && self.number_of_iterations.is_some())
    }
}

/// Target value: a single number or a `[low, high]` pair
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TargetValue {
    Single(f64),
    Range(f64, f64),
}

/// Physiological or performance target for a leaf step
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TargetSpec {
    /// Target key, e.g. "pace" or "heart rate"
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<TargetValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl TargetSpec {
    pub fn none() -> Self {
        Self {
            kind: "no target".into(),
            value: None,
            unit: None,
        }
    }

    pub fn range(kind: &str, low: f64, high: f64, unit: Option<&str>) -> Self {
        Self {
            kind: kind.into(),
            value: Some(TargetValue::Range(low, high)),
            unit: unit.map(Into::into),
        }
    }

    pub fn single(kind: &str, value: f64, unit: Option<&str>) -> Self {
        Self {
            kind: kind.into(),
            value: Some(TargetValue::Single(value)),
            unit: unit.map(Into::into),
        }
    }
}

// ============================================================================
// Canonical Records
// ============================================================================

/// Sport record as understood by the workout service
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SportType {
    pub sport_type_id: u32,
    pub sport_type_key: &'static str,
    pub display_order: u32,
}

/// Step-type record (warmup, interval, repeat, ...)
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StepType {
    pub step_type_id: u32,
    pub step_type_key: &'static str,
    pub display_order: u32,
}

/// Target-type record (pace.zone, power.zone, ...)
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TargetType {
    pub workout_target_type_id: u32,
    pub workout_target_type_key: &'static str,
    pub display_order: u32,
}

/// Distance unit record, including its factor to meters
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DistanceUnit {
    pub unit_id: u32,
    pub unit_key: &'static str,
    #[serde(serialize_with = "wire_number")]
    pub factor: f64,
}

/// End-condition record (time, distance, iterations, lap button)
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EndCondition {
    pub condition_type_id: u32,
    pub condition_type_key: &'static str,
    pub display_order: u32,
    pub displayable: bool,
}

// ============================================================================
// Compiled Output
// ============================================================================

/// Serializes as JSON `null`; marks a display unit left to the server
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct ServerComputedUnit;

/// A leaf step in wire form
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExecutableStep {
    pub step_id: u32,
    pub step_order: u32,
    pub step_type: StepType,
    pub end_condition: EndCondition,
    #[serde(serialize_with = "wire_number")]
    pub end_condition_value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_end_condition_unit: Option<DistanceUnit>,
    pub description: String,
    pub step_audio_note: Option<String>,
    pub target_type: TargetType,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "wire_number_opt"
    )]
    pub target_value_one: Option<f64>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "wire_number_opt"
    )]
    pub target_value_two: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_value_unit: Option<ServerComputedUnit>,
}

/// A repeat container in wire form
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RepeatGroup {
    pub step_id: u32,
    pub step_order: u32,
    pub step_type: StepType,
    pub number_of_iterations: u32,
    pub smart_repeat: bool,
    pub end_condition: EndCondition,
    pub workout_steps: Vec<CompiledStep>,
}

/// Compiled step, discriminated on the wire by its `type` field
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "type")]
pub enum CompiledStep {
    #[serde(rename = "ExecutableStepDTO")]
    Executable(ExecutableStep),
    #[serde(rename = "RepeatGroupDTO")]
    Repeat(RepeatGroup),
}

impl CompiledStep {
    pub fn step_id(&self) -> u32 {
        match self {
            CompiledStep::Executable(step) => step.step_id,
            CompiledStep::Repeat(group) => group.step_id,
        }
    }

    pub fn step_order(&self) -> u32 {
        match self {
            CompiledStep::Executable(step) => step.step_order,
            CompiledStep::Repeat(group) => group.step_order,
        }
    }

    pub fn as_executable(&self) -> Option<&ExecutableStep> {
        match self {
            CompiledStep::Executable(step) => Some(step),
            CompiledStep::Repeat(_) => None,
        }
    }

    pub fn as_repeat(&self) -> Option<&RepeatGroup> {
        match self {
            CompiledStep::Repeat(group) => Some(group),
            CompiledStep::Executable(_) => None,
        }
    }
}

/// The single segment a workout compiles into
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSegment {
    pub segment_order: u32,
    pub sport_type: SportType,
    pub workout_steps: Vec<CompiledStep>,
}

/// Always serialized as `{"unitKey": null}`
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EstimatedDistanceUnit {
    pub unit_key: Option<String>,
}

/// Request body for the workout-creation endpoint
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPayload {
    pub sport_type: SportType,
    pub sub_sport_type: Option<String>,
    pub workout_name: String,
    pub estimated_distance_unit: EstimatedDistanceUnit,
    pub workout_segments: Vec<WorkoutSegment>,
    pub avg_training_speed: Option<f64>,
    #[serde(serialize_with = "wire_number")]
    pub estimated_duration_in_secs: f64,
    pub estimated_distance_in_meters: u32,
    pub estimate_type: Option<String>,
}

impl WorkoutPayload {
    /// Top-level steps of the (only) segment
    pub fn steps(&self) -> &[CompiledStep] {
        self.workout_segments
            .first()
            .map(|segment| segment.workout_steps.as_slice())
            .unwrap_or(&[])
    }
}

// ============================================================================
// Wire Number Formatting
// ============================================================================

/// Largest integer exactly representable in an f64
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Whole numbers go out as JSON integers (`600`), everything else as floats
fn wire_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

fn wire_number_opt<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => wire_number(v, serializer),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_step_spec_parses_camel_case() {
        let step: StepSpec = serde_json::from_value(json!({
            "stepName": "Run",
            "stepType": "interval",
            "stepDuration": 300,
            "target": { "type": "pace", "value": [4, 5], "unit": "min_per_km" }
        }))
        .unwrap();

        assert_eq!(step.step_name.as_deref(), Some("Run"));
        assert_eq!(step.step_duration, Some(300.0));
        let target = step.target.unwrap();
        assert_eq!(target.value, Some(TargetValue::Range(4.0, 5.0)));
    }

    #[test]
    fn test_target_value_single_and_null() {
        let target: TargetSpec =
            serde_json::from_value(json!({ "type": "pace", "value": 6.5 })).unwrap();
        assert_eq!(target.value, Some(TargetValue::Single(6.5)));

        let target: TargetSpec =
            serde_json::from_value(json!({ "type": "pace", "value": null })).unwrap();
        assert_eq!(target.value, None);
    }

    #[test]
    fn test_is_repeat_classification() {
        assert!(StepSpec::repeat(3, vec![]).is_repeat());

        let legacy = StepSpec {
            end_condition_type: Some("repeat".into()),
            step_type: Some("interval".into()),
            number_of_iterations: Some(2.0),
            steps: Some(vec![]),
            ..StepSpec::default()
        };
        assert!(legacy.is_repeat());

        let untyped = StepSpec {
            number_of_iterations: Some(2.0),
            steps: Some(vec![]),
            ..StepSpec::default()
        };
        assert!(untyped.is_repeat());

        let no_children = StepSpec {
            steps: None,
            ..StepSpec::repeat(2, vec![])
        };
        assert!(!no_children.is_repeat());
        assert!(!StepSpec::timed("interval", 60.0).is_repeat());
    }

    #[test]
    fn test_wire_numbers_drop_trailing_zero() {
        let unit = DistanceUnit {
            unit_id: 3,
            unit_key: "km",
            factor: 1000.0,
        };
        assert_eq!(
            serde_json::to_string(&unit).unwrap(),
            r#"{"unitId":3,"unitKey":"km","factor":1000}"#
        );

        let mile = DistanceUnit {
            unit_id: 4,
            unit_key: "mile",
            factor: 1609.344,
        };
        assert!(serde_json::to_string(&mile).unwrap().contains("1609.344"));
    }

    #[test]
    fn test_server_computed_unit_is_null() {
        assert_eq!(
            serde_json::to_value(ServerComputedUnit).unwrap(),
            serde_json::Value::Null
        );
    }
}
