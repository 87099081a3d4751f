//! End-condition resolution for leaf steps.

use crate::tables;
use crate::units;
use crate::{DistanceUnit, EndCondition, Error, Result, StepSpec};

/// How a leaf step ends, in wire form
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedEndCondition {
    pub end_condition: EndCondition,
    /// Seconds for time steps, meters for distance steps
    pub value: f64,
    pub preferred_unit: Option<DistanceUnit>,
}

/// Resolve the end condition of a leaf step
///
/// An explicit `endConditionType` wins. Without one the step is timed,
/// which requires a `stepDuration`.
pub fn resolve_end_condition(step: &StepSpec) -> Result<ResolvedEndCondition> {
    let record = match step.end_condition_type.as_deref() {
        Some(kind) => tables::end_condition(kind)?,
        None if step.step_duration.is_some() => tables::TIME,
        None => return Err(Error::InvalidDuration(step.display_name().to_string())),
    };

    if record == tables::TIME {
        resolve_time(step)
    } else if record == tables::DISTANCE {
        resolve_distance(step)
    } else {
        // lap.button and iterations exist in the table but never end a leaf
        Err(Error::UnsupportedEndConditionType(
            step.end_condition_type.clone().unwrap_or_default(),
        ))
    }
}

fn resolve_time(step: &StepSpec) -> Result<ResolvedEndCondition> {
    match step.step_duration {
        Some(seconds) if seconds > 0.0 && seconds.is_finite() => Ok(ResolvedEndCondition {
            end_condition: tables::TIME,
            value: seconds,
            preferred_unit: None,
        }),
        _ => Err(Error::InvalidDuration(step.display_name().to_string())),
    }
}

fn resolve_distance(step: &StepSpec) -> Result<ResolvedEndCondition> {
    let (Some(distance), Some(raw_unit)) = (step.step_distance, step.distance_unit.as_deref())
    else {
        return Err(Error::InvalidDistance(step.display_name().to_string()));
    };

    let unit = tables::distance_unit(raw_unit)?;
    if distance <= 0.0 || !distance.is_finite() {
        return Err(Error::InvalidDistance(step.display_name().to_string()));
    }

    Ok(ResolvedEndCondition {
        end_condition: tables::DISTANCE,
        value: units::distance_to_meters(distance, &unit),
        preferred_unit: Some(unit),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_defaults_to_time() {
        let resolved = resolve_end_condition(&StepSpec::timed("interval", 600.0)).unwrap();
        assert_eq!(resolved.end_condition, tables::TIME);
        assert_eq!(resolved.value, 600.0);
        assert_eq!(resolved.preferred_unit, None);
    }

    #[test]
    fn test_missing_duration() {
        let step = StepSpec {
            step_name: Some("Step Without Duration".into()),
            step_type: Some("interval".into()),
            ..StepSpec::default()
        };
        match resolve_end_condition(&step) {
            Err(Error::InvalidDuration(name)) => assert_eq!(name, "Step Without Duration"),
            other => panic!("Expected InvalidDuration, got {:?}", other),
        }
    }

    #[test]
    fn test_explicit_time_with_non_positive_duration() {
        let mut step = StepSpec::timed("interval", 0.0);
        step.end_condition_type = Some("time".into());
        assert!(matches!(
            resolve_end_condition(&step),
            Err(Error::InvalidDuration(_))
        ));

        step.step_duration = Some(-30.0);
        assert!(matches!(
            resolve_end_condition(&step),
            Err(Error::InvalidDuration(_))
        ));
    }

    #[test]
    fn test_distance_in_km_and_miles() {
        let km = resolve_end_condition(&StepSpec::distance("warmup", 1.0, "km")).unwrap();
        assert_eq!(km.end_condition, tables::DISTANCE);
        assert_eq!(km.value, 1000.0);
        assert_eq!(km.preferred_unit.unwrap().unit_key, "km");

        let mile = resolve_end_condition(&StepSpec::distance("interval", 1.0, "mile")).unwrap();
        assert_eq!(mile.value, 1609.344);
        assert_eq!(mile.preferred_unit.unwrap().unit_id, 4);
    }

    #[test]
    fn test_distance_wins_over_duration_when_explicit() {
        let mut step = StepSpec::distance("interval", 400.0, "m");
        step.step_duration = Some(90.0);
        let resolved = resolve_end_condition(&step).unwrap();
        assert_eq!(resolved.end_condition, tables::DISTANCE);
        assert_eq!(resolved.value, 400.0);
    }

    #[test]
    fn test_invalid_distance_unit() {
        let step = StepSpec::distance("interval", 5.0, "invalid_unit");
        match resolve_end_condition(&step) {
            Err(Error::UnsupportedDistanceUnit(raw)) => assert_eq!(raw, "invalid_unit"),
            other => panic!("Expected UnsupportedDistanceUnit, got {:?}", other),
        }
    }

    #[test]
    fn test_distance_without_unit() {
        let mut step = StepSpec::distance("interval", 5.0, "km");
        step.distance_unit = None;
        assert!(matches!(
            resolve_end_condition(&step),
            Err(Error::InvalidDistance(_))
        ));
    }

    #[test]
    fn test_unsupported_end_condition_types() {
        for kind in ["calories", "lap.button", "repeat"] {
            let mut step = StepSpec::timed("interval", 60.0);
            step.end_condition_type = Some(kind.into());
            match resolve_end_condition(&step) {
                Err(Error::UnsupportedEndConditionType(raw)) => assert_eq!(raw, kind),
                other => panic!("Expected UnsupportedEndConditionType, got {:?}", other),
            }
        }
    }
}
