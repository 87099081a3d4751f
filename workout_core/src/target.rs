//! Target resolution for leaf steps.
//!
//! Turns an optional `TargetSpec` into the wire triple
//! `targetType` / `targetValueOne` / `targetValueTwo`.

use crate::tables::{self, NO_TARGET};
use crate::units::{self, MIN_PER_KM};
use crate::{Error, Result, ServerComputedUnit, TargetSpec, TargetType, TargetValue};

/// A target ready to be placed on an executable step
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedTarget {
    pub target_type: TargetType,
    /// Converted from the input's low bound
    pub value_one: Option<f64>,
    /// Converted from the input's high bound
    pub value_two: Option<f64>,
    /// `Some` for every target except "no target"
    pub value_unit: Option<ServerComputedUnit>,
}

impl ResolvedTarget {
    fn no_target() -> Self {
        Self {
            target_type: tables::no_target(),
            value_one: None,
            value_two: None,
            value_unit: None,
        }
    }
}

/// Resolve a step's target
///
/// Bounds keep their input order through conversion. For pace targets the
/// conversion is decreasing, so `value_one` may end up larger than
/// `value_two`; that ordering is sent as is.
pub fn resolve_target(target: Option<&TargetSpec>) -> Result<ResolvedTarget> {
    let Some(target) = target else {
        return Ok(ResolvedTarget::no_target());
    };

    let key = target.kind.to_lowercase();
    let target_type = tables::target_type(&target.kind)?;
    if key == NO_TARGET {
        return Ok(ResolvedTarget::no_target());
    }

    let (value_one, value_two) = match target.value {
        Some(value) => {
            let (low, high) = converted_bounds(value, &key, target.unit.as_deref())?;
            (Some(low), Some(high))
        }
        None => (None, None),
    };

    Ok(ResolvedTarget {
        target_type,
        value_one,
        value_two,
        value_unit: Some(ServerComputedUnit),
    })
}

fn converted_bounds(value: TargetValue, key: &str, unit: Option<&str>) -> Result<(f64, f64)> {
    let (low, high) = match value {
        TargetValue::Range(low, high) => (low, high),
        TargetValue::Single(single) => units::synthesize_range(single, key),
    };

    if unit == Some(MIN_PER_KM) && (low <= 0.0 || high <= 0.0) {
        return Err(Error::InvalidTargetValue(format!(
            "{} pace bounds must be positive, got [{}, {}]",
            key, low, high
        )));
    }

    let converted = (
        units::convert_target_value(low, unit),
        units::convert_target_value(high, unit),
    );
    if !converted.0.is_finite() || !converted.1.is_finite() {
        return Err(Error::InvalidTargetValue(format!(
            "{} target [{}, {}] is not a finite value",
            key, low, high
        )));
    }

    Ok(converted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_absent_target_is_no_target() {
        let resolved = resolve_target(None).unwrap();
        assert_eq!(resolved.target_type.workout_target_type_key, "no.target");
        assert_eq!(resolved.value_one, None);
        assert_eq!(resolved.value_unit, None);
    }

    #[test]
    fn test_explicit_no_target_omits_unit() {
        let resolved = resolve_target(Some(&TargetSpec::none())).unwrap();
        assert_eq!(resolved.target_type.workout_target_type_id, 1);
        assert_eq!(resolved.value_unit, None);
    }

    #[test]
    fn test_pace_range_keeps_input_order() {
        let target = TargetSpec::range("pace", 5.0, 6.0, Some("min_per_km"));
        let resolved = resolve_target(Some(&target)).unwrap();

        assert_eq!(resolved.target_type.workout_target_type_key, "pace.zone");
        assert_eq!(resolved.value_one, Some(3.3333333333333335));
        assert_eq!(resolved.value_two, Some(2.7777777777777777));
        assert_eq!(resolved.value_unit, Some(ServerComputedUnit));
    }

    #[test]
    fn test_single_pace_value_is_widened() {
        let target = TargetSpec::single("pace", 6.5, Some("min_per_km"));
        let resolved = resolve_target(Some(&target)).unwrap();

        assert!(approx(resolved.value_one.unwrap(), 2.6315789473684212));
        assert_eq!(resolved.value_two, Some(2.5));
    }

    #[test]
    fn test_single_generic_value_is_widened() {
        let target = TargetSpec::single("heart rate", 140.0, Some("bpm"));
        let resolved = resolve_target(Some(&target)).unwrap();

        assert!(approx(resolved.value_one.unwrap(), 133.0));
        assert!(approx(resolved.value_two.unwrap(), 147.0));
    }

    #[test]
    fn test_type_without_value() {
        let target = TargetSpec {
            kind: "Power".into(),
            value: None,
            unit: None,
        };
        let resolved = resolve_target(Some(&target)).unwrap();

        assert_eq!(resolved.target_type.workout_target_type_key, "power.zone");
        assert_eq!(resolved.value_one, None);
        assert_eq!(resolved.value_two, None);
        assert_eq!(resolved.value_unit, Some(ServerComputedUnit));
    }

    #[test]
    fn test_unknown_target_type() {
        let target = TargetSpec::range("unknown_target", 100.0, 200.0, None);
        match resolve_target(Some(&target)) {
            Err(Error::UnsupportedTargetType(raw)) => assert_eq!(raw, "unknown_target"),
            other => panic!("Expected UnsupportedTargetType, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_pace_is_rejected() {
        let target = TargetSpec::range("pace", 0.0, 5.0, Some("min_per_km"));
        assert!(matches!(
            resolve_target(Some(&target)),
            Err(Error::InvalidTargetValue(_))
        ));
    }
}
