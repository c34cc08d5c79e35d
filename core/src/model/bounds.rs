#![deny(missing_docs)]

//! # Numeric Bounds
//!
//! Consolidates `minimum` / `maximum` with `exclusiveMinimum` / `exclusiveMaximum`
//! across both OpenAPI encodings:
//!
//! - 3.0: the exclusive keywords are flags marking the inclusive bound exclusive.
//!   A flag without a matching inclusive bound has nothing to exclude.
//! - 3.1: the exclusive keywords are standalone values. Next to an inclusive bound
//!   the tighter of the two wins; on a tie the exclusive one wins.

use crate::error::{AppError, AppResult};
use crate::model::location::Location;
use crate::oas::shims::{BoolOrNumber, ShimSchema};

/// Effective numeric bounds of a schema.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct NumericBounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub excl_min: bool,
    pub excl_max: bool,
}

/// Which side of the range a bound limits.
#[derive(Clone, Copy)]
enum Side {
    Lower,
    Upper,
}

impl Side {
    /// Whether `candidate` is at least as tight as `current`.
    fn tightens(self, candidate: f64, current: f64) -> bool {
        match self {
            Side::Lower => candidate >= current,
            Side::Upper => candidate <= current,
        }
    }
}

/// Resolves one side: returns the effective bound and its exclusivity.
fn resolve(
    side: Side,
    inclusive: Option<f64>,
    exclusive: Option<BoolOrNumber>,
) -> (Option<f64>, bool) {
    match (inclusive, exclusive) {
        (bound, None) | (bound, Some(BoolOrNumber::Flag(false))) => (bound, false),
        (None, Some(BoolOrNumber::Flag(true))) => (None, false),
        (Some(bound), Some(BoolOrNumber::Flag(true))) => (Some(bound), true),
        (None, Some(BoolOrNumber::Value(excl))) => (Some(excl), true),
        (Some(bound), Some(BoolOrNumber::Value(excl))) => {
            if side.tightens(excl, bound) {
                (Some(excl), true)
            } else {
                (Some(bound), false)
            }
        }
    }
}

/// Computes the effective bounds of a numeric schema.
pub(crate) fn numeric_bounds(schema: &ShimSchema) -> NumericBounds {
    let (max, excl_max) = resolve(Side::Upper, schema.maximum, schema.exclusive_maximum);
    let (min, excl_min) = resolve(Side::Lower, schema.minimum, schema.exclusive_minimum);
    NumericBounds {
        min,
        max,
        excl_min,
        excl_max,
    }
}

/// Converts a bound of an integer schema, rejecting fractional values.
pub(crate) fn integral(value: Option<f64>, l: &Location, keyword: &str) -> AppResult<Option<i64>> {
    match value {
        None => Ok(None),
        Some(v) if v.is_finite() && v.trunc() == v => Ok(Some(v as i64)),
        Some(_) => Err(AppError::NonIntegral {
            location: l.to_string(),
            keyword: keyword.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(yaml: &str) -> NumericBounds {
        let schema: ShimSchema = serde_yaml::from_str(yaml).unwrap();
        numeric_bounds(&schema)
    }

    #[test]
    fn test_plain_inclusive_bounds() {
        let b = bounds("type: integer\nminimum: 1\nmaximum: 10");
        assert_eq!(b.min, Some(1.0));
        assert_eq!(b.max, Some(10.0));
        assert!(!b.excl_min && !b.excl_max);
    }

    #[test]
    fn test_v31_tie_favors_exclusive() {
        let b = bounds("type: integer\nmaximum: 10\nexclusiveMaximum: 10");
        assert_eq!(b.max, Some(10.0));
        assert!(b.excl_max);
    }

    #[test]
    fn test_v31_looser_exclusive_is_ignored() {
        let b = bounds("type: integer\nmaximum: 10\nexclusiveMaximum: 15");
        assert_eq!(b.max, Some(10.0));
        assert!(!b.excl_max);

        let b = bounds("type: integer\nminimum: 5\nexclusiveMinimum: 2");
        assert_eq!(b.min, Some(5.0));
        assert!(!b.excl_min);
    }

    #[test]
    fn test_v31_tighter_exclusive_wins() {
        let b = bounds("type: number\nmaximum: 10\nexclusiveMaximum: 7.5");
        assert_eq!(b.max, Some(7.5));
        assert!(b.excl_max);

        let b = bounds("type: number\nminimum: 0\nexclusiveMinimum: 0.5");
        assert_eq!(b.min, Some(0.5));
        assert!(b.excl_min);
    }

    #[test]
    fn test_v31_standalone_exclusive() {
        let b = bounds("type: integer\nexclusiveMinimum: 0");
        assert_eq!(b.min, Some(0.0));
        assert!(b.excl_min);
        assert_eq!(b.max, None);
    }

    #[test]
    fn test_v30_flag_marks_inclusive_bound() {
        let b = bounds("type: integer\nminimum: 0\nexclusiveMinimum: true");
        assert_eq!(b.min, Some(0.0));
        assert!(b.excl_min);
    }

    #[test]
    fn test_v30_flag_without_bound_has_no_effect() {
        let b = bounds("type: integer\nexclusiveMaximum: true");
        assert_eq!(b, NumericBounds::default());

        let b = bounds("type: integer\nmaximum: 3\nexclusiveMaximum: false");
        assert_eq!(b.max, Some(3.0));
        assert!(!b.excl_max);
    }

    #[test]
    fn test_integral_rejects_fractions() {
        let l = Location::new("Count");
        assert_eq!(integral(Some(10.0), &l, "maximum").unwrap(), Some(10));
        assert_eq!(integral(None, &l, "maximum").unwrap(), None);

        let err = integral(Some(10.5), &l, "maximum or exclusiveMaximum").unwrap_err();
        assert!(matches!(err, AppError::NonIntegral { .. }));
        assert_eq!(
            err.to_string(),
            "schema Count has a maximum or exclusiveMaximum that is not an integer"
        );
    }
}
