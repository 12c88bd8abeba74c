//! Structural equality over [`Value`] trees with float tolerance.

use crate::core::{Record, Value};
use std::collections::BTreeMap;

/// Compare two values structurally.
///
/// Kinds must match at every level, so a sequence never equals a mapping.
/// Integers and floats are both numbers: two integers compare exactly, while
/// a float against a float or an integer is equal when the values are
/// identical or differ by at most `tolerance`, so JSON `2` matches `2.0`.
/// Two NaNs are treated as equal.
pub fn deep_compare(a: &Value, b: &Value, tolerance: f64) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::Float(x), Value::Float(y)) => floats_match(*x, *y, tolerance),
        (Value::Int(i), Value::Float(x)) | (Value::Float(x), Value::Int(i)) => {
            floats_match(*i as f64, *x, tolerance)
        }
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Sequence(xs), Value::Sequence(ys)) => sequences_match(xs, ys, tolerance),
        (Value::Mapping(xs), Value::Mapping(ys)) => mappings_match(xs, ys, tolerance),
        (Value::Record(x), Value::Record(y)) => records_match(x, y, tolerance),
        _ => false,
    }
}

fn floats_match(x: f64, y: f64, tolerance: f64) -> bool {
    if x.is_nan() || y.is_nan() {
        return x.is_nan() && y.is_nan();
    }
    x == y || (x - y).abs() <= tolerance
}

fn sequences_match(xs: &[Value], ys: &[Value], tolerance: f64) -> bool {
    xs.len() == ys.len()
        && xs
            .iter()
            .zip(ys)
            .all(|(x, y)| deep_compare(x, y, tolerance))
}

// Only keys of `xs` are looked up; the length check covers the rest.
fn mappings_match(
    xs: &BTreeMap<String, Value>,
    ys: &BTreeMap<String, Value>,
    tolerance: f64,
) -> bool {
    xs.len() == ys.len()
        && xs.iter().all(|(key, x)| {
            ys.get(key)
                .is_some_and(|y| deep_compare(x, y, tolerance))
        })
}

fn records_match(x: &Record, y: &Record, tolerance: f64) -> bool {
    x.name == y.name
        && x.fields.len() == y.fields.len()
        && x
            .fields
            .iter()
            .zip(&y.fields)
            .all(|((xn, xv), (yn, yv))| xn == yn && deep_compare(xv, yv, tolerance))
}

/// A comparator bound to one tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparator {
    tolerance: f64,
}

impl Comparator {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Comparator with zero tolerance: floats must be identical.
    pub fn exact() -> Self {
        Self::new(0.0)
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn compare(&self, expected: &Value, actual: &Value) -> bool {
        deep_compare(expected, actual, self.tolerance)
    }
}

impl Default for Comparator {
    fn default() -> Self {
        Self::exact()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_only_equals_null() {
        assert!(deep_compare(&Value::Null, &Value::Null, 0.0));
        assert!(!deep_compare(&Value::Null, &Value::Int(0), 0.0));
        assert!(!deep_compare(&Value::from(""), &Value::Null, 0.0));
    }

    #[test]
    fn int_and_float_compare_as_numbers() {
        assert!(deep_compare(&Value::Int(2), &Value::Float(2.0), 0.0));
        assert!(deep_compare(&Value::Float(3.0000001), &Value::Int(3), 1e-6));
        assert!(!deep_compare(&Value::Int(3), &Value::Float(3.1), 1e-6));
        assert!(!deep_compare(&Value::Int(1), &Value::Float(f64::NAN), 1e9));
    }

    #[test]
    fn integers_ignore_tolerance() {
        assert!(!deep_compare(&Value::Int(1), &Value::Int(2), 5.0));
    }

    #[test]
    fn float_tolerance_is_inclusive() {
        assert!(deep_compare(&Value::Float(1.0), &Value::Float(1.5), 0.5));
        assert!(!deep_compare(&Value::Float(1.0), &Value::Float(1.5000001), 0.5));
    }

    #[test]
    fn infinities_and_nans() {
        let inf = Value::Float(f64::INFINITY);
        assert!(deep_compare(&inf, &inf, 0.0));
        assert!(!deep_compare(&inf, &Value::Float(f64::NEG_INFINITY), 1e-6));
        assert!(deep_compare(&Value::Float(f64::NAN), &Value::Float(f64::NAN), 0.0));
        assert!(!deep_compare(&Value::Float(f64::NAN), &Value::Float(0.0), 1e9));
    }

    #[test]
    fn sequence_order_matters() {
        let a = Value::from(vec![1_i64, 2]);
        let b = Value::from(vec![2_i64, 1]);
        assert!(!deep_compare(&a, &b, 0.0));
        assert!(!deep_compare(&a, &Value::from(vec![1_i64]), 0.0));
    }

    #[test]
    fn records_compare_name_and_fields() {
        let a = Value::record("P", [("x", Value::Float(1.0))]);
        let b = Value::record("P", [("x", Value::Float(1.0 + 1e-9))]);
        let renamed = Value::record("Q", [("x", Value::Float(1.0))]);
        let other_field = Value::record("P", [("y", Value::Float(1.0))]);
        assert!(deep_compare(&a, &b, 1e-6));
        assert!(!deep_compare(&a, &renamed, 1e-6));
        assert!(!deep_compare(&a, &other_field, 1e-6));
    }

    #[test]
    fn comparator_uses_its_tolerance() {
        let c = Comparator::new(1e-3);
        assert!(c.compare(&Value::Float(0.1), &Value::Float(0.1005)));
        assert!(!Comparator::exact().compare(&Value::Float(0.1), &Value::Float(0.1005)));
        assert_eq!(Comparator::default().tolerance(), 0.0);
    }
}
