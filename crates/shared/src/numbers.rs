//! Numeric string checks and counters.

pub use crate::validators::{is_boolean, is_valid_number};

/// Increment a counter, starting at `1.0` when unset.
///
/// ```
/// use fleen_base_shared::numbers::increment_or_one;
///
/// assert_eq!(increment_or_one(None), 1.0);
/// assert_eq!(increment_or_one(Some(2.5)), 3.5);
/// ```
pub fn increment_or_one(value: Option<f64>) -> f64 {
    value.map_or(1.0, |current| current + 1.0)
}

/// True when every value is present; strings must also be non-blank.
pub fn are_all_present(values: &[Option<&str>]) -> bool {
    !values.is_empty()
        && values
            .iter()
            .all(|value| value.is_some_and(|text| !text.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increment_starts_at_one() {
        assert!((increment_or_one(None) - 1.0).abs() < f64::EPSILON);
        assert!((increment_or_one(Some(-1.0))).abs() < f64::EPSILON);
    }

    #[test]
    fn all_present_rejects_blank_and_empty_inputs() {
        assert!(are_all_present(&[Some("a"), Some("b")]));
        assert!(!are_all_present(&[Some("a"), Some("  ")]));
        assert!(!are_all_present(&[Some("a"), None]));
        assert!(!are_all_present(&[]));
    }
}
