//! Result alias and guard helpers.
//!
//! The guards take the error as a closure so callers only pay for building it
//! when the check fails.

use crate::errors::ErrorEnvelope;

/// Shared result type used across the workspace.
pub type Result<T, E = ErrorEnvelope> = std::result::Result<T, E>;

/// Fail with `error()` when `value` is absent.
pub fn ensure_present<T, E, F>(value: Option<&T>, error: F) -> Result<(), E>
where
    F: FnOnce() -> E,
{
    match value {
        Some(_) => Ok(()),
        None => Err(error()),
    }
}

/// Fail with `error()` when any of `values` is absent.
pub fn ensure_all_present<'a, T, I, E, F>(values: I, error: F) -> Result<(), E>
where
    T: 'a,
    I: IntoIterator<Item = Option<&'a T>>,
    F: FnOnce() -> E,
{
    if values.into_iter().any(|value| value.is_none()) {
        return Err(error());
    }
    Ok(())
}

/// Fail with `error()` when `condition` holds.
pub fn ensure_true<E, F>(condition: bool, error: F) -> Result<(), E>
where
    F: FnOnce() -> E,
{
    if condition { Err(error()) } else { Ok(()) }
}

/// Fail with `error()` when `condition` does not hold.
pub fn ensure_false<E, F>(condition: bool, error: F) -> Result<(), E>
where
    F: FnOnce() -> E,
{
    if condition { Ok(()) } else { Err(error()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    fn invalid_user() -> ErrorEnvelope {
        ErrorEnvelope::expected(ErrorCode::invalid_input(), "Invalid User")
    }

    #[test]
    fn ensure_present_rejects_absent_values() {
        let present = Some(3);
        assert!(ensure_present(present.as_ref(), invalid_user).is_ok());

        let absent: Option<i32> = None;
        let result = ensure_present(absent.as_ref(), invalid_user);
        assert!(matches!(result, Err(error) if error.message == "Invalid User"));
    }

    #[test]
    fn ensure_all_present_rejects_any_gap() {
        let first = Some("a".to_string());
        let second: Option<String> = None;

        assert!(ensure_all_present([first.as_ref(), first.as_ref()], invalid_user).is_ok());
        assert!(ensure_all_present([first.as_ref(), second.as_ref()], invalid_user).is_err());
        assert!(ensure_all_present(Vec::<Option<&String>>::new(), invalid_user).is_ok());
    }

    #[test]
    fn ensure_true_and_false_are_mirrors() {
        assert!(ensure_true(true, invalid_user).is_err());
        assert!(ensure_true(false, invalid_user).is_ok());
        assert!(ensure_false(false, invalid_user).is_err());
        assert!(ensure_false(true, invalid_user).is_ok());
    }
}
