//! Validation traits for request DTOs.
//!
//! `#[derive(Validate)]` (from `fleen-base-validate-derive`) expands field and
//! container attributes into calls against these traits. Every rule runs; the
//! caller receives all violations in declaration order.

use crate::invariants::Validated;

/// Trait for validation errors used by `Validate`.
pub trait ValidationError: Sized {
    /// A required field was empty.
    fn empty(field: &'static str) -> Self;

    /// A field value is invalid for a specific reason.
    fn invalid(field: &'static str, message: impl Into<String>) -> Self;

    /// A numeric field is outside the allowed range.
    fn out_of_range(field: &'static str, value: String, min: String, max: String) -> Self;
}

/// Validate a DTO using compile-time derived rules.
pub trait Validate {
    /// Error type returned by validation.
    type Error: ValidationError;

    /// Validate the DTO, returning every violation found.
    fn validate(&self) -> Result<(), Vec<Self::Error>>;

    /// Validate and wrap the DTO in a `Validated` proof.
    fn into_validated(self) -> Result<Validated<Self>, Vec<Self::Error>>
    where
        Self: Sized,
    {
        self.validate()?;
        Ok(Validated::new(self))
    }
}
