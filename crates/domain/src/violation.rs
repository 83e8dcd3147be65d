//! Field-level validation failures for request value objects.

use fleen_base_shared::{ErrorCode, ErrorEnvelope, ValidationError};
use serde::Serialize;
use std::fmt;

/// One failed rule on one request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Wire name of the field (e.g. `pageSize`).
    pub field: &'static str,
    /// Human-readable reason.
    pub message: Box<str>,
}

impl ValidationError for FieldViolation {
    fn empty(field: &'static str) -> Self {
        Self {
            field,
            message: "must not be empty".into(),
        }
    }

    fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into().into_boxed_str(),
        }
    }

    fn out_of_range(field: &'static str, value: String, min: String, max: String) -> Self {
        Self {
            field,
            message: format!("must be between {min} and {max} (got {value})").into_boxed_str(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for FieldViolation {}

/// Prefix of the metadata keys that carry field violations.
pub const FIELD_METADATA_PREFIX: &str = "field.";

/// Metadata key for the violation at `index` on `field`: `field.<index>.<field>`.
///
/// The index keeps repeated fields apart and preserves violation order.
pub fn field_metadata_key(index: usize, field: &str) -> String {
    format!("{FIELD_METADATA_PREFIX}{index}.{field}")
}

/// Fold violations into one `core:invalid_arguments` envelope.
///
/// Each violation becomes a [`field_metadata_key`] entry; the first one also
/// supplies the message.
pub fn violations_to_envelope(violations: &[FieldViolation]) -> ErrorEnvelope {
    let message = violations
        .first()
        .map_or_else(|| "invalid arguments".to_string(), ToString::to_string);
    violations.iter().enumerate().fold(
        ErrorEnvelope::expected(ErrorCode::invalid_arguments(), message),
        |envelope, (index, violation)| {
            envelope.with_metadata(
                field_metadata_key(index, violation.field),
                violation.message.to_string(),
            )
        },
    )
}

/// `(field, message)` pairs recorded by [`violations_to_envelope`], in
/// violation order. Keys without a numeric index are skipped.
///
/// ```
/// use fleen_base_domain::{FieldViolation, field_violations, violations_to_envelope};
/// use fleen_base_shared::ValidationError;
///
/// let envelope = violations_to_envelope(&[
///     FieldViolation::empty("title"),
///     FieldViolation::invalid("email", "Invalid email address format."),
/// ]);
/// let fields: Vec<&str> = field_violations(&envelope).into_iter().map(|(f, _)| f).collect();
/// assert_eq!(fields, ["title", "email"]);
/// ```
pub fn field_violations(envelope: &ErrorEnvelope) -> Vec<(&str, &str)> {
    let mut entries: Vec<(usize, &str, &str)> = envelope
        .metadata
        .iter()
        .filter_map(|(key, message)| {
            let (index, field) = key.strip_prefix(FIELD_METADATA_PREFIX)?.split_once('.')?;
            let index = index.parse::<usize>().ok()?;
            Some((index, field, message.as_str()))
        })
        .collect();
    entries.sort_by_key(|(index, _, _)| *index);
    entries
        .into_iter()
        .map(|(_, field, message)| (field, message))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn violations_fold_into_metadata() {
        let violations = vec![
            FieldViolation::invalid("pageSize", "must be >= 1"),
            FieldViolation::out_of_range("latitude", "91".into(), "-90".into(), "90".into()),
        ];
        let envelope = violations_to_envelope(&violations);
        assert_eq!(envelope.code, ErrorCode::invalid_arguments());
        assert_eq!(envelope.message, "pageSize: must be >= 1");
        assert_eq!(
            envelope.metadata.get("field.1.latitude").map(String::as_str),
            Some("must be between -90 and 90 (got 91)")
        );
    }

    #[test]
    fn repeated_fields_survive_in_order() {
        let envelope = violations_to_envelope(&[
            FieldViolation::invalid("title", "too long"),
            FieldViolation::invalid("password", "Password does not meet requirement."),
            FieldViolation::invalid("email", "Invalid email address format."),
            FieldViolation::empty("email"),
        ]);
        assert_eq!(
            field_violations(&envelope),
            vec![
                ("title", "too long"),
                ("password", "Password does not meet requirement."),
                ("email", "Invalid email address format."),
                ("email", "must not be empty"),
            ]
        );
    }

    #[test]
    fn unindexed_field_keys_are_ignored() {
        let envelope = ErrorEnvelope::expected(ErrorCode::invalid_arguments(), "bad")
            .with_metadata("field.title", "legacy")
            .with_metadata(field_metadata_key(0, "q"), "too short");
        assert_eq!(field_violations(&envelope), vec![("q", "too short")]);
    }
}
