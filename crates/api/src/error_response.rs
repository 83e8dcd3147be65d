//! The error body returned to clients.

use crate::messages;
use crate::status::HttpStatus;
use chrono::{Local, NaiveDateTime, Timelike};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Category of a failed request. Only validation failures are tagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorType {
    /// One or more request fields failed validation.
    DataValidation,
}

/// One failed field in an [`ErrorResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldError {
    /// Wire name of the field.
    pub field: String,
    /// Why it failed.
    pub message: String,
}

impl FieldError {
    /// Build a field entry.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Error body: message, status, timestamp and optional field details.
///
/// Absent values are omitted from the JSON; the timestamp renders as
/// `yyyy-MM-ddTHH:mm:ss`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub message: String,
    /// Numeric HTTP status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Local time the response was built.
    #[serde(with = "timestamp_format")]
    #[schemars(with = "String")]
    pub timestamp: NaiveDateTime,
    /// Reason phrase of the status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Set for validation failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<ErrorType>,
    /// Per-field failures, in the order they were found.
    #[serde(default, rename = "fields", skip_serializing_if = "Vec::is_empty")]
    pub field_errors: Vec<FieldError>,
}

impl ErrorResponse {
    /// Bare response with the default message and no status.
    #[must_use]
    pub fn new() -> Self {
        Self {
            message: messages::DEFAULT_MESSAGE.to_string(),
            status: None,
            timestamp: now(),
            reason: None,
            error_type: None,
            field_errors: Vec::new(),
        }
    }

    /// Response carrying `message` and `status`.
    ///
    /// ```
    /// use fleen_base_api::{ErrorResponse, HttpStatus};
    ///
    /// let response = ErrorResponse::of("Invalid User", HttpStatus::Forbidden);
    /// assert_eq!(response.status, Some(403));
    /// assert_eq!(response.reason.as_deref(), Some("Forbidden"));
    /// ```
    pub fn of(message: impl Into<String>, status: HttpStatus) -> Self {
        Self {
            message: message.into(),
            status: Some(status.code()),
            reason: Some(status.reason_phrase().to_string()),
            ..Self::new()
        }
    }

    /// Validation failure response; tags the body as [`ErrorType::DataValidation`].
    pub fn of_fields(
        message: impl Into<String>,
        status: HttpStatus,
        field_errors: Vec<FieldError>,
    ) -> Self {
        Self {
            error_type: Some(ErrorType::DataValidation),
            field_errors,
            ..Self::of(message, status)
        }
    }

    /// Replace the timestamp.
    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = timestamp;
        self
    }
}

impl Default for ErrorResponse {
    fn default() -> Self {
        Self::new()
    }
}

fn now() -> NaiveDateTime {
    Local::now()
        .naive_local()
        .with_nanosecond(0)
        .unwrap_or_else(|| Local::now().naive_local())
}

mod timestamp_format {
    use chrono::NaiveDateTime;
    use fleen_base_shared::datetime::formats;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(formats::DATE_TIME))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, formats::DATE_TIME).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;
    use std::error::Error;

    fn fixed_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 29)
            .and_then(|date| date.and_hms_opt(13, 45, 7))
            .unwrap_or_default()
    }

    #[test]
    fn bare_response_omits_absent_fields() -> Result<(), Box<dyn Error>> {
        let response = ErrorResponse::new().with_timestamp(fixed_time());
        assert_eq!(
            serde_json::to_value(&response)?,
            json!({"message": "An error has occurred", "timestamp": "2024-02-29T13:45:07"})
        );
        Ok(())
    }

    #[test]
    fn field_response_is_tagged() -> Result<(), Box<dyn Error>> {
        let response = ErrorResponse::of_fields(
            messages::INVALID_ARGUMENTS,
            HttpStatus::BadRequest,
            vec![
                FieldError::new("emailAddress", "Invalid email address format."),
                FieldError::new("password", "Password does not meet requirement."),
            ],
        )
        .with_timestamp(fixed_time());

        assert_eq!(
            serde_json::to_value(&response)?,
            json!({
                "message": "Invalid Arguments",
                "status": 400,
                "timestamp": "2024-02-29T13:45:07",
                "reason": "Bad Request",
                "error_type": "DATA_VALIDATION",
                "fields": [
                    {"field": "emailAddress", "message": "Invalid email address format."},
                    {"field": "password", "message": "Password does not meet requirement."}
                ]
            })
        );
        Ok(())
    }

    #[test]
    fn timestamp_parses_back() -> Result<(), Box<dyn Error>> {
        let parsed: ErrorResponse = serde_json::from_str(
            r#"{"message":"Invalid User","status":403,"timestamp":"2024-02-29T13:45:07"}"#,
        )?;
        assert_eq!(parsed.timestamp, fixed_time());
        assert!(parsed.field_errors.is_empty());
        Ok(())
    }

    #[test]
    fn new_response_drops_sub_second_precision() {
        assert_eq!(ErrorResponse::new().timestamp.nanosecond(), 0);
    }
}
