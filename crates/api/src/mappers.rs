//! Mapping from internal failures to [`ErrorResponse`] bodies.

use crate::error_response::{ErrorResponse, FieldError};
use crate::messages;
use crate::status::HttpStatus;
use fleen_base_domain::{FieldViolation, field_violations};
use fleen_base_shared::{ErrorCode, ErrorEnvelope, ErrorKind};

/// Status a failure is reported with.
///
/// Known core codes map directly; any other expected failure is the caller's
/// fault (400); everything else is a server error (500).
#[must_use]
pub fn status_for_error(envelope: &ErrorEnvelope) -> HttpStatus {
    let code = &envelope.code;
    if *code == ErrorCode::invalid_input() || *code == ErrorCode::invalid_arguments() {
        HttpStatus::BadRequest
    } else if *code == ErrorCode::not_found() {
        HttpStatus::NotFound
    } else if *code == ErrorCode::permission_denied() {
        HttpStatus::Forbidden
    } else if *code == ErrorCode::method_not_allowed() {
        HttpStatus::MethodNotAllowed
    } else if *code == ErrorCode::unsupported_media_type() {
        HttpStatus::UnsupportedMediaType
    } else if *code == ErrorCode::timeout() {
        HttpStatus::GatewayTimeout
    } else if *code == ErrorCode::rate_limited() {
        HttpStatus::TooManyRequests
    } else if envelope.kind == ErrorKind::Expected {
        HttpStatus::BadRequest
    } else {
        HttpStatus::InternalServerError
    }
}

/// Render an envelope as an error body.
///
/// Recorded field violations become field entries in violation order. They
/// carry rule messages, never submitted values, so they are not redacted.
/// Messages of server errors are replaced by the stock message.
#[must_use]
pub fn error_envelope_to_response(envelope: &ErrorEnvelope) -> ErrorResponse {
    let status = status_for_error(envelope);
    let message = if status.is_client_error() {
        envelope.message.clone()
    } else {
        messages::DEFAULT_MESSAGE.to_string()
    };

    let field_errors: Vec<FieldError> = field_violations(envelope)
        .into_iter()
        .map(|(field, message)| FieldError::new(field, message))
        .collect();

    if field_errors.is_empty() {
        ErrorResponse::of(message, status)
    } else {
        ErrorResponse::of_fields(message, status, field_errors)
    }
}

/// Render validation failures as a 400 body, one field entry per violation.
///
/// ```
/// use fleen_base_api::violations_to_error_response;
/// use fleen_base_domain::FieldViolation;
/// use fleen_base_shared::ValidationError;
///
/// let response = violations_to_error_response(&[FieldViolation::empty("title")]);
/// assert_eq!(response.status, Some(400));
/// assert_eq!(response.message, "Invalid Arguments");
/// assert_eq!(response.field_errors.len(), 1);
/// ```
#[must_use]
pub fn violations_to_error_response(violations: &[FieldViolation]) -> ErrorResponse {
    let field_errors = violations
        .iter()
        .map(|violation| FieldError::new(violation.field, &*violation.message))
        .collect();
    ErrorResponse::of_fields(
        messages::INVALID_ARGUMENTS,
        HttpStatus::BadRequest,
        field_errors,
    )
}

/// Map a result's error side into an error body.
pub fn result_to_response<T>(result: Result<T, ErrorEnvelope>) -> Result<T, ErrorResponse> {
    result.map_err(|error| error_envelope_to_response(&error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_response::ErrorType;
    use fleen_base_domain::violations_to_envelope;
    use fleen_base_shared::{ErrorClass, ValidationError};

    #[test]
    fn core_codes_map_to_statuses() {
        let cases = [
            (ErrorCode::invalid_input(), 400),
            (ErrorCode::not_found(), 404),
            (ErrorCode::permission_denied(), 403),
            (ErrorCode::timeout(), 504),
            (ErrorCode::rate_limited(), 429),
            (ErrorCode::method_not_allowed(), 405),
            (ErrorCode::unsupported_media_type(), 415),
        ];
        for (code, expected) in cases {
            let envelope = ErrorEnvelope::expected(code, "boom");
            assert_eq!(status_for_error(&envelope).code(), expected);
        }
    }

    #[test]
    fn unexpected_errors_hide_their_message() {
        let envelope = ErrorEnvelope::unexpected(
            ErrorCode::io(),
            "disk /var/lib/fleen is full",
            ErrorClass::Retriable,
        );
        let response = error_envelope_to_response(&envelope);
        assert_eq!(response.status, Some(500));
        assert_eq!(response.message, "An error has occurred");
    }

    #[test]
    fn other_expected_errors_are_bad_requests() {
        let envelope =
            ErrorEnvelope::expected(ErrorCode::new("domain", "invalid_page_size"), "bad size");
        let response = error_envelope_to_response(&envelope);
        assert_eq!(response.status, Some(400));
        assert_eq!(response.message, "bad size");
        assert!(response.error_type.is_none());
    }

    #[test]
    fn field_metadata_becomes_field_errors() {
        let violations = [
            FieldViolation::invalid("title", "too long"),
            FieldViolation::invalid("password", "Password does not meet requirement."),
            FieldViolation::invalid("email", "Invalid email address format."),
            FieldViolation::empty("email"),
        ];
        let envelope = violations_to_envelope(&violations).with_metadata("requestId", "abc");
        let response = error_envelope_to_response(&envelope);

        assert_eq!(response.error_type, Some(ErrorType::DataValidation));
        assert_eq!(response.message, "title: too long");
        assert_eq!(
            response.field_errors,
            vec![
                FieldError::new("title", "too long"),
                FieldError::new("password", "Password does not meet requirement."),
                FieldError::new("email", "Invalid email address format."),
                FieldError::new("email", "must not be empty"),
            ]
        );
        assert_eq!(
            response.field_errors,
            violations_to_error_response(&violations).field_errors
        );
    }

    #[test]
    fn violations_keep_their_order() {
        let response = violations_to_error_response(&[
            FieldViolation::invalid("startDate", "Start date should  be before or equal to end date"),
            FieldViolation::empty("title"),
        ]);
        let fields: Vec<&str> = response
            .field_errors
            .iter()
            .map(|entry| entry.field.as_str())
            .collect();
        assert_eq!(fields, vec!["startDate", "title"]);
    }

    #[test]
    fn results_map_only_errors() {
        assert_eq!(result_to_response(Ok::<_, ErrorEnvelope>(3)).ok(), Some(3));
        let mapped = result_to_response::<u8>(Err(ErrorEnvelope::expected(
            ErrorCode::not_found(),
            "no such video",
        )));
        assert!(matches!(mapped, Err(ref response) if response.status == Some(404)));
    }
}
