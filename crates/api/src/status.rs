//! The HTTP statuses error responses are rendered with.

use serde::{Deserialize, Serialize};

/// Response status with its numeric code and reason phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpStatus {
    /// 202
    Accepted,
    /// 400
    BadRequest,
    /// 401
    Unauthorized,
    /// 403
    Forbidden,
    /// 404
    NotFound,
    /// 405
    MethodNotAllowed,
    /// 409
    Conflict,
    /// 415
    UnsupportedMediaType,
    /// 429
    TooManyRequests,
    /// 500
    InternalServerError,
    /// 502
    BadGateway,
    /// 504
    GatewayTimeout,
}

impl HttpStatus {
    /// Numeric status code.
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::Accepted => 202,
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::MethodNotAllowed => 405,
            Self::Conflict => 409,
            Self::UnsupportedMediaType => 415,
            Self::TooManyRequests => 429,
            Self::InternalServerError => 500,
            Self::BadGateway => 502,
            Self::GatewayTimeout => 504,
        }
    }

    /// Canonical reason phrase.
    #[must_use]
    pub const fn reason_phrase(self) -> &'static str {
        match self {
            Self::Accepted => "Accepted",
            Self::BadRequest => "Bad Request",
            Self::Unauthorized => "Unauthorized",
            Self::Forbidden => "Forbidden",
            Self::NotFound => "Not Found",
            Self::MethodNotAllowed => "Method Not Allowed",
            Self::Conflict => "Conflict",
            Self::UnsupportedMediaType => "Unsupported Media Type",
            Self::TooManyRequests => "Too Many Requests",
            Self::InternalServerError => "Internal Server Error",
            Self::BadGateway => "Bad Gateway",
            Self::GatewayTimeout => "Gateway Timeout",
        }
    }

    /// 4xx statuses.
    #[must_use]
    pub const fn is_client_error(self) -> bool {
        matches!(self.code(), 400..=499)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_and_phrases_line_up() {
        assert_eq!(HttpStatus::BadRequest.code(), 400);
        assert_eq!(HttpStatus::BadRequest.reason_phrase(), "Bad Request");
        assert_eq!(HttpStatus::GatewayTimeout.code(), 504);
        assert!(HttpStatus::TooManyRequests.is_client_error());
        assert!(!HttpStatus::BadGateway.is_client_error());
    }
}
