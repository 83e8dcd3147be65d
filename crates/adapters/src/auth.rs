//! `Authorization` header values.

use fleen_base_shared::{ErrorCode, ErrorEnvelope};
use std::fmt;

/// Prefix of bearer credentials.
pub const BEARER_PREFIX: &str = "Bearer ";
/// Prefix of basic credentials.
pub const BASIC_PREFIX: &str = "Basic ";

/// Header value did not start with [`BEARER_PREFIX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BearerTokenError;

impl fmt::Display for BearerTokenError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Token is not a bearer token!")
    }
}

impl std::error::Error for BearerTokenError {}

impl From<BearerTokenError> for ErrorEnvelope {
    fn from(error: BearerTokenError) -> Self {
        Self::expected(ErrorCode::new("security", "not_bearer_token"), error.to_string())
    }
}

/// `Bearer <token>`.
#[must_use]
pub fn bearer_token(token: &str) -> String {
    format!("{BEARER_PREFIX}{token}")
}

/// Header value carries bearer credentials.
#[must_use]
pub fn is_bearer_token(value: &str) -> bool {
    value.starts_with(BEARER_PREFIX)
}

/// Token without its `Bearer ` prefix.
///
/// ```
/// use fleen_base_adapters::auth::strip_bearer_token;
///
/// assert_eq!(strip_bearer_token("Bearer abc.def"), Ok("abc.def"));
/// assert!(strip_bearer_token("Basic dXNlcg==").is_err());
/// ```
pub fn strip_bearer_token(value: &str) -> Result<&str, BearerTokenError> {
    value.strip_prefix(BEARER_PREFIX).ok_or_else(|| {
        tracing::error!("token is not a bearer token");
        BearerTokenError
    })
}
