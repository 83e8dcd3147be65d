//! Secret detection and redaction utilities.
//!
//! Keys are matched by naming convention so env vars, config fields and
//! error metadata share one rule.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The redacted placeholder string.
pub const REDACTED: &str = "[REDACTED]";

/// Checks if a key/variable name likely refers to a secret.
///
/// # Examples
///
/// ```
/// use fleen_base_shared::is_secret_key;
///
/// assert!(is_secret_key("FLEEN_SECURITY_FIELD_ENCRYPTION_KEY"));
/// assert!(is_secret_key("password"));
/// assert!(is_secret_key("Authorization"));
/// assert!(!is_secret_key("FLEEN_PAGING_DEFAULT_PAGE_SIZE"));
/// ```
pub fn is_secret_key(key: &str) -> bool {
    let key = key.to_ascii_uppercase();
    key.contains("KEY")
        || key.contains("TOKEN")
        || key.contains("SECRET")
        || key.contains("PASSWORD")
        || key.contains("CREDENTIAL")
        || key.contains("AUTH")
        || key.contains("BEARER")
}

/// Redacts a value if the key is likely a secret.
///
/// ```
/// use fleen_base_shared::redact_if_secret;
///
/// assert_eq!(redact_if_secret("refresh_token", "abc"), "[REDACTED]");
/// assert_eq!(redact_if_secret("page_size", "10"), "10");
/// ```
pub fn redact_if_secret(key: &str, value: &str) -> String {
    if is_secret_key(key) {
        REDACTED.to_string()
    } else {
        value.to_string()
    }
}

/// A secret string wrapper that redacts on Display/Debug/Serialize.
///
/// Deserialization reads the plain value, so secrets can come from config
/// files; serialization always writes [`REDACTED`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SecretString(Box<str>);

impl SecretString {
    /// Wrap a secret value.
    pub fn new(value: impl Into<Box<str>>) -> Self {
        Self(value.into())
    }

    /// Borrow the underlying secret.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// True when the secret is empty after trimming.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(REDACTED)
    }
}

impl std::fmt::Display for SecretString {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(REDACTED)
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self(value.into_boxed_str())
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

impl Serialize for SecretString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(REDACTED)
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn detects_common_secret_patterns() {
        assert!(is_secret_key("FIELD_ENCRYPTION_KEY"));
        assert!(is_secret_key("access_token"));
        assert!(is_secret_key("CLIENT_SECRET"));
        assert!(is_secret_key("DB_PASSWORD"));
        assert!(is_secret_key("credentials"));
        assert!(is_secret_key("authorization"));
        assert!(is_secret_key("bearer"));
    }

    #[test]
    fn rejects_non_secret_patterns() {
        assert!(!is_secret_key("LOG_LEVEL"));
        assert!(!is_secret_key("page_size"));
        assert!(!is_secret_key("BASE_URL"));
        assert!(!is_secret_key("TIMEOUT_MS"));
    }

    #[test]
    fn secret_string_never_prints_its_value() -> Result<(), Box<dyn Error>> {
        let secret = SecretString::new("hunter2");
        assert_eq!(secret.to_string(), REDACTED);
        assert_eq!(format!("{secret:?}"), REDACTED);
        assert_eq!(serde_json::to_string(&secret)?, "\"[REDACTED]\"");
        assert_eq!(secret.expose(), "hunter2");
        Ok(())
    }

    #[test]
    fn secret_string_deserializes_plain_values() -> Result<(), Box<dyn Error>> {
        let secret: SecretString = serde_json::from_str("\"  \"")?;
        assert!(secret.is_blank());

        let secret: SecretString = serde_json::from_str("\"k3y\"")?;
        assert_eq!(secret.expose(), "k3y");
        Ok(())
    }
}
