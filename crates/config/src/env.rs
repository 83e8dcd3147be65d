//! Environment variable parsing and env-to-config merging.
//!
//! Parsing is strict: a variable that is present but empty or malformed fails
//! instead of silently falling back. Secret values never reach error metadata.

use crate::schema::{BaseConfig, LogFormat, ValidatedBaseConfig};
use fleen_base_shared::{
    ErrorCode, ErrorEnvelope, REDACTED_VALUE, SecretString, is_secret_key, set_if_present,
};
use std::collections::BTreeMap;
use std::fmt;
use url::Url;

/// Env var: default page number.
pub const ENV_PAGING_DEFAULT_PAGE_NUMBER: &str = "FLEEN_PAGING_DEFAULT_PAGE_NUMBER";
/// Env var: default page size.
pub const ENV_PAGING_DEFAULT_PAGE_SIZE: &str = "FLEEN_PAGING_DEFAULT_PAGE_SIZE";
/// Env var: default sort field.
pub const ENV_PAGING_DEFAULT_SORT_BY: &str = "FLEEN_PAGING_DEFAULT_SORT_BY";
/// Env var: default sort direction.
pub const ENV_PAGING_DEFAULT_SORT_DIRECTION: &str = "FLEEN_PAGING_DEFAULT_SORT_DIRECTION";
/// Env var: HTTP adapter base URL.
pub const ENV_HTTP_BASE_URL: &str = "FLEEN_HTTP_BASE_URL";
/// Env var: HTTP adapter timeout in milliseconds.
pub const ENV_HTTP_TIMEOUT_MS: &str = "FLEEN_HTTP_TIMEOUT_MS";
/// Env var: field encryption secret.
pub const ENV_SECURITY_FIELD_ENCRYPTION_KEY: &str = "FLEEN_SECURITY_FIELD_ENCRYPTION_KEY";
/// Env var: access token lifetime in milliseconds.
pub const ENV_SECURITY_ACCESS_TOKEN_VALIDITY_MS: &str = "FLEEN_SECURITY_ACCESS_TOKEN_VALIDITY_MS";
/// Env var: refresh token lifetime in milliseconds.
pub const ENV_SECURITY_REFRESH_TOKEN_VALIDITY_MS: &str =
    "FLEEN_SECURITY_REFRESH_TOKEN_VALIDITY_MS";
/// Env var: password reset token lifetime in milliseconds.
pub const ENV_SECURITY_RESET_PASSWORD_TOKEN_VALIDITY_MS: &str =
    "FLEEN_SECURITY_RESET_PASSWORD_TOKEN_VALIDITY_MS";
/// Env var: log level.
pub const ENV_LOG_LEVEL: &str = "FLEEN_LOG_LEVEL";
/// Env var: log format (`text` or `json`).
pub const ENV_LOG_FORMAT: &str = "FLEEN_LOG_FORMAT";

/// Every env var consulted by [`BaseEnv::from_std_env`].
pub const ALL_ENV_VARS: [&str; 12] = [
    ENV_PAGING_DEFAULT_PAGE_NUMBER,
    ENV_PAGING_DEFAULT_PAGE_SIZE,
    ENV_PAGING_DEFAULT_SORT_BY,
    ENV_PAGING_DEFAULT_SORT_DIRECTION,
    ENV_HTTP_BASE_URL,
    ENV_HTTP_TIMEOUT_MS,
    ENV_SECURITY_FIELD_ENCRYPTION_KEY,
    ENV_SECURITY_ACCESS_TOKEN_VALIDITY_MS,
    ENV_SECURITY_REFRESH_TOKEN_VALIDITY_MS,
    ENV_SECURITY_RESET_PASSWORD_TOKEN_VALIDITY_MS,
    ENV_LOG_LEVEL,
    ENV_LOG_FORMAT,
];

/// Parsed `FLEEN_*` overrides; `None` means the variable was not set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseEnv {
    /// `FLEEN_PAGING_DEFAULT_PAGE_NUMBER`.
    pub paging_default_page_number: Option<u32>,
    /// `FLEEN_PAGING_DEFAULT_PAGE_SIZE`.
    pub paging_default_page_size: Option<u32>,
    /// `FLEEN_PAGING_DEFAULT_SORT_BY`.
    pub paging_default_sort_by: Option<Box<str>>,
    /// `FLEEN_PAGING_DEFAULT_SORT_DIRECTION`.
    pub paging_default_sort_direction: Option<Box<str>>,
    /// `FLEEN_HTTP_BASE_URL`.
    pub http_base_url: Option<Box<str>>,
    /// `FLEEN_HTTP_TIMEOUT_MS`.
    pub http_timeout_ms: Option<u64>,
    /// `FLEEN_SECURITY_FIELD_ENCRYPTION_KEY`.
    pub security_field_encryption_key: Option<SecretString>,
    /// `FLEEN_SECURITY_ACCESS_TOKEN_VALIDITY_MS`.
    pub security_access_token_validity_ms: Option<u64>,
    /// `FLEEN_SECURITY_REFRESH_TOKEN_VALIDITY_MS`.
    pub security_refresh_token_validity_ms: Option<u64>,
    /// `FLEEN_SECURITY_RESET_PASSWORD_TOKEN_VALIDITY_MS`.
    pub security_reset_password_token_validity_ms: Option<u64>,
    /// `FLEEN_LOG_LEVEL`.
    pub log_level: Option<Box<str>>,
    /// `FLEEN_LOG_FORMAT`.
    pub log_format: Option<LogFormat>,
}

impl BaseEnv {
    /// Parse env overrides from a key/value map (useful for tests and fixtures).
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        Ok(Self {
            paging_default_page_number: parse_optional_u32(map, ENV_PAGING_DEFAULT_PAGE_NUMBER)?,
            paging_default_page_size: parse_optional_u32(map, ENV_PAGING_DEFAULT_PAGE_SIZE)?,
            paging_default_sort_by: parse_optional_trimmed_string(map, ENV_PAGING_DEFAULT_SORT_BY)?,
            paging_default_sort_direction: parse_optional_sort_direction(
                map,
                ENV_PAGING_DEFAULT_SORT_DIRECTION,
            )?,
            http_base_url: parse_optional_url(map, ENV_HTTP_BASE_URL)?,
            http_timeout_ms: parse_optional_u64(map, ENV_HTTP_TIMEOUT_MS)?,
            security_field_encryption_key: parse_optional_secret(
                map,
                ENV_SECURITY_FIELD_ENCRYPTION_KEY,
            )?,
            security_access_token_validity_ms: parse_optional_u64(
                map,
                ENV_SECURITY_ACCESS_TOKEN_VALIDITY_MS,
            )?,
            security_refresh_token_validity_ms: parse_optional_u64(
                map,
                ENV_SECURITY_REFRESH_TOKEN_VALIDITY_MS,
            )?,
            security_reset_password_token_validity_ms: parse_optional_u64(
                map,
                ENV_SECURITY_RESET_PASSWORD_TOKEN_VALIDITY_MS,
            )?,
            log_level: parse_optional_trimmed_string(map, ENV_LOG_LEVEL)?,
            log_format: parse_optional_log_format(map, ENV_LOG_FORMAT)?,
        })
    }

    /// Parse env overrides from the current process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let mut map = BTreeMap::new();
        for name in ALL_ENV_VARS {
            if let Ok(value) = std::env::var(name) {
                map.insert(name.to_string(), value);
            }
        }

        Self::from_map(&map)
    }
}

/// Apply env overrides to a base config (env wins over file/default values).
pub fn apply_env_overrides(
    base: BaseConfig,
    env: &BaseEnv,
) -> Result<ValidatedBaseConfig, ErrorEnvelope> {
    let mut config = base;

    set_if_present(env.paging_default_page_number, |value| {
        config.paging.default_page_number = value;
    });
    set_if_present(env.paging_default_page_size, |value| {
        config.paging.default_page_size = value;
    });
    set_if_present(env.paging_default_sort_by.as_deref(), |value| {
        config.paging.default_sort_by = value.to_string();
    });
    set_if_present(env.paging_default_sort_direction.as_deref(), |value| {
        config.paging.default_sort_direction = value.to_string();
    });
    set_if_present(env.http_base_url.as_deref(), |value| {
        config.http.base_url = Some(value.to_string());
    });
    set_if_present(env.http_timeout_ms, |value| config.http.timeout_ms = value);
    set_if_present(env.security_field_encryption_key.clone(), |value| {
        config.security.field_encryption_key = Some(value);
    });
    set_if_present(env.security_access_token_validity_ms, |value| {
        config.security.access_token_validity_ms = value;
    });
    set_if_present(env.security_refresh_token_validity_ms, |value| {
        config.security.refresh_token_validity_ms = value;
    });
    set_if_present(env.security_reset_password_token_validity_ms, |value| {
        config.security.reset_password_token_validity_ms = value;
    });
    set_if_present(env.log_level.as_deref(), |value| {
        config.logging.level = value.to_string();
    });
    set_if_present(env.log_format, |value| config.logging.format = value);

    config.validate_and_normalize().map_err(Into::into)
}

/// Validation failures when parsing env variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvParseError {
    /// An env var was present but empty after trimming.
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// A secret env var was present but empty after trimming.
    EmptySecret {
        /// Env var name.
        var: &'static str,
    },
    /// Integer env var had an invalid value.
    InvalidInt {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
    /// URL env var had an invalid value.
    InvalidUrl {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
    /// Enum env var had an invalid value.
    InvalidEnum {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
}

impl EnvParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyValue { .. } | Self::EmptySecret { .. } => {
                ErrorCode::new("config", "empty_env_var")
            },
            Self::InvalidInt { .. } => ErrorCode::new("config", "invalid_env_int"),
            Self::InvalidUrl { .. } => ErrorCode::new("config", "invalid_env_url"),
            Self::InvalidEnum { .. } => ErrorCode::new("config", "invalid_env_enum"),
        }
    }
}

impl fmt::Display for EnvParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyValue { var } | Self::EmptySecret { var } => {
                write!(formatter, "{var} must be non-empty")
            },
            Self::InvalidInt { var, .. } => write!(formatter, "{var} must be an integer"),
            Self::InvalidUrl { var, .. } => write!(formatter, "{var} must be a valid URL"),
            Self::InvalidEnum { var, .. } => write!(formatter, "{var} has an unsupported value"),
        }
    }
}

impl std::error::Error for EnvParseError {}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            EnvParseError::EmptyValue { var } | EnvParseError::EmptySecret { var } => {
                envelope.with_metadata("env_var", var)
            },
            EnvParseError::InvalidInt { var, value }
            | EnvParseError::InvalidUrl { var, value }
            | EnvParseError::InvalidEnum { var, value } => envelope
                .with_metadata("env_var", var)
                .with_metadata("value", redact_value(var, &value)),
        }
    }
}

fn parse_optional_trimmed_string(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<Box<str>>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    Ok(Some(trimmed.to_owned().into_boxed_str()))
}

fn parse_optional_secret(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<SecretString>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptySecret { var });
    }

    Ok(Some(SecretString::new(trimmed.to_owned())))
}

fn parse_optional_u64(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<u64>, EnvParseError> {
    let Some(raw) = parse_optional_trimmed_string(map, var)? else {
        return Ok(None);
    };

    raw.parse::<u64>()
        .map(Some)
        .map_err(|_| EnvParseError::InvalidInt {
            var,
            value: raw.into_string(),
        })
}

fn parse_optional_u32(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<u32>, EnvParseError> {
    let Some(raw) = parse_optional_trimmed_string(map, var)? else {
        return Ok(None);
    };

    raw.parse::<u32>()
        .map(Some)
        .map_err(|_| EnvParseError::InvalidInt {
            var,
            value: raw.into_string(),
        })
}

fn parse_optional_url(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<Box<str>>, EnvParseError> {
    let Some(raw) = parse_optional_trimmed_string(map, var)? else {
        return Ok(None);
    };

    match Url::parse(&raw) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(Some(raw)),
        _ => Err(EnvParseError::InvalidUrl {
            var,
            value: raw.into_string(),
        }),
    }
}

fn parse_optional_sort_direction(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<Box<str>>, EnvParseError> {
    let Some(raw) = parse_optional_trimmed_string(map, var)? else {
        return Ok(None);
    };

    let upper = raw.to_ascii_uppercase();
    if matches!(upper.as_str(), "ASC" | "DESC") {
        Ok(Some(upper.into_boxed_str()))
    } else {
        Err(EnvParseError::InvalidEnum {
            var,
            value: raw.into_string(),
        })
    }
}

fn parse_optional_log_format(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<LogFormat>, EnvParseError> {
    let Some(raw) = parse_optional_trimmed_string(map, var)? else {
        return Ok(None);
    };

    LogFormat::parse(&raw)
        .map(Some)
        .ok_or_else(|| EnvParseError::InvalidEnum {
            var,
            value: raw.into_string(),
        })
}

fn redact_value(var: &str, value: &str) -> String {
    if is_secret_key(var) {
        REDACTED_VALUE.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn env_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect()
    }

    #[test]
    fn unset_env_changes_nothing() -> Result<(), Box<dyn Error>> {
        let env = BaseEnv::from_map(&BTreeMap::new())?;
        assert_eq!(env, BaseEnv::default());

        let config = apply_env_overrides(BaseConfig::default(), &env)?;
        assert_eq!(config.as_ref(), &BaseConfig::default());
        Ok(())
    }

    #[test]
    fn env_values_override_config() -> Result<(), Box<dyn Error>> {
        let env = BaseEnv::from_map(&env_map(&[
            (ENV_PAGING_DEFAULT_PAGE_SIZE, " 25 "),
            (ENV_PAGING_DEFAULT_SORT_DIRECTION, "asc"),
            (ENV_HTTP_BASE_URL, "https://api.fleen.io"),
            (ENV_LOG_FORMAT, "JSON"),
        ]))?;

        let config = apply_env_overrides(BaseConfig::default(), &env)?;
        assert_eq!(config.paging.default_page_size, 25);
        assert_eq!(config.paging.default_sort_direction, "ASC");
        assert_eq!(config.http.base_url.as_deref(), Some("https://api.fleen.io"));
        assert_eq!(config.logging.format, LogFormat::Json);
        Ok(())
    }

    #[test]
    fn malformed_values_fail_fast() {
        let map = env_map(&[(ENV_HTTP_TIMEOUT_MS, "soon")]);
        assert_eq!(
            BaseEnv::from_map(&map),
            Err(EnvParseError::InvalidInt {
                var: ENV_HTTP_TIMEOUT_MS,
                value: "soon".to_string(),
            })
        );

        let map = env_map(&[(ENV_LOG_LEVEL, "   ")]);
        assert_eq!(
            BaseEnv::from_map(&map),
            Err(EnvParseError::EmptyValue { var: ENV_LOG_LEVEL })
        );

        let map = env_map(&[(ENV_PAGING_DEFAULT_SORT_DIRECTION, "sideways")]);
        assert!(BaseEnv::from_map(&map).is_err());
    }

    #[test]
    fn secret_values_are_redacted_in_errors() {
        let envelope = ErrorEnvelope::from(EnvParseError::InvalidEnum {
            var: ENV_SECURITY_FIELD_ENCRYPTION_KEY,
            value: "hunter2".to_string(),
        });
        assert_eq!(
            envelope.metadata.get("value").map(String::as_str),
            Some(REDACTED_VALUE)
        );
    }

    #[test]
    fn out_of_range_env_value_fails_validation() -> Result<(), Box<dyn Error>> {
        let env = BaseEnv::from_map(&env_map(&[(ENV_HTTP_TIMEOUT_MS, "5")]))?;
        let Err(error) = apply_env_overrides(BaseConfig::default(), &env) else {
            panic!("timeout below minimum accepted");
        };
        assert_eq!(error.code, ErrorCode::new("config", "invalid_timeout"));
        Ok(())
    }
}
