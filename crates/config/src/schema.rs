//! Base configuration schema, defaults, validation, and normalization.
//!
//! - Deserialization uses `serde` (JSON or TOML).
//! - Validation is manual and returns typed errors mapped to `ErrorEnvelope`.
//! - Normalization trims strings and canonicalizes enumerated tokens.

use fleen_base_domain::constants::security;
use fleen_base_domain::{
    DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, DEFAULT_SORT_BY, DEFAULT_SORT_DIRECTION,
    PagingDefaults,
};
use fleen_base_shared::datetime::time_in_millis;
use fleen_base_shared::{BoundedU32, BoundedU64, ErrorCode, ErrorEnvelope, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Strips credentials from a URL before it lands in error metadata.
fn sanitize_url_for_error(url: &str) -> String {
    match Url::parse(url) {
        Ok(mut parsed) => {
            if parsed.password().is_some() || !parsed.username().is_empty() {
                if parsed.set_username("").is_err() {
                    return "[invalid url: invalid username]".to_string();
                }
                if parsed.set_password(None).is_err() {
                    return "[invalid url: invalid password]".to_string();
                }
            }
            parsed.to_string()
        },
        Err(error) => format!("[invalid url: {error}]"),
    }
}

/// Current supported configuration schema version.
pub const CURRENT_CONFIG_VERSION: u32 = 1;

const PAGE_SIZE_MIN: u32 = 1;
const PAGE_SIZE_MAX: u32 = 1_000;

const HTTP_TIMEOUT_MIN_MS: u64 = 100;
const HTTP_TIMEOUT_MAX_MS: u64 = 600_000;
const HTTP_TIMEOUT_DEFAULT_MS: u64 = 30_000;

const TOKEN_VALIDITY_MIN_MS: u64 = 1_000;
const TOKEN_VALIDITY_MAX_MS: u64 = time_in_millis(60, 60, 24, 31);

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Top-level configuration shared by Fleen services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct BaseConfig {
    /// Schema version for forward-compatible migrations.
    pub version: u32,
    /// Search request defaults.
    pub paging: PagingConfig,
    /// Outbound HTTP adapter settings.
    pub http: HttpConfig,
    /// Token lifetimes and field encryption.
    pub security: SecurityConfig,
    /// Tracing subscriber settings.
    pub logging: LoggingConfig,
}

impl Default for BaseConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_CONFIG_VERSION,
            paging: PagingConfig::default(),
            http: HttpConfig::default(),
            security: SecurityConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl BaseConfig {
    /// Validate and normalize the config.
    pub fn validate_and_normalize(mut self) -> Result<ValidatedBaseConfig, ConfigSchemaError> {
        self.validate_version()?;

        self.paging.normalize();
        self.paging.validate()?;
        self.http.normalize();
        self.http.validate()?;
        self.security.validate()?;
        self.logging.normalize();
        self.logging.validate()?;

        let limits = ConfigLimits::new(&self)?;
        Ok(ValidatedBaseConfig { raw: self, limits })
    }

    const fn validate_version(&self) -> Result<(), ConfigSchemaError> {
        if self.version != CURRENT_CONFIG_VERSION {
            return Err(ConfigSchemaError::UnsupportedVersion {
                found: self.version,
                supported: CURRENT_CONFIG_VERSION,
            });
        }
        Ok(())
    }
}

/// Validated config wrapper carrying bounded numeric values.
#[derive(Debug, Clone)]
pub struct ValidatedBaseConfig {
    raw: BaseConfig,
    limits: ConfigLimits,
}

impl ValidatedBaseConfig {
    /// Access validated numeric bounds.
    #[must_use]
    pub const fn limits(&self) -> &ConfigLimits {
        &self.limits
    }

    /// Borrow the raw config.
    #[must_use]
    pub const fn as_ref(&self) -> &BaseConfig {
        &self.raw
    }

    /// Consume the wrapper and return the raw config.
    #[must_use]
    pub fn into_inner(self) -> BaseConfig {
        self.raw
    }

    /// Paging defaults for [`fleen_base_domain::SearchRequest::new`].
    #[must_use]
    pub fn paging_defaults(&self) -> PagingDefaults {
        self.raw.paging.to_defaults()
    }
}

impl AsRef<BaseConfig> for ValidatedBaseConfig {
    fn as_ref(&self) -> &BaseConfig {
        &self.raw
    }
}

impl std::ops::Deref for ValidatedBaseConfig {
    type Target = BaseConfig;

    fn deref(&self) -> &Self::Target {
        &self.raw
    }
}

/// Validated numeric limits derived from the config.
#[derive(Debug, Clone, Copy)]
pub struct ConfigLimits {
    /// Default page size.
    pub default_page_size: BoundedU32<PAGE_SIZE_MIN, PAGE_SIZE_MAX>,
    /// HTTP timeout (ms).
    pub http_timeout_ms: BoundedU64<HTTP_TIMEOUT_MIN_MS, HTTP_TIMEOUT_MAX_MS>,
}

impl ConfigLimits {
    fn new(config: &BaseConfig) -> Result<Self, ConfigSchemaError> {
        let default_page_size = BoundedU32::try_new(config.paging.default_page_size).map_err(
            |error| ConfigSchemaError::LimitOutOfRange {
                section: "paging",
                field: "defaultPageSize",
                value: u64::from(error.value),
                min: u64::from(error.min),
                max: u64::from(error.max),
            },
        )?;
        let http_timeout_ms = BoundedU64::try_new(config.http.timeout_ms).map_err(|error| {
            ConfigSchemaError::TimeoutOutOfRange {
                section: "http",
                field: "timeoutMs",
                value_ms: error.value,
                min_ms: error.min,
                max_ms: error.max,
            }
        })?;
        Ok(Self {
            default_page_size,
            http_timeout_ms,
        })
    }
}

/// Parse a config from a JSON string, applying validation and normalization.
pub fn parse_base_config_json(input: &str) -> Result<ValidatedBaseConfig, ErrorEnvelope> {
    let config: BaseConfig = serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_json"),
            format!("invalid config JSON: {error}"),
        )
    })?;

    config.validate_and_normalize().map_err(Into::into)
}

/// Parse a config from a TOML string, applying validation and normalization.
pub fn parse_base_config_toml(input: &str) -> Result<ValidatedBaseConfig, ErrorEnvelope> {
    let config: BaseConfig = toml::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_toml"),
            format!("invalid config TOML: {error}"),
        )
    })?;

    config.validate_and_normalize().map_err(Into::into)
}

/// Defaults applied to search requests that omit paging parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct PagingConfig {
    /// Zero-based page index used when `pageNo` is absent.
    pub default_page_number: u32,
    /// Page size used when `pageSize` is absent.
    pub default_page_size: u32,
    /// Sort field used when `sortBy` is absent.
    pub default_sort_by: String,
    /// Sort direction used when `sortDir` is absent (`ASC` or `DESC`).
    pub default_sort_direction: String,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_page_number: DEFAULT_PAGE_NUMBER,
            default_page_size: DEFAULT_PAGE_SIZE,
            default_sort_by: DEFAULT_SORT_BY.to_string(),
            default_sort_direction: DEFAULT_SORT_DIRECTION.to_string(),
        }
    }
}

impl PagingConfig {
    /// Domain-side paging defaults.
    #[must_use]
    pub fn to_defaults(&self) -> PagingDefaults {
        PagingDefaults {
            page_number: self.default_page_number,
            page_size: self.default_page_size,
            sort_by: self.default_sort_by.clone(),
            sort_direction: self.default_sort_direction.clone(),
        }
    }

    fn normalize(&mut self) {
        self.default_sort_by = self.default_sort_by.trim().to_string();
        self.default_sort_direction = self.default_sort_direction.trim().to_ascii_uppercase();
    }

    fn validate(&self) -> Result<(), ConfigSchemaError> {
        if self.default_sort_by.is_empty() {
            return Err(ConfigSchemaError::InvalidValue {
                section: "paging",
                field: "defaultSortBy",
                reason: "must be non-empty".to_string(),
            });
        }
        if !matches!(self.default_sort_direction.as_str(), "ASC" | "DESC") {
            return Err(ConfigSchemaError::InvalidValue {
                section: "paging",
                field: "defaultSortDirection",
                reason: format!("expected ASC or DESC (got {})", self.default_sort_direction),
            });
        }
        Ok(())
    }
}

/// Outbound HTTP adapter settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct HttpConfig {
    /// Base URL of the remote system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Request timeout (ms).
    pub timeout_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_ms: HTTP_TIMEOUT_DEFAULT_MS,
        }
    }
}

impl HttpConfig {
    fn normalize(&mut self) {
        self.base_url = self
            .base_url
            .take()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());
    }

    fn validate(&self) -> Result<(), ConfigSchemaError> {
        let Some(base_url) = self.base_url.as_deref() else {
            return Ok(());
        };
        match Url::parse(base_url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
            _ => Err(ConfigSchemaError::InvalidUrl {
                section: "http",
                field: "baseUrl",
                url: base_url.to_string(),
            }),
        }
    }
}

/// Token lifetimes and the field-encryption secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct SecurityConfig {
    /// Secret the field cipher derives its key from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_encryption_key: Option<SecretString>,
    /// Access token lifetime (ms).
    pub access_token_validity_ms: u64,
    /// Refresh token lifetime (ms).
    pub refresh_token_validity_ms: u64,
    /// Password reset token lifetime (ms).
    pub reset_password_token_validity_ms: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            field_encryption_key: None,
            access_token_validity_ms: security::ACCESS_TOKEN_VALIDITY_MS,
            refresh_token_validity_ms: security::REFRESH_TOKEN_VALIDITY_MS,
            reset_password_token_validity_ms: security::RESET_PASSWORD_TOKEN_VALIDITY_MS,
        }
    }
}

impl SecurityConfig {
    fn validate(&self) -> Result<(), ConfigSchemaError> {
        if self
            .field_encryption_key
            .as_ref()
            .is_some_and(SecretString::is_blank)
        {
            return Err(ConfigSchemaError::InvalidValue {
                section: "security",
                field: "fieldEncryptionKey",
                reason: "must be non-blank".to_string(),
            });
        }
        for (field, value) in [
            ("accessTokenValidityMs", self.access_token_validity_ms),
            ("refreshTokenValidityMs", self.refresh_token_validity_ms),
            (
                "resetPasswordTokenValidityMs",
                self.reset_password_token_validity_ms,
            ),
        ] {
            if !(TOKEN_VALIDITY_MIN_MS..=TOKEN_VALIDITY_MAX_MS).contains(&value) {
                return Err(ConfigSchemaError::TimeoutOutOfRange {
                    section: "security",
                    field,
                    value_ms: value,
                    min_ms: TOKEN_VALIDITY_MIN_MS,
                    max_ms: TOKEN_VALIDITY_MAX_MS,
                });
            }
        }
        Ok(())
    }
}

/// Output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Parse `text` or `json` (case-insensitive).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Tracing subscriber settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct LoggingConfig {
    /// Minimum level (`trace` .. `error`).
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        self.level = self.level.trim().to_ascii_lowercase();
    }

    fn validate(&self) -> Result<(), ConfigSchemaError> {
        if LOG_LEVELS.contains(&self.level.as_str()) {
            return Ok(());
        }
        Err(ConfigSchemaError::InvalidValue {
            section: "logging",
            field: "level",
            reason: format!("expected one of {} (got {})", LOG_LEVELS.join(", "), self.level),
        })
    }
}

/// Validation failures for [`BaseConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSchemaError {
    /// The config version is not supported by this crate.
    UnsupportedVersion {
        /// Version found in the config.
        found: u32,
        /// Version supported by this crate.
        supported: u32,
    },
    /// A duration value is out of bounds.
    TimeoutOutOfRange {
        /// Schema section (e.g. `http`).
        section: &'static str,
        /// Field name in the config file (e.g. `timeoutMs`).
        field: &'static str,
        /// Value provided (ms).
        value_ms: u64,
        /// Minimum allowed value (ms).
        min_ms: u64,
        /// Maximum allowed value (ms).
        max_ms: u64,
    },
    /// A numeric limit is out of bounds.
    LimitOutOfRange {
        /// Schema section (e.g. `paging`).
        section: &'static str,
        /// Field name in the config file (e.g. `defaultPageSize`).
        field: &'static str,
        /// Value provided.
        value: u64,
        /// Minimum allowed value.
        min: u64,
        /// Maximum allowed value.
        max: u64,
    },
    /// A URL entry is invalid.
    InvalidUrl {
        /// Schema section.
        section: &'static str,
        /// Field name in the config file.
        field: &'static str,
        /// Invalid URL value.
        url: String,
    },
    /// Any other rejected value.
    InvalidValue {
        /// Schema section.
        section: &'static str,
        /// Field name in the config file.
        field: &'static str,
        /// Human readable reason.
        reason: String,
    },
}

impl ConfigSchemaError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnsupportedVersion { .. } => ErrorCode::new("config", "unsupported_version"),
            Self::TimeoutOutOfRange { .. } => ErrorCode::new("config", "invalid_timeout"),
            Self::LimitOutOfRange { .. } => ErrorCode::new("config", "invalid_limit"),
            Self::InvalidUrl { .. } => ErrorCode::new("config", "invalid_url"),
            Self::InvalidValue { .. } => ErrorCode::new("config", "invalid_value"),
        }
    }
}

impl fmt::Display for ConfigSchemaError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedVersion { found, supported } => {
                write!(
                    formatter,
                    "unsupported config version: {found} (supported: {supported})"
                )
            },
            Self::TimeoutOutOfRange {
                section,
                field,
                value_ms,
                min_ms,
                max_ms,
            } => write!(
                formatter,
                "{section}.{field} must be within [{min_ms}, {max_ms}] ms (got {value_ms})"
            ),
            Self::LimitOutOfRange {
                section,
                field,
                value,
                min,
                max,
            } => write!(
                formatter,
                "{section}.{field} must be within [{min}, {max}] (got {value})"
            ),
            Self::InvalidUrl { section, field, .. } => {
                write!(formatter, "invalid URL for {section}.{field}")
            },
            Self::InvalidValue {
                section,
                field,
                reason,
            } => write!(formatter, "invalid {section}.{field}: {reason}"),
        }
    }
}

impl std::error::Error for ConfigSchemaError {}

impl From<ConfigSchemaError> for ErrorEnvelope {
    fn from(error: ConfigSchemaError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            ConfigSchemaError::UnsupportedVersion { found, supported } => envelope
                .with_metadata("found", found.to_string())
                .with_metadata("supported", supported.to_string()),
            ConfigSchemaError::TimeoutOutOfRange {
                section,
                field,
                value_ms,
                min_ms,
                max_ms,
            } => envelope
                .with_metadata("section", section)
                .with_metadata("field", field)
                .with_metadata("value_ms", value_ms.to_string())
                .with_metadata("min_ms", min_ms.to_string())
                .with_metadata("max_ms", max_ms.to_string()),
            ConfigSchemaError::LimitOutOfRange {
                section,
                field,
                value,
                min,
                max,
            } => envelope
                .with_metadata("section", section)
                .with_metadata("field", field)
                .with_metadata("value", value.to_string())
                .with_metadata("min", min.to_string())
                .with_metadata("max", max.to_string()),
            ConfigSchemaError::InvalidUrl {
                section,
                field,
                url,
            } => envelope
                .with_metadata("section", section)
                .with_metadata("field", field)
                .with_metadata("url", sanitize_url_for_error(&url)),
            ConfigSchemaError::InvalidValue {
                section,
                field,
                reason,
            } => envelope
                .with_metadata("section", section)
                .with_metadata("field", field)
                .with_metadata("reason", reason),
        }
    }
}
