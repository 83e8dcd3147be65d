//! Config loading helpers (env + file + overrides).
//!
//! The loader owns the merge order and surfaces user-facing errors as typed
//! `ErrorEnvelope`s.

use crate::env::{BaseEnv, apply_env_overrides};
use crate::schema::{BaseConfig, LogFormat, ValidatedBaseConfig};
use fleen_base_shared::{ErrorClass, ErrorCode, ErrorEnvelope, SecretString, set_if_present};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

/// Load the config from sources using a deterministic precedence order.
///
/// Precedence (highest wins):
/// - env overrides (`BaseEnv`)
/// - overrides JSON (partial config)
/// - config JSON (file content)
/// - defaults (`BaseConfig::default()`)
pub fn load_base_config_from_sources(
    config_json: Option<&str>,
    overrides_json: Option<&str>,
    env: &BaseEnv,
) -> Result<ValidatedBaseConfig, ErrorEnvelope> {
    let mut config = match config_json {
        None => BaseConfig::default(),
        Some(input) => parse_config_unvalidated(input, ConfigFormat::Json)?,
    };

    if let Some(input) = overrides_json {
        let overrides = parse_overrides_json(input)?;
        apply_overrides(&mut config, overrides);
    }

    // env is applied last and also validates/normalizes the resulting config.
    let validated = apply_env_overrides(config, env)?;
    tracing::debug!(
        source = "inline",
        page_size = validated.paging.default_page_size,
        "loaded base config"
    );
    Ok(validated)
}

/// Load the config from an optional file path (`.json` or `.toml`).
pub fn load_base_config_from_path(
    config_path: Option<&Path>,
    overrides_json: Option<&str>,
    env: &BaseEnv,
) -> Result<ValidatedBaseConfig, ErrorEnvelope> {
    let mut config = match config_path {
        None => BaseConfig::default(),
        Some(path) => {
            let config_text = read_config_file(path)?;
            let format = detect_config_format(path)?;
            parse_config_unvalidated(&config_text, format)?
        },
    };

    if let Some(input) = overrides_json {
        let overrides = parse_overrides_json(input)?;
        apply_overrides(&mut config, overrides);
    }

    let validated = apply_env_overrides(config, env)?;
    tracing::debug!(
        path = ?config_path,
        page_size = validated.paging.default_page_size,
        "loaded base config"
    );
    Ok(validated)
}

/// Load the config from the process env and an optional file path.
pub fn load_base_config_std_env(
    config_path: Option<&Path>,
    overrides_json: Option<&str>,
) -> Result<ValidatedBaseConfig, ErrorEnvelope> {
    let env = BaseEnv::from_std_env().map_err(ErrorEnvelope::from)?;
    load_base_config_from_path(config_path, overrides_json, &env)
}

/// Serialize the config as pretty JSON (with trailing newline).
///
/// Secrets serialize as a redaction marker.
pub fn to_pretty_json(config: &BaseConfig) -> Result<String, ErrorEnvelope> {
    let mut output = serde_json::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::internal(),
            format!("failed to serialize config: {error}"),
            ErrorClass::NonRetriable,
        )
    })?;
    output.push('\n');
    Ok(output)
}

/// Serialize the config as pretty TOML (with trailing newline).
pub fn to_pretty_toml(config: &BaseConfig) -> Result<String, ErrorEnvelope> {
    let mut output = toml::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::new("config", "serialize_toml"),
            format!("failed to serialize config TOML: {error}"),
            ErrorClass::NonRetriable,
        )
    })?;
    output.push('\n');
    Ok(output)
}

fn parse_config_unvalidated(input: &str, format: ConfigFormat) -> Result<BaseConfig, ErrorEnvelope> {
    match format {
        ConfigFormat::Json => serde_json::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_json"),
                format!("invalid config JSON: {error}"),
            )
            .with_metadata("source", "config")
        }),
        ConfigFormat::Toml => toml::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_toml"),
                format!("invalid config TOML: {error}"),
            )
            .with_metadata("source", "config")
        }),
    }
}

fn parse_overrides_json(input: &str) -> Result<BaseConfigOverrides, ErrorEnvelope> {
    serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_json"),
            format!("invalid overrides JSON: {error}"),
        )
        .with_metadata("source", "overrides")
    })
}

fn read_config_file(path: &Path) -> Result<String, ErrorEnvelope> {
    std::fs::read_to_string(path).map_err(|error| {
        let code = match error.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::new("config", "config_file_not_found"),
            std::io::ErrorKind::PermissionDenied => {
                ErrorCode::new("config", "config_file_permission_denied")
            },
            _ => ErrorCode::new("config", "config_file_io"),
        };

        ErrorEnvelope::expected(code, format!("failed to read config file: {error}"))
            .with_metadata("path", path.to_string_lossy().to_string())
    })
}

fn detect_config_format(path: &Path) -> Result<ConfigFormat, ErrorEnvelope> {
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        None | Some("json") => Ok(ConfigFormat::Json),
        Some("toml") => Ok(ConfigFormat::Toml),
        Some(other) => Err(ErrorEnvelope::expected(
            ErrorCode::new("config", "unsupported_format"),
            "unsupported config format; use .json or .toml",
        )
        .with_metadata("extension", other.to_string())),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
struct BaseConfigOverrides {
    version: Option<u32>,
    paging: PagingConfigOverrides,
    http: HttpConfigOverrides,
    security: SecurityConfigOverrides,
    logging: LoggingConfigOverrides,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
struct PagingConfigOverrides {
    default_page_number: Option<u32>,
    default_page_size: Option<u32>,
    default_sort_by: Option<String>,
    default_sort_direction: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
struct HttpConfigOverrides {
    base_url: Option<String>,
    timeout_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
struct SecurityConfigOverrides {
    field_encryption_key: Option<SecretString>,
    access_token_validity_ms: Option<u64>,
    refresh_token_validity_ms: Option<u64>,
    reset_password_token_validity_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
struct LoggingConfigOverrides {
    level: Option<String>,
    format: Option<LogFormat>,
}

fn apply_overrides(config: &mut BaseConfig, overrides: BaseConfigOverrides) {
    set_if_present(overrides.version, |value| config.version = value);

    let paging = overrides.paging;
    set_if_present(paging.default_page_number, |value| {
        config.paging.default_page_number = value;
    });
    set_if_present(paging.default_page_size, |value| {
        config.paging.default_page_size = value;
    });
    set_if_present(paging.default_sort_by, |value| {
        config.paging.default_sort_by = value;
    });
    set_if_present(paging.default_sort_direction, |value| {
        config.paging.default_sort_direction = value;
    });

    let http = overrides.http;
    set_if_present(http.base_url, |value| config.http.base_url = Some(value));
    set_if_present(http.timeout_ms, |value| config.http.timeout_ms = value);

    let security = overrides.security;
    set_if_present(security.field_encryption_key, |value| {
        config.security.field_encryption_key = Some(value);
    });
    set_if_present(security.access_token_validity_ms, |value| {
        config.security.access_token_validity_ms = value;
    });
    set_if_present(security.refresh_token_validity_ms, |value| {
        config.security.refresh_token_validity_ms = value;
    });
    set_if_present(security.reset_password_token_validity_ms, |value| {
        config.security.reset_password_token_validity_ms = value;
    });

    let logging = overrides.logging;
    set_if_present(logging.level, |value| config.logging.level = value);
    set_if_present(logging.format, |value| config.logging.format = value);
}
