//! Global `tracing` subscriber setup.

use fleen_base_config::{LogFormat, LoggingConfig};
use fleen_base_shared::{ErrorCode, ErrorEnvelope};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Filter for `config`: `RUST_LOG` when set, otherwise the configured level
/// with noisy HTTP internals capped at `warn`.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter, ErrorEnvelope> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    let directives = format!("{},hyper=warn,reqwest=warn,h2=warn", config.level);
    EnvFilter::try_new(&directives).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_log_level"),
            format!("invalid log level '{}': {error}", config.level),
        )
        .with_metadata("level", config.level.clone())
    })
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), ErrorEnvelope> {
    let filter = env_filter(config)?;
    let fmt_layer = match config.format {
        LogFormat::Json => fmt::layer().json().with_current_span(true).boxed(),
        LogFormat::Text => fmt::layer().with_target(true).boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "logger_init_failed"),
                format!("failed to initialize tracing: {error}"),
            )
        })?;

    tracing::debug!(level = %config.level, format = ?config.format, "tracing initialized");
    Ok(())
}
