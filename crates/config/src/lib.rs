//! # fleen-base-config
//!
//! Configuration schema, env parsing, and layered loading for services built
//! on `fleen-base`. Depends on `domain` and `shared` only.

/// Environment variable parsing and merging.
pub mod env;
/// Config loading helpers (env + file + overrides).
pub mod load;
/// Configuration schema types and helpers.
pub mod schema;

pub use env::{ALL_ENV_VARS, BaseEnv, EnvParseError, apply_env_overrides};
pub use load::{
    load_base_config_from_path, load_base_config_from_sources, load_base_config_std_env,
    to_pretty_json, to_pretty_toml,
};
pub use schema::{
    BaseConfig, CURRENT_CONFIG_VERSION, ConfigLimits, ConfigSchemaError, HttpConfig, LogFormat,
    LoggingConfig, PagingConfig, SecurityConfig, ValidatedBaseConfig, parse_base_config_json,
    parse_base_config_toml,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
