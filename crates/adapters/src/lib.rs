//! # fleen-base-adapters
//!
//! Runtime pieces that touch the outside world: the base HTTP adapter, auth
//! header helpers, field encryption, tracing setup and lookup-backed field
//! checks.
//! This crate depends on `config`, `domain`, `ports`, and `shared`.

pub mod auth;
pub mod crypto;
pub mod existence;
pub mod http;
pub mod logging;

pub use auth::{BASIC_PREFIX, BEARER_PREFIX, BearerTokenError, bearer_token, is_bearer_token};
pub use crypto::{CipherError, FieldCipher};
pub use existence::{check_country_exists, check_email_not_taken, check_phone_not_taken};
pub use http::{
    ApiParameter, BaseAdapter, BaseEndpointBlock, EndpointBlock, Headers, HttpResponse, Method,
    payload_body_as_string,
};
pub use logging::init_tracing;

/// Returns the adapters crate version.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
