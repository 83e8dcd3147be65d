//! # fleen-base-api
//!
//! Wire contracts shared by Fleen services: the error body, the base success
//! body, enum views, and search query binding.
//! This crate depends only on `domain` and `shared`.

mod error_response;
mod mappers;
pub mod messages;
mod query;
mod response;
mod schema;
mod status;

pub use error_response::{ErrorResponse, ErrorType, FieldError};
pub use mappers::{
    error_envelope_to_response, result_to_response, status_for_error,
    violations_to_error_response,
};
pub use query::{QueryBindingError, bind_search_request, bind_validated_search_request};
pub use response::{ApiResponse, EnumView};
pub use schema::{api_response_schema, enum_view_schema, error_response_schema};
pub use status::HttpStatus;

/// Returns the api crate version.
#[must_use]
pub const fn api_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
