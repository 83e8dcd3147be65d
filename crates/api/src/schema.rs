//! JSON Schema exports for the wire bodies.

use crate::{ApiResponse, EnumView, ErrorResponse};
use schemars::{Schema, schema_for};

/// JSON Schema for [`ErrorResponse`].
#[must_use]
pub fn error_response_schema() -> Schema {
    schema_for!(ErrorResponse)
}

/// JSON Schema for [`ApiResponse`].
#[must_use]
pub fn api_response_schema() -> Schema {
    schema_for!(ApiResponse)
}

/// JSON Schema for [`EnumView`].
#[must_use]
pub fn enum_view_schema() -> Schema {
    schema_for!(EnumView)
}
