//! # fleen-base-shared
//!
//! Foundational types used by every other `fleen-base` crate:
//!
//! - The error envelope, stable error codes and guard helpers
//! - Validation traits plus the predicates `#[derive(Validate)]` expands into
//! - Text, number and date/time utilities
//! - Secret redaction
//!
//! ## Design Principles
//!
//! 1. **No workspace dependencies** - This crate only depends on external crates
//! 2. **Pure helpers** - Nothing here performs I/O
//! 3. **Serde-compatible** - Public data types support serialization

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

// =============================================================================
// ERRORS + RESULTS
// =============================================================================

pub mod errors;
pub mod invariants;
pub mod redaction;
pub mod result;

// =============================================================================
// VALIDATION
// =============================================================================

pub mod labels;
pub mod validation;
pub mod validators;

// =============================================================================
// UTILITIES
// =============================================================================

pub mod datetime;
pub mod numbers;
pub mod text;

pub use errors::{
    ErrorClass, ErrorCode, ErrorEnvelope, ErrorKind, ErrorMetadata, REDACTED_VALUE,
    redact_metadata,
};
pub use invariants::{BoundedU32, BoundedU64, BoundsError, Validated};
pub use labels::LabeledEnum;
pub use redaction::{REDACTED, SecretString, is_secret_key, redact_if_secret};
pub use result::{Result, ensure_all_present, ensure_false, ensure_present, ensure_true};
pub use text::set_if_present;
pub use validation::{Validate, ValidationError};

/// Returns the shared crate version.
#[must_use]
pub const fn shared_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// =============================================================================
// TESTS
// =============================================================================
