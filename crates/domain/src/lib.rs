//! # fleen-base-domain
//!
//! Paging core and value objects for Fleen Historia services.
//!
//! - **Paging** - `PageSpec`, `PageMetadata`, `Page`, `PagingDefaults`
//! - **Search** - `SearchRequest` (inbound), `SearchResult` (outbound)
//! - **Paginator** - `SearchResult::from_page`, `set_page_tokens`, `empty`,
//!   `handle_search_result`
//! - **Constants** - labeled enums, cache key prefixes, security constants
//!
//! ## Dependency Rules
//!
//! - Depends only on `shared` (and its derive crate)
//! - No I/O; every operation is a pure value transformation

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub use fleen_base_shared::shared_crate_version;

// =============================================================================
// DOMAIN MODULES
// =============================================================================

pub mod constants;
pub mod enums;
pub mod paging;
pub mod result;
pub mod search;
pub mod violation;

pub use enums::{
    AuthenticationStage, AuthenticationStatus, BooleanType, DataStoreType, EmailTemplateField,
    ExternalSystemType, MemberStatus, MfaSetupStatus, MfaType, ProfileType,
    ProfileVerificationMessageType, ProfileVerificationStatus, RoleType, TokenClaimField,
    TokenType, UnknownVariant, VerificationMessageType, VideoReviewStatus, VideoSource,
    VideoStatus, VideoVisibility,
};
pub use paging::{
    DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, DEFAULT_SORT_BY, DEFAULT_SORT_DIRECTION, Page,
    PageMetadata, PageSpec, PagingDefaults, PagingError, SortDirection,
};
pub use result::{SearchResult, handle_search_result};
pub use search::SearchRequest;
pub use violation::{
    FIELD_METADATA_PREFIX, FieldViolation, field_metadata_key, field_violations,
    violations_to_envelope,
};

/// Returns the domain crate version.
#[must_use]
pub const fn domain_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_crate_compiles() {
        assert!(!domain_crate_version().is_empty());
        assert_eq!(domain_crate_version(), shared_crate_version());
    }

    #[test]
    fn value_objects_are_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchRequest>();
        assert_send_sync::<SearchResult<String>>();
        assert_send_sync::<Page<String>>();
        assert_send_sync::<PageSpec>();
    }
}
