//! # fleen-base
//!
//! Umbrella crate for services built on the Fleen base library. Each layer
//! is re-exported under its own module; the most used types are also
//! re-exported at the root.
//!
//! ```
//! use fleen_base::{PagingDefaults, bind_search_request};
//!
//! let request = bind_search_request("pageNo=1&pageSize=5", &PagingDefaults::default())?;
//! let spec = request.page_spec();
//! assert_eq!(spec.offset(), 5);
//! # Ok::<(), fleen_base::api::QueryBindingError>(())
//! ```

pub use fleen_base_adapters as adapters;
pub use fleen_base_api as api;
pub use fleen_base_config as config;
pub use fleen_base_domain as domain;
pub use fleen_base_ports as ports;
pub use fleen_base_shared as shared;

pub use fleen_base_adapters::{BaseAdapter, FieldCipher, HttpResponse, init_tracing};
pub use fleen_base_api::{
    ApiResponse, EnumView, ErrorResponse, HttpStatus, bind_search_request,
    error_envelope_to_response, violations_to_error_response,
};
pub use fleen_base_config::{BaseConfig, BaseEnv, ValidatedBaseConfig};
pub use fleen_base_domain::{
    Page, PageMetadata, PageSpec, PagingDefaults, SearchRequest, SearchResult, SortDirection,
    handle_search_result,
};
pub use fleen_base_ports::PageQueryPort;
pub use fleen_base_shared::{ErrorCode, ErrorEnvelope, LabeledEnum, Result, Validate};

use std::collections::BTreeMap;
use std::path::Path;

/// Returns the facade crate version.
#[must_use]
pub const fn facade_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Load and validate the effective config from an env snapshot, returning
/// pretty JSON with secrets redacted.
pub fn load_effective_config_json(
    env: &BTreeMap<String, String>,
    config_path: Option<&Path>,
    overrides_json: Option<&str>,
) -> Result<String> {
    let env = BaseEnv::from_map(env).map_err(ErrorEnvelope::from)?;
    let config = fleen_base_config::load_base_config_from_path(config_path, overrides_json, &env)?;
    fleen_base_config::to_pretty_json(config.as_ref())
}

/// Bind and validate a search query using the configured paging defaults.
///
/// Failures come back ready to send as a 400 body.
pub fn search_request_from_query(
    query: &str,
    config: &ValidatedBaseConfig,
) -> std::result::Result<SearchRequest, ErrorResponse> {
    fleen_base_api::bind_validated_search_request(query, &config.paging_defaults())
        .map_err(|error| error_envelope_to_response(&error))
}

/// Run `request` against `port` and map failures to an error body.
pub async fn search_page<T, P>(
    port: &P,
    request: &SearchRequest,
) -> std::result::Result<SearchResult<T>, ErrorResponse>
where
    T: Send + 'static,
    P: PageQueryPort<T> + ?Sized,
{
    let result = port.search(request).await;
    if let Err(error) = &result {
        tracing::debug!(code = %error.code, "search failed");
    }
    fleen_base_api::result_to_response(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_layer_shares_one_version() {
        assert_eq!(facade_crate_version(), shared::shared_crate_version());
        assert_eq!(facade_crate_version(), domain::domain_crate_version());
        assert_eq!(facade_crate_version(), ports::ports_crate_version());
        assert_eq!(facade_crate_version(), config::config_crate_version());
        assert_eq!(facade_crate_version(), api::api_crate_version());
        assert_eq!(facade_crate_version(), adapters::adapters_crate_version());
    }

    #[test]
    fn effective_config_uses_env_snapshot() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let env = BTreeMap::from([(
            "FLEEN_PAGING_DEFAULT_SORT_BY".to_string(),
            "createdOn".to_string(),
        )]);
        let json = load_effective_config_json(&env, None, None)?;
        assert!(json.contains("\"defaultSortBy\": \"createdOn\""));
        Ok(())
    }

    #[test]
    fn query_errors_become_bad_requests() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let config = fleen_base_config::load_base_config_from_sources(None, None, &BaseEnv::default())?;
        let Err(response) = search_request_from_query("pageSize=0", &config) else {
            panic!("zero page size accepted");
        };
        assert_eq!(response.status, Some(400));
        Ok(())
    }
}
