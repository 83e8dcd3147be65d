//! # fleen-base-ports
//!
//! Boundary traits implemented by the services that consume `fleen-base`.
//!
//! This crate defines the interfaces between the paging core and storage or
//! account lookups. It depends only on `domain` and `shared`.

use std::future::Future;
use std::pin::Pin;

/// Boxed future used by port traits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub mod lookup;
pub mod paging;

pub use lookup::{CountryLookupPort, EmailLookupPort, PhoneLookupPort};
pub use paging::PageQueryPort;

// Re-export the domain types used in port signatures so implementors do not
// need a direct `fleen-base-domain` dependency.
pub use fleen_base_domain::{Page, PageMetadata, PageSpec, SearchRequest, SearchResult};

#[cfg(test)]
mod tests {
    use super::*;
    use fleen_base_domain::domain_crate_version;
    use fleen_base_shared::shared_crate_version;

    fn workspace_deps() -> Vec<String> {
        let cargo_toml = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml"));
        let mut deps = Vec::new();
        let mut in_deps = false;

        for raw_line in cargo_toml.lines() {
            let line = raw_line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('[') {
                in_deps = line == "[dependencies]" || line == "[dev-dependencies]";
                continue;
            }
            if in_deps && line.starts_with("fleen-base-") {
                let key = line.split('=').next().unwrap_or("").trim();
                deps.push(key.split('.').next().unwrap_or("").trim().to_string());
            }
        }

        deps
    }

    #[test]
    fn ports_depends_only_on_domain_and_shared() {
        let deps = workspace_deps();
        let allowed = ["fleen-base-domain", "fleen-base-shared"];

        for dep in &deps {
            assert!(
                allowed.contains(&dep.as_str()),
                "unexpected dependency found: {dep}"
            );
        }
        for expected in allowed {
            assert!(
                deps.iter().any(|dep| dep == expected),
                "missing dependency: {expected}"
            );
        }
    }

    #[test]
    fn ports_can_use_domain_and_shared() {
        assert!(!ports_crate_version().is_empty());
        assert_eq!(domain_crate_version(), shared_crate_version());
    }
}
