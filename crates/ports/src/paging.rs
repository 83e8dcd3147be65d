//! Query-layer boundary contract.

use crate::BoxFuture;
use fleen_base_domain::{Page, PageSpec, SearchRequest, SearchResult};
use fleen_base_shared::Result;

/// Source of paged rows for one entity type.
pub trait PageQueryPort<T>: Send + Sync
where
    T: Send + 'static,
{
    /// Fetch the page described by `spec`.
    ///
    /// `request` carries the filters (dates, text, coordinates) that the
    /// implementation applies; paging and sorting come from `spec`.
    fn fetch(&self, spec: &PageSpec, request: &SearchRequest) -> BoxFuture<'_, Result<Page<T>>>;

    /// Fetch the request's page and wrap it as a search result.
    ///
    /// Pages without entries become [`SearchResult::empty`].
    fn search(&self, request: &SearchRequest) -> BoxFuture<'_, Result<SearchResult<T>>> {
        let spec = request.page_spec();
        let fetch = self.fetch(&spec, request);
        Box::pin(async move {
            let page = fetch.await?;
            Ok(SearchResult::from_fetched(Some(page)))
        })
    }
}
