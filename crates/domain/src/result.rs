//! Search results and the paginator operations that build them.
//!
//! A result is assembled in two steps: [`SearchResult::from_page`] copies the
//! query layer's metadata, then [`SearchResult::set_page_tokens`] optionally
//! overlays cursor tokens. Flags change only in those two places.

use crate::paging::{Page, PageMetadata, PagingError};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// One page of results as returned to API clients.
///
/// Paging counts are either all present or all absent, and a paged result
/// never holds more values than its page size. Deserialization enforces both.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(
    try_from = "SearchResultWire<T>",
    bound(deserialize = "T: Deserialize<'de>")
)]
pub struct SearchResult<T> {
    page_number: Option<u32>,
    page_size: Option<u32>,
    total_entries: Option<u64>,
    total_pages: Option<u32>,
    is_last: bool,
    is_first: bool,
    next_page_token: Option<String>,
    previous_page_token: Option<String>,
    values: Vec<T>,
}

#[derive(Deserialize)]
struct SearchResultWire<T> {
    #[serde(rename = "page_no", default)]
    page_number: Option<u32>,
    #[serde(default)]
    page_size: Option<u32>,
    #[serde(default)]
    total_entries: Option<u64>,
    #[serde(default)]
    total_pages: Option<u32>,
    #[serde(default)]
    is_last: bool,
    #[serde(default)]
    is_first: bool,
    #[serde(default)]
    next_page_token: Option<String>,
    #[serde(rename = "prev_page_token", default)]
    previous_page_token: Option<String>,
    #[serde(default = "Vec::new")]
    values: Vec<T>,
}

impl<T> TryFrom<SearchResultWire<T>> for SearchResult<T> {
    type Error = PagingError;

    fn try_from(wire: SearchResultWire<T>) -> Result<Self, Self::Error> {
        let counts = (
            wire.page_number,
            wire.page_size,
            wire.total_entries,
            wire.total_pages,
        );
        let mut result = match counts {
            (None, None, None, None) => Self::from_page(wire.values, None)?,
            (Some(page_number), Some(page_size), Some(total_entries), Some(total_pages)) => {
                let metadata = PageMetadata::new(
                    page_number,
                    page_size,
                    total_entries,
                    total_pages,
                    wire.is_first,
                    wire.is_last,
                )?;
                Self::from_page(wire.values, Some(&metadata))?
            },
            _ => return Err(PagingError::IncompleteMetadata),
        };
        result.is_first = wire.is_first;
        result.is_last = wire.is_last;
        result.next_page_token = wire.next_page_token;
        result.previous_page_token = wire.previous_page_token;
        Ok(result)
    }
}

impl<T> SearchResult<T> {
    /// Result for `values`, with counts and flags copied from `metadata`.
    ///
    /// Without metadata only `values` is populated. With metadata, `values`
    /// may not exceed its page size.
    pub fn from_page(
        values: Vec<T>,
        metadata: Option<&PageMetadata>,
    ) -> Result<Self, PagingError> {
        let Some(metadata) = metadata else {
            return Ok(Self {
                values,
                ..Self::empty()
            });
        };
        let page_size = metadata.page_size();
        if u64::try_from(values.len()).unwrap_or(u64::MAX) > u64::from(page_size) {
            return Err(PagingError::PageOverflow {
                values: values.len(),
                page_size,
            });
        }
        Ok(Self::from_metadata(values, metadata))
    }

    fn from_metadata(values: Vec<T>, metadata: &PageMetadata) -> Self {
        Self {
            page_number: Some(metadata.page_number()),
            page_size: Some(metadata.page_size()),
            total_entries: Some(metadata.total_entries()),
            total_pages: Some(metadata.total_pages()),
            is_last: metadata.is_last(),
            is_first: metadata.is_first(),
            next_page_token: None,
            previous_page_token: None,
            values,
        }
    }

    /// Result for a fetched page, or [`Self::empty`] when the page is absent
    /// or reports no entries.
    pub fn from_fetched(page: Option<Page<T>>) -> Self {
        let has_entries = handle_search_result(page.as_ref(), || true, || false);
        match page {
            Some(page) if has_entries => page.into(),
            _ => Self::empty(),
        }
    }

    /// No values, no counts, both flags false.
    pub const fn empty() -> Self {
        Self {
            page_number: None,
            page_size: None,
            total_entries: None,
            total_pages: None,
            is_last: false,
            is_first: false,
            next_page_token: None,
            previous_page_token: None,
            values: Vec::new(),
        }
    }

    /// Store cursor tokens and adjust the flags.
    ///
    /// Only when at least one token is present: a missing `next` marks the
    /// result as last, and a present `previous` clears `is_first`. `is_first`
    /// is never set to true here.
    pub fn set_page_tokens(&mut self, next: Option<String>, previous: Option<String>) {
        self.next_page_token = next;
        self.previous_page_token = previous;
        if self.next_page_token.is_none() && self.previous_page_token.is_none() {
            return;
        }
        if self.next_page_token.is_none() {
            self.is_last = true;
        }
        if self.previous_page_token.is_some() {
            self.is_first = false;
        }
    }

    /// Builder form of [`Self::set_page_tokens`].
    #[must_use]
    pub fn with_page_tokens(mut self, next: Option<String>, previous: Option<String>) -> Self {
        self.set_page_tokens(next, previous);
        self
    }

    /// Convert every value, keeping counts, flags and tokens.
    pub fn map<U, F>(self, mapper: F) -> SearchResult<U>
    where
        F: FnMut(T) -> U,
    {
        SearchResult {
            page_number: self.page_number,
            page_size: self.page_size,
            total_entries: self.total_entries,
            total_pages: self.total_pages,
            is_last: self.is_last,
            is_first: self.is_first,
            next_page_token: self.next_page_token,
            previous_page_token: self.previous_page_token,
            values: self.values.into_iter().map(mapper).collect(),
        }
    }

    /// Zero-based page index, when paged.
    pub const fn page_number(&self) -> Option<u32> {
        self.page_number
    }

    /// Page size, when paged.
    pub const fn page_size(&self) -> Option<u32> {
        self.page_size
    }

    /// Total matching entries, when paged.
    pub const fn total_entries(&self) -> Option<u64> {
        self.total_entries
    }

    /// Total pages, when paged.
    pub const fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    /// First-page flag.
    pub const fn is_first(&self) -> bool {
        self.is_first
    }

    /// Last-page flag.
    pub const fn is_last(&self) -> bool {
        self.is_last
    }

    /// Cursor for the following page.
    pub fn next_page_token(&self) -> Option<&str> {
        self.next_page_token.as_deref()
    }

    /// Cursor for the preceding page.
    pub fn previous_page_token(&self) -> Option<&str> {
        self.previous_page_token.as_deref()
    }

    /// Values in result order.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Take the values.
    pub fn into_values(self) -> Vec<T> {
        self.values
    }

    /// At least one value is present.
    pub const fn has_value(&self) -> bool {
        !self.values.is_empty()
    }
}

impl<T> Default for SearchResult<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<Page<T>> for SearchResult<T> {
    fn from(page: Page<T>) -> Self {
        let (values, metadata) = page.into_parts();
        Self::from_metadata(values, &metadata)
    }
}

impl<T: Serialize> Serialize for SearchResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SearchResult", 10)?;
        serialize_optional(&mut state, "page_no", self.page_number.as_ref())?;
        serialize_optional(&mut state, "page_size", self.page_size.as_ref())?;
        serialize_optional(&mut state, "total_entries", self.total_entries.as_ref())?;
        serialize_optional(&mut state, "total_pages", self.total_pages.as_ref())?;
        state.serialize_field("is_last", &self.is_last)?;
        state.serialize_field("is_first", &self.is_first)?;
        serialize_optional(&mut state, "next_page_token", self.next_page_token.as_ref())?;
        serialize_optional(&mut state, "prev_page_token", self.previous_page_token.as_ref())?;
        state.serialize_field("has_value", &self.has_value())?;
        state.serialize_field("values", &self.values)?;
        state.end()
    }
}

fn serialize_optional<S, V>(state: &mut S, key: &'static str, value: Option<&V>) -> Result<(), S::Error>
where
    S: SerializeStruct,
    V: Serialize + ?Sized,
{
    match value {
        Some(value) => state.serialize_field(key, value),
        None => state.skip_field(key),
    }
}

/// Run `on_results` when `page` holds at least one entry, else `on_empty`.
///
/// ```
/// use fleen_base_domain::{Page, PageMetadata, SearchResult, handle_search_result};
///
/// let page = Page::new(vec!["a"], PageMetadata::from_counts(0, 10, 1)?)?;
/// let result = handle_search_result(Some(&page), || SearchResult::from(page.clone()), SearchResult::empty);
/// assert!(result.has_value());
///
/// let nothing = handle_search_result(None::<&Page<&str>>, || unreachable!(), SearchResult::<&str>::empty);
/// assert!(!nothing.has_value());
/// # Ok::<(), fleen_base_domain::PagingError>(())
/// ```
pub fn handle_search_result<P, R, F, G>(page: Option<&Page<P>>, on_results: F, on_empty: G) -> R
where
    F: FnOnce() -> R,
    G: FnOnce() -> R,
{
    match page {
        Some(page) if page.total_entries() > 0 => on_results(),
        _ => on_empty(),
    }
}
