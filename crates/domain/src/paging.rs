//! Page specifications, page metadata and paging defaults.

use fleen_base_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Built-in default page number.
pub const DEFAULT_PAGE_NUMBER: u32 = 0;
/// Built-in default page size.
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// Built-in default sort field.
pub const DEFAULT_SORT_BY: &str = "updatedOn";
/// Built-in default sort direction.
pub const DEFAULT_SORT_DIRECTION: &str = "DESC";

/// Failures building paging value objects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagingError {
    /// Page size must be at least 1.
    ZeroPageSize,
    /// `total_pages` and `total_entries` disagree about emptiness.
    InconsistentTotals {
        /// Reported entry count.
        total_entries: u64,
        /// Reported page count.
        total_pages: u32,
    },
    /// A page holds more values than its size allows.
    PageOverflow {
        /// Number of values supplied.
        values: usize,
        /// Declared page size.
        page_size: u32,
    },
    /// Some paging counts were supplied and others were missing.
    IncompleteMetadata,
}

impl PagingError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::ZeroPageSize => ErrorCode::new("domain", "invalid_page_size"),
            Self::InconsistentTotals { .. } => ErrorCode::new("domain", "inconsistent_page_totals"),
            Self::PageOverflow { .. } => ErrorCode::new("domain", "page_overflow"),
            Self::IncompleteMetadata => ErrorCode::new("domain", "incomplete_page_metadata"),
        }
    }
}

impl fmt::Display for PagingError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroPageSize => formatter.write_str("page size must be >= 1"),
            Self::InconsistentTotals {
                total_entries,
                total_pages,
            } => write!(
                formatter,
                "total pages ({total_pages}) and total entries ({total_entries}) must both be zero or both be positive"
            ),
            Self::PageOverflow { values, page_size } => write!(
                formatter,
                "page holds {values} values but its size is {page_size}"
            ),
            Self::IncompleteMetadata => formatter.write_str(
                "page number, page size, total entries and total pages must be given together",
            ),
        }
    }
}

impl std::error::Error for PagingError {}

impl From<PagingError> for ErrorEnvelope {
    fn from(error: PagingError) -> Self {
        let code = error.error_code();
        let envelope = Self::invariant(code, error.to_string());
        match error {
            PagingError::ZeroPageSize | PagingError::IncompleteMetadata => envelope,
            PagingError::InconsistentTotals {
                total_entries,
                total_pages,
            } => envelope
                .with_metadata("total_entries", total_entries.to_string())
                .with_metadata("total_pages", total_pages.to_string()),
            PagingError::PageOverflow { values, page_size } => envelope
                .with_metadata("values", values.to_string())
                .with_metadata("page_size", page_size.to_string()),
        }
    }
}

/// Sort order applied by the query layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortDirection {
    /// `ASC` in any case is ascending; anything else is descending.
    ///
    /// ```
    /// use fleen_base_domain::SortDirection;
    ///
    /// assert_eq!(SortDirection::parse("asc"), SortDirection::Asc);
    /// assert_eq!(SortDirection::parse("garbage"), SortDirection::Desc);
    /// ```
    #[must_use]
    pub fn parse(token: &str) -> Self {
        if token.eq_ignore_ascii_case("ASC") {
            Self::Asc
        } else {
            Self::Desc
        }
    }

    /// Upper-case token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Zero-based page request handed to the query layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSpec {
    /// Zero-based page index.
    pub page_number: u32,
    /// Rows per page.
    pub page_size: u32,
    /// Field to sort by. Not checked against an allow-list.
    pub sort_by: String,
    /// Sort order.
    pub direction: SortDirection,
}

impl PageSpec {
    /// Build a spec; `sort_direction` goes through [`SortDirection::parse`].
    pub fn new(
        page_number: u32,
        page_size: u32,
        sort_by: impl Into<String>,
        sort_direction: &str,
    ) -> Self {
        Self {
            page_number,
            page_size,
            sort_by: sort_by.into(),
            direction: SortDirection::parse(sort_direction),
        }
    }

    /// Row offset of the first entry on this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page_number) * u64::from(self.page_size)
    }
}

/// Counts and flags reported by the query layer for one page.
///
/// Deserialization goes through [`PageMetadata::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "PageMetadataWire")]
pub struct PageMetadata {
    is_first: bool,
    is_last: bool,
    total_pages: u32,
    total_entries: u64,
    page_number: u32,
    page_size: u32,
}

impl PageMetadata {
    /// Validated constructor.
    ///
    /// `total_pages` is zero exactly when `total_entries` is zero, and
    /// `page_size` is at least 1.
    pub const fn new(
        page_number: u32,
        page_size: u32,
        total_entries: u64,
        total_pages: u32,
        is_first: bool,
        is_last: bool,
    ) -> Result<Self, PagingError> {
        if page_size == 0 {
            return Err(PagingError::ZeroPageSize);
        }
        if (total_entries == 0) != (total_pages == 0) {
            return Err(PagingError::InconsistentTotals {
                total_entries,
                total_pages,
            });
        }
        Ok(Self {
            is_first,
            is_last,
            total_pages,
            total_entries,
            page_number,
            page_size,
        })
    }

    /// Derive page count and flags from offset paging counts.
    ///
    /// ```
    /// use fleen_base_domain::PageMetadata;
    ///
    /// let metadata = PageMetadata::from_counts(1, 10, 25)?;
    /// assert_eq!(metadata.total_pages(), 3);
    /// assert!(!metadata.is_first());
    /// assert!(!metadata.is_last());
    /// # Ok::<(), fleen_base_domain::PagingError>(())
    /// ```
    pub fn from_counts(
        page_number: u32,
        page_size: u32,
        total_entries: u64,
    ) -> Result<Self, PagingError> {
        if page_size == 0 {
            return Err(PagingError::ZeroPageSize);
        }
        let total_pages = u32::try_from(total_entries.div_ceil(u64::from(page_size)))
            .unwrap_or(u32::MAX);
        let is_last = u64::from(page_number) + 1 >= u64::from(total_pages);
        Self::new(
            page_number,
            page_size,
            total_entries,
            total_pages,
            page_number == 0,
            is_last,
        )
    }

    /// True on the first page.
    #[must_use]
    pub const fn is_first(&self) -> bool {
        self.is_first
    }

    /// True on the last page.
    #[must_use]
    pub const fn is_last(&self) -> bool {
        self.is_last
    }

    /// Number of pages.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Number of entries across all pages.
    #[must_use]
    pub const fn total_entries(&self) -> u64 {
        self.total_entries
    }

    /// Zero-based page index.
    #[must_use]
    pub const fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Requested page size.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageMetadataWire {
    is_first: bool,
    is_last: bool,
    total_pages: u32,
    total_entries: u64,
    page_number: u32,
    page_size: u32,
}

impl TryFrom<PageMetadataWire> for PageMetadata {
    type Error = PagingError;

    fn try_from(wire: PageMetadataWire) -> Result<Self, Self::Error> {
        Self::new(
            wire.page_number,
            wire.page_size,
            wire.total_entries,
            wire.total_pages,
            wire.is_first,
            wire.is_last,
        )
    }
}

/// One page of values plus its metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    values: Vec<T>,
    metadata: PageMetadata,
}

impl<T> Page<T> {
    /// Build a page; `values` may not exceed the page size.
    pub fn new(values: Vec<T>, metadata: PageMetadata) -> Result<Self, PagingError> {
        let page_size = metadata.page_size();
        if u64::try_from(values.len()).unwrap_or(u64::MAX) > u64::from(page_size) {
            return Err(PagingError::PageOverflow {
                values: values.len(),
                page_size,
            });
        }
        Ok(Self { values, metadata })
    }

    /// Values on this page.
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Page metadata.
    #[must_use]
    pub const fn metadata(&self) -> &PageMetadata {
        &self.metadata
    }

    /// Total entries across all pages.
    #[must_use]
    pub const fn total_entries(&self) -> u64 {
        self.metadata.total_entries
    }

    /// Map every value, keeping the metadata.
    pub fn map<U, F>(self, mapper: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            values: self.values.into_iter().map(mapper).collect(),
            metadata: self.metadata,
        }
    }

    /// Split into values and metadata.
    pub fn into_parts(self) -> (Vec<T>, PageMetadata) {
        (self.values, self.metadata)
    }
}

/// Values a [`crate::SearchRequest`] starts from when the client omits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagingDefaults {
    /// Default zero-based page index.
    pub page_number: u32,
    /// Default page size.
    pub page_size: u32,
    /// Default sort field.
    pub sort_by: String,
    /// Default sort direction token.
    pub sort_direction: String,
}

impl Default for PagingDefaults {
    fn default() -> Self {
        Self {
            page_number: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
            sort_by: DEFAULT_SORT_BY.to_string(),
            sort_direction: DEFAULT_SORT_DIRECTION.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::error::Error;

    #[test]
    fn sort_direction_defaults_to_descending() {
        assert_eq!(SortDirection::parse("ASC"), SortDirection::Asc);
        assert_eq!(SortDirection::parse("aSc"), SortDirection::Asc);
        assert_eq!(SortDirection::parse("DESC"), SortDirection::Desc);
        assert_eq!(SortDirection::parse(""), SortDirection::Desc);
        assert_eq!(SortDirection::parse("ascending"), SortDirection::Desc);
    }

    #[test]
    fn page_spec_offset() {
        let spec = PageSpec::new(3, 25, "createdOn", "asc");
        assert_eq!(spec.offset(), 75);
        assert_eq!(spec.direction, SortDirection::Asc);
    }

    #[test]
    fn metadata_rejects_inconsistent_totals() {
        assert_eq!(
            PageMetadata::new(0, 10, 0, 1, true, true),
            Err(PagingError::InconsistentTotals {
                total_entries: 0,
                total_pages: 1
            })
        );
        assert_eq!(
            PageMetadata::new(0, 10, 5, 0, true, true),
            Err(PagingError::InconsistentTotals {
                total_entries: 5,
                total_pages: 0
            })
        );
        assert_eq!(
            PageMetadata::new(0, 0, 0, 0, true, true),
            Err(PagingError::ZeroPageSize)
        );
    }

    #[test]
    fn page_rejects_overflow() -> Result<(), Box<dyn Error>> {
        let metadata = PageMetadata::new(0, 2, 3, 2, true, false)?;
        assert!(Page::new(vec![1, 2], metadata).is_ok());
        assert_eq!(
            Page::new(vec![1, 2, 3], metadata),
            Err(PagingError::PageOverflow {
                values: 3,
                page_size: 2
            })
        );
        Ok(())
    }

    #[test]
    fn metadata_deserialization_is_validated() -> Result<(), Box<dyn Error>> {
        let metadata: PageMetadata = serde_json::from_str(
            r#"{"isFirst":true,"isLast":false,"totalPages":3,"totalEntries":25,"pageNumber":0,"pageSize":10}"#,
        )?;
        assert_eq!(metadata, PageMetadata::from_counts(0, 10, 25)?);

        let inconsistent = serde_json::from_str::<PageMetadata>(
            r#"{"isFirst":true,"isLast":true,"totalPages":7,"totalEntries":0,"pageNumber":0,"pageSize":10}"#,
        );
        assert!(inconsistent.is_err());
        Ok(())
    }

    #[test]
    fn paging_errors_become_invariant_envelopes() {
        let envelope = ErrorEnvelope::from(PagingError::InconsistentTotals {
            total_entries: 0,
            total_pages: 4,
        });
        assert_eq!(envelope.kind, fleen_base_shared::ErrorKind::Invariant);
        assert_eq!(envelope.code.to_string(), "domain:inconsistent_page_totals");
        assert_eq!(
            envelope.metadata.get("total_pages").map(String::as_str),
            Some("4")
        );
    }

    #[test]
    fn empty_result_set_has_no_pages() -> Result<(), Box<dyn Error>> {
        let metadata = PageMetadata::from_counts(0, 10, 0)?;
        assert_eq!(metadata.total_pages(), 0);
        assert!(metadata.is_first());
        assert!(metadata.is_last());
        Ok(())
    }

    proptest! {
        #[test]
        fn derived_totals_are_consistent(
            page_number in 0_u32..100,
            page_size in 1_u32..1000,
            total_entries in 0_u64..1_000_000,
        ) {
            let metadata = PageMetadata::from_counts(page_number, page_size, total_entries);
            prop_assert!(metadata.is_ok());
            if let Ok(metadata) = metadata {
                prop_assert_eq!(metadata.total_entries() == 0, metadata.total_pages() == 0);
                prop_assert!(u64::from(metadata.total_pages()) * u64::from(page_size) >= total_entries);
            }
        }
    }
}
