//! In-memory implementations exercising the port contracts.

use fleen_base_ports::{
    BoxFuture, CountryLookupPort, EmailLookupPort, Page, PageMetadata, PageQueryPort, PageSpec,
    SearchRequest,
};
use fleen_base_shared::{ErrorCode, ErrorEnvelope, Result};
use std::collections::BTreeSet;
use std::error::Error;

struct InMemoryRows {
    rows: Vec<String>,
}

impl PageQueryPort<String> for InMemoryRows {
    fn fetch(&self, spec: &PageSpec, request: &SearchRequest) -> BoxFuture<'_, Result<Page<String>>> {
        let query = request.q.clone();
        let spec = spec.clone();
        Box::pin(async move {
            let matching: Vec<&String> = self
                .rows
                .iter()
                .filter(|row| row.contains(query.as_str()))
                .collect();
            let total = u64::try_from(matching.len()).unwrap_or(u64::MAX);
            let skip = usize::try_from(spec.offset()).unwrap_or(usize::MAX);
            let take = usize::try_from(spec.page_size).unwrap_or(usize::MAX);
            let values = matching.into_iter().skip(skip).take(take).cloned().collect();
            let metadata = PageMetadata::from_counts(spec.page_number, spec.page_size, total)?;
            Ok(Page::new(values, metadata)?)
        })
    }
}

struct KnownEmails(BTreeSet<&'static str>);

impl EmailLookupPort for KnownEmails {
    fn email_exists(&self, email: &str) -> BoxFuture<'_, Result<bool>> {
        let found = self.0.contains(email);
        Box::pin(async move { Ok(found) })
    }
}

struct UnreachableCountries;

impl CountryLookupPort for UnreachableCountries {
    fn country_exists(&self, _country: &str) -> BoxFuture<'_, Result<bool>> {
        Box::pin(async { Err(ErrorEnvelope::external_system("country directory")) })
    }
}

fn rows() -> InMemoryRows {
    InMemoryRows {
        rows: (1..=7).map(|index| format!("video-{index}")).collect(),
    }
}

#[tokio::test]
async fn search_pages_through_rows() -> std::result::Result<(), Box<dyn Error>> {
    let port = rows();
    let mut request = SearchRequest::default();
    request.update_page_size(3);
    request.page_no = 2;

    let result = port.search(&request).await?;
    assert_eq!(result.values(), ["video-7".to_string()]);
    assert_eq!(result.total_pages(), Some(3));
    assert!(result.is_last());
    assert!(!result.is_first());
    Ok(())
}

#[tokio::test]
async fn search_without_matches_is_empty() -> std::result::Result<(), Box<dyn Error>> {
    let port = rows();
    let request = SearchRequest {
        q: "podcast".to_string(),
        ..SearchRequest::default()
    };

    let result = port.search(&request).await?;
    assert!(!result.has_value());
    assert_eq!(result.total_entries(), None);
    Ok(())
}

#[tokio::test]
async fn paging_errors_surface_as_envelopes() {
    let port = rows();
    let mut request = SearchRequest::default();
    request.update_page_size(0);

    let Err(error) = port.search(&request).await else {
        panic!("zero page size was accepted");
    };
    assert_eq!(error.code, ErrorCode::new("domain", "invalid_page_size"));
}

#[tokio::test]
async fn lookups_report_presence_and_failures() -> std::result::Result<(), Box<dyn Error>> {
    let emails = KnownEmails(BTreeSet::from(["taken@fleen.io"]));
    assert!(emails.email_exists("taken@fleen.io").await?);
    assert!(!emails.email_exists("free@fleen.io").await?);

    let countries: &dyn CountryLookupPort = &UnreachableCountries;
    assert!(countries.country_exists("Ghana").await.is_err());
    Ok(())
}
