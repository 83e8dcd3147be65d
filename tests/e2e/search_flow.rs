//! Query string to response body, through a storage port.

use fleen_base::api::messages;
use fleen_base::config::load_base_config_from_sources;
use fleen_base::ports::BoxFuture;
use fleen_base::{
    BaseEnv, ErrorEnvelope, Page, PageMetadata, PageQueryPort, PageSpec, SearchRequest,
    search_page, search_request_from_query,
};
use serde_json::json;
use std::error::Error;

struct VideoRows {
    titles: Vec<String>,
}

impl PageQueryPort<String> for VideoRows {
    fn fetch(
        &self,
        spec: &PageSpec,
        request: &SearchRequest,
    ) -> BoxFuture<'_, fleen_base::Result<Page<String>>> {
        let query = request.q.clone();
        let spec = spec.clone();
        Box::pin(async move {
            let matching: Vec<&String> = self
                .titles
                .iter()
                .filter(|title| title.contains(query.as_str()))
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

struct BrokenStore;

impl PageQueryPort<String> for BrokenStore {
    fn fetch(
        &self,
        _spec: &PageSpec,
        _request: &SearchRequest,
    ) -> BoxFuture<'_, fleen_base::Result<Page<String>>> {
        Box::pin(async { Err(ErrorEnvelope::external_system("video store")) })
    }
}

fn videos() -> VideoRows {
    VideoRows {
        titles: (1..=5).map(|index| format!("video-{index}")).collect(),
    }
}

#[tokio::test]
async fn query_string_pages_through_store() -> Result<(), Box<dyn Error>> {
    let config = load_base_config_from_sources(None, None, &BaseEnv::default())?;
    let Ok(request) = search_request_from_query("q=video&pageNo=1&pageSize=2&sortDir=asc", &config)
    else {
        panic!("valid query rejected");
    };

    let Ok(result) = search_page(&videos(), &request).await else {
        panic!("search failed");
    };
    assert_eq!(
        serde_json::to_value(&result)?,
        json!({
            "page_no": 1,
            "page_size": 2,
            "total_entries": 5,
            "total_pages": 3,
            "is_last": false,
            "is_first": false,
            "has_value": true,
            "values": ["video-3", "video-4"]
        })
    );
    Ok(())
}

#[tokio::test]
async fn configured_page_size_applies_when_query_omits_it() -> Result<(), Box<dyn Error>> {
    let config = load_base_config_from_sources(
        Some(r#"{"paging":{"defaultPageSize":3}}"#),
        None,
        &BaseEnv::default(),
    )?;
    let Ok(request) = search_request_from_query("q=video", &config) else {
        panic!("valid query rejected");
    };
    assert_eq!(request.page_size, 3);

    let Ok(result) = search_page(&videos(), &request).await else {
        panic!("search failed");
    };
    assert_eq!(result.values().len(), 3);
    assert_eq!(result.total_pages(), Some(2));
    assert!(result.is_first());
    Ok(())
}

#[tokio::test]
async fn no_matches_serialize_without_counts() -> Result<(), Box<dyn Error>> {
    let config = load_base_config_from_sources(None, None, &BaseEnv::default())?;
    let Ok(request) = search_request_from_query("q=podcast", &config) else {
        panic!("valid query rejected");
    };
    let Ok(result) = search_page(&videos(), &request).await else {
        panic!("search failed");
    };
    assert_eq!(
        serde_json::to_value(&result)?,
        json!({"is_last": false, "is_first": false, "has_value": false, "values": []})
    );
    Ok(())
}

#[test]
fn inverted_dates_come_back_as_field_errors() -> Result<(), Box<dyn Error>> {
    let config = load_base_config_from_sources(None, None, &BaseEnv::default())?;
    let Err(response) =
        search_request_from_query("startDate=2024-06-01&endDate=2024-05-01", &config)
    else {
        panic!("inverted range accepted");
    };
    assert_eq!(response.status, Some(400));
    assert_eq!(response.field_errors.len(), 1);
    assert_eq!(response.field_errors[0].field, "startDate");
    Ok(())
}

#[tokio::test]
async fn store_failures_hide_their_details() {
    let Err(response) = search_page(&BrokenStore, &SearchRequest::default()).await else {
        panic!("broken store returned rows");
    };
    assert_eq!(response.status, Some(500));
    assert_eq!(response.message, messages::DEFAULT_MESSAGE);
}
