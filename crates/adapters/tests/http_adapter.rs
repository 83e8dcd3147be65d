//! Base HTTP adapter against a mock server.

use fleen_base_adapters::{BaseAdapter, BaseEndpointBlock};
use fleen_base_config::HttpConfig;
use fleen_base_shared::{ErrorCode, Result};
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use std::io;
use std::sync::{Arc, Mutex};
use tracing::level_filters::LevelFilter;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Deserialize, PartialEq)]
struct Channel {
    id: String,
    title: String,
}

fn adapter_for(server: &MockServer) -> Result<BaseAdapter> {
    BaseAdapter::from_config(&HttpConfig {
        base_url: Some(server.uri()),
        timeout_ms: 5_000,
    })
}

#[tokio::test]
async fn json_call_sends_headers_and_decodes() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/channels/UC42"))
        .and(query_param("part", "snippet"))
        .and(header("authorization", "Bearer example"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"title": "Night Jazz"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "UC42", "title": "Night Jazz"})),
        )
        .mount(&server)
        .await;

    let adapter = adapter_for(&server)?;
    let channels = BaseEndpointBlock::new("/channels");
    let uri = adapter.build_uri_with_query(
        [("part", "snippet")],
        &[&channels, &BaseAdapter::path_var("UC42")],
    )?;
    let headers = BaseAdapter::auth_header_with_bearer_token("example");

    let channel: Channel = adapter
        .do_call_json(
            &uri,
            Method::POST,
            Some(&headers),
            Some(&json!({"title": "Night Jazz"})),
        )
        .await?;
    assert_eq!(
        channel,
        Channel {
            id: "UC42".to_string(),
            title: "Night Jazz".to_string(),
        }
    );
    Ok(())
}

#[tokio::test]
async fn error_status_is_returned_with_its_body() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/videos/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .insert_header("x-request-id", "r-1")
                .set_body_string(r#"{"error":"not found"}"#),
        )
        .mount(&server)
        .await;

    let adapter = adapter_for(&server)?;
    let uri = adapter.build_uri(&[&"/videos", &BaseAdapter::path_var("missing")])?;
    let response = adapter.do_call(&uri, Method::GET, None, None).await?;

    assert_eq!(response.status, 404);
    assert!(!response.is_success());
    assert_eq!(response.body, r#"{"error":"not found"}"#);
    assert_eq!(response.headers.get("x-request-id").map(String::as_str), Some("r-1"));
    Ok(())
}

#[tokio::test]
async fn json_call_rejects_error_statuses() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let adapter = adapter_for(&server)?;
    let uri = adapter.build_uri(&[&"/health"])?;
    let Err(error) = adapter
        .do_call_json::<serde_json::Value>(&uri, Method::GET, None, None)
        .await
    else {
        panic!("503 decoded as success");
    };
    assert_eq!(error.code, ErrorCode::external_system());
    assert_eq!(error.metadata.get("status").map(String::as_str), Some("503"));
    assert_eq!(error.metadata.get("body").map(String::as_str), Some("maintenance"));
    Ok(())
}

#[tokio::test]
async fn string_bodies_are_sent_verbatim() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/notes"))
        .and(wiremock::matchers::body_string("plain text"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let adapter = adapter_for(&server)?;
    let uri = adapter.build_uri(&[&"/notes"])?;
    let response = adapter
        .do_call(&uri, Method::PUT, None, Some(&json!("plain text")))
        .await?;
    assert_eq!(response.status, 204);
    assert!(response.body.is_empty());
    Ok(())
}

#[tokio::test]
async fn unreachable_host_is_an_external_failure() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let address = listener.local_addr()?;
    drop(listener);

    let adapter = BaseAdapter::new(format!("http://{address}"), reqwest::Client::new())?;
    let uri = adapter.build_uri(&[&"/gone"])?;
    let Err(error) = adapter.do_call(&uri, Method::GET, None, None).await else {
        panic!("call to a closed port succeeded");
    };
    assert_eq!(error.code, ErrorCode::external_system());
    Ok(())
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn text(&self) -> String {
        self.0
            .lock()
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .unwrap_or_default()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(mut bytes) = self.0.lock() {
            bytes.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn request_bodies_stay_out_of_info_logs() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sign-up"))
        .respond_with(ResponseTemplate::new(400).set_body_string("rejected"))
        .mount(&server)
        .await;

    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(LevelFilter::INFO)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let adapter = adapter_for(&server)?;
    let uri = adapter.build_uri(&[&"/sign-up"])?;
    let response = adapter
        .do_call(
            &uri,
            Method::POST,
            None,
            Some(&json!({"password": "hunter2-Secret!"})),
        )
        .await?;
    assert_eq!(response.status, 400);

    let text = logs.text();
    assert!(text.contains("HTTP call"));
    assert!(!text.contains("hunter2-Secret!"));
    Ok(())
}
