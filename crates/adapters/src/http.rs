//! Base HTTP adapter for calling external systems.

use crate::auth::bearer_token;
use fleen_base_config::HttpConfig;
use fleen_base_shared::{ErrorClass, ErrorCode, ErrorEnvelope, Result};
pub use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use url::Url;

/// Extra request headers, name to value.
pub type Headers = BTreeMap<String, String>;

/// A path segment appended to the base URL.
pub trait EndpointBlock {
    /// Segment text, including its leading `/`.
    fn value(&self) -> &str;
}

/// A query parameter key.
pub trait ApiParameter {
    /// Wire name of the parameter.
    fn value(&self) -> &str;
}

impl EndpointBlock for &str {
    fn value(&self) -> &str {
        self
    }
}

impl ApiParameter for &str {
    fn value(&self) -> &str {
        self
    }
}

/// Owned [`EndpointBlock`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseEndpointBlock(String);

impl BaseEndpointBlock {
    /// Wrap a segment.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl EndpointBlock for BaseEndpointBlock {
    fn value(&self) -> &str {
        &self.0
    }
}

/// Status, headers and raw body of a completed call.
///
/// Error statuses are reported here rather than as `Err`, so callers can read
/// the remote error body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Numeric status.
    pub status: u16,
    /// Response headers (lower-case names; repeated headers keep the last value).
    pub headers: Headers,
    /// Body as text.
    pub body: String,
}

impl HttpResponse {
    /// 2xx status.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, 200..=299)
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|error| {
            ErrorEnvelope::unexpected(
                ErrorCode::new("http", "invalid_response"),
                format!("failed to decode response body: {error}"),
                ErrorClass::NonRetriable,
            )
            .with_metadata("status", self.status.to_string())
        })
    }
}

/// Shared plumbing for adapters that talk to one external base URL.
#[derive(Clone)]
pub struct BaseAdapter {
    base_url: String,
    client: reqwest::Client,
}

impl fmt::Debug for BaseAdapter {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("BaseAdapter")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl BaseAdapter {
    /// Adapter over an existing client.
    pub fn new(base_url: impl Into<String>, client: reqwest::Client) -> Result<Self> {
        let base_url = base_url.into().trim().to_string();
        if base_url.is_empty() {
            return Err(ErrorEnvelope::expected(
                ErrorCode::invalid_input(),
                "base url must be non-empty",
            ));
        }
        Ok(Self { base_url, client })
    }

    /// Adapter with its own client using the configured base URL and timeout.
    pub fn from_config(config: &HttpConfig) -> Result<Self> {
        let Some(base_url) = config.base_url.as_deref() else {
            return Err(ErrorEnvelope::expected(
                ErrorCode::invalid_input(),
                "http.baseUrl is required for the HTTP adapter",
            ));
        };
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|error| {
                ErrorEnvelope::unexpected(
                    ErrorCode::new("http", "client_init_failed"),
                    format!("failed to build HTTP client: {error}"),
                    ErrorClass::NonRetriable,
                )
            })?;
        Self::new(base_url, client)
    }

    /// Base URL every URI starts from.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Base URL followed by each block, in order.
    pub fn build_uri(&self, blocks: &[&dyn EndpointBlock]) -> Result<Url> {
        let mut raw = self.base_url.clone();
        for block in blocks {
            raw.push_str(block.value());
        }
        Url::parse(&raw).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("http", "invalid_uri"),
                format!("invalid request URI: {error}"),
            )
            .with_metadata("uri", raw)
        })
    }

    /// [`Self::build_uri`] plus encoded query parameters.
    ///
    /// ```
    /// use fleen_base_adapters::http::{BaseAdapter, EndpointBlock};
    ///
    /// let adapter = BaseAdapter::new("https://api.youtube.test/v3", reqwest::Client::new())?;
    /// let uri = adapter.build_uri_with_query(
    ///     [("part", "snippet"), ("q", "late night jazz")],
    ///     &[&"/search", &BaseAdapter::path_var(7)],
    /// )?;
    /// assert_eq!(
    ///     uri.as_str(),
    ///     "https://api.youtube.test/v3/search/7?part=snippet&q=late+night+jazz"
    /// );
    /// # Ok::<(), fleen_base_shared::ErrorEnvelope>(())
    /// ```
    pub fn build_uri_with_query<K, V, I>(
        &self,
        params: I,
        blocks: &[&dyn EndpointBlock],
    ) -> Result<Url>
    where
        I: IntoIterator<Item = (K, V)>,
        K: ApiParameter,
        V: AsRef<str>,
    {
        let mut uri = self.build_uri(blocks)?;
        {
            let mut query = uri.query_pairs_mut();
            for (key, value) in params {
                query.append_pair(key.value(), value.as_ref());
            }
        }
        Ok(uri)
    }

    /// `/<value>` block.
    pub fn path_var(value: impl fmt::Display) -> BaseEndpointBlock {
        BaseEndpointBlock::new(format!("/{value}"))
    }

    /// Headers sent on every call.
    #[must_use]
    pub fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    /// `Authorization: <value>`.
    #[must_use]
    pub fn auth_header(value: &str) -> Headers {
        Headers::from([(AUTHORIZATION.as_str().to_string(), value.to_string())])
    }

    /// `Authorization: Bearer <token>`.
    #[must_use]
    pub fn auth_header_with_bearer_token(token: &str) -> Headers {
        Self::auth_header(&bearer_token(token))
    }

    /// Perform a call and return whatever the remote sent.
    ///
    /// Request bodies are only logged at `debug`; they may carry credentials.
    /// Transport failures (connect, timeout) are errors; HTTP error statuses
    /// are not.
    pub async fn do_call(
        &self,
        uri: &Url,
        method: Method,
        headers: Option<&Headers>,
        body: Option<&Value>,
    ) -> Result<HttpResponse> {
        let payload = body.map(payload_body_as_string).unwrap_or_default();
        tracing::info!(url = %uri, method = %method, "HTTP call");
        tracing::debug!(url = %uri, body = %payload, "HTTP call body");

        let mut request_headers = Self::default_headers();
        if let Some(headers) = headers {
            merge_headers(&mut request_headers, headers)?;
        }

        let mut request = self
            .client
            .request(method.clone(), uri.clone())
            .headers(request_headers);
        if body.is_some() {
            request = request.body(payload.clone());
        }

        let response = request
            .send()
            .await
            .map_err(|error| map_transport_error(&error, uri))?;
        let status = response.status();
        let response_headers: Headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let text = response
            .text()
            .await
            .map_err(|error| map_transport_error(&error, uri))?;

        if !status.is_success() {
            tracing::error!(
                url = %uri,
                method = %method,
                status = status.as_u16(),
                error_body = %text,
                "HTTP call returned an error status"
            );
        }

        Ok(HttpResponse {
            status: status.as_u16(),
            headers: response_headers,
            body: text,
        })
    }

    /// [`Self::do_call`] decoding a success body as `T`.
    ///
    /// Error statuses become `external:system_failure` carrying the status
    /// and body.
    pub async fn do_call_json<T: DeserializeOwned>(
        &self,
        uri: &Url,
        method: Method,
        headers: Option<&Headers>,
        body: Option<&Value>,
    ) -> Result<T> {
        let response = self.do_call(uri, method, headers, body).await?;
        if !response.is_success() {
            return Err(ErrorEnvelope::external_system(uri.as_str())
                .with_metadata("status", response.status.to_string())
                .with_metadata("body", response.body));
        }
        response.json()
    }
}

/// Render a body the way it is logged and sent: strings pass through,
/// everything else is serialized as JSON. Unserializable values render empty.
///
/// ```
/// use fleen_base_adapters::http::payload_body_as_string;
/// use serde_json::json;
///
/// assert_eq!(payload_body_as_string("raw"), "raw");
/// assert_eq!(payload_body_as_string(&json!({"id": 1})), r#"{"id":1}"#);
/// ```
pub fn payload_body_as_string<B: Serialize + ?Sized>(body: &B) -> String {
    match serde_json::to_value(body) {
        Ok(Value::String(text)) => text,
        Ok(other) => other.to_string(),
        Err(_) => String::new(),
    }
}

fn merge_headers(target: &mut HeaderMap, headers: &Headers) -> Result<()> {
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
            ErrorEnvelope::expected(ErrorCode::invalid_input(), "invalid header name")
                .with_metadata("header", name.clone())
        })?;
        let mut header_value = HeaderValue::from_str(value).map_err(|_| {
            ErrorEnvelope::expected(ErrorCode::invalid_input(), "invalid header value")
                .with_metadata("header", name.clone())
        })?;
        if header_name == AUTHORIZATION {
            header_value.set_sensitive(true);
        }
        target.insert(header_name, header_value);
    }
    Ok(())
}

fn map_transport_error(error: &reqwest::Error, uri: &Url) -> ErrorEnvelope {
    tracing::error!(url = %uri, %error, "HTTP transport failure");
    if error.is_timeout() {
        return ErrorEnvelope::unexpected(
            ErrorCode::timeout(),
            format!("request to {uri} timed out"),
            ErrorClass::Retriable,
        );
    }
    ErrorEnvelope::external_system(uri.as_str()).with_metadata("cause", error.to_string())
}
