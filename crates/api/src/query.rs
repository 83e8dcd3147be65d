//! Binding `application/x-www-form-urlencoded` query strings onto a
//! [`SearchRequest`].

use chrono::{DateTime, NaiveDate, Utc};
use fleen_base_domain::{
    FieldViolation, PagingDefaults, SearchRequest, field_metadata_key, violations_to_envelope,
};
use fleen_base_shared::datetime::parse_date;
use fleen_base_shared::{ErrorCode, ErrorEnvelope, Validate};
use std::collections::BTreeMap;
use std::fmt;
use url::form_urlencoded;

/// A query parameter that could not be bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryBindingError {
    /// Not a number.
    InvalidNumber {
        /// Query key.
        field: &'static str,
        /// Raw decoded value.
        value: String,
    },
    /// Not a `yyyy-MM-dd` date (or RFC 3339 instant for `lastCreatedOn`).
    InvalidDate {
        /// Query key.
        field: &'static str,
        /// Raw decoded value.
        value: String,
    },
    /// A number outside what the field accepts.
    OutOfRange {
        /// Query key.
        field: &'static str,
        /// Raw decoded value.
        value: String,
    },
}

impl QueryBindingError {
    /// Query key that failed.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidNumber { field, .. }
            | Self::InvalidDate { field, .. }
            | Self::OutOfRange { field, .. } => field,
        }
    }

    /// Raw value that failed.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::InvalidNumber { value, .. }
            | Self::InvalidDate { value, .. }
            | Self::OutOfRange { value, .. } => value,
        }
    }

    /// Stable error code.
    #[must_use]
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::InvalidNumber { .. } => ErrorCode::new("api", "invalid_number"),
            Self::InvalidDate { .. } => ErrorCode::new("api", "invalid_date"),
            Self::OutOfRange { .. } => ErrorCode::new("api", "value_out_of_range"),
        }
    }

    fn reason(&self) -> &'static str {
        match self {
            Self::InvalidNumber { .. } => "is not a valid number",
            Self::InvalidDate { .. } => "is not a valid date",
            Self::OutOfRange { .. } => "is out of range",
        }
    }
}

impl fmt::Display for QueryBindingError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "query parameter '{}' {} (got '{}')",
            self.field(),
            self.reason(),
            self.value()
        )
    }
}

impl std::error::Error for QueryBindingError {}

impl From<QueryBindingError> for ErrorEnvelope {
    fn from(error: QueryBindingError) -> Self {
        Self::expected(error.error_code(), error.to_string())
            .with_metadata("field", error.field())
            .with_metadata("value", error.value().to_string())
            .with_metadata(field_metadata_key(0, error.field()), error.reason())
    }
}

/// Bind a raw query string (without the leading `?`) onto a request seeded
/// from `defaults`.
///
/// The first occurrence of a key wins and unknown keys are ignored. Empty
/// values leave the seeded value in place.
///
/// ```
/// use fleen_base_api::bind_search_request;
/// use fleen_base_domain::PagingDefaults;
///
/// let request = bind_search_request("q=late+night%20jazz&pageNo=2&pageNo=9", &PagingDefaults::default())?;
/// assert_eq!(request.q, "late night jazz");
/// assert_eq!(request.page_no, 2);
/// assert_eq!(request.page_size, 10);
/// # Ok::<(), fleen_base_api::QueryBindingError>(())
/// ```
pub fn bind_search_request(
    query: &str,
    defaults: &PagingDefaults,
) -> Result<SearchRequest, QueryBindingError> {
    let mut params: BTreeMap<String, String> = BTreeMap::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        params.entry(key.into_owned()).or_insert_with(|| value.into_owned());
    }
    let get = |key: &str| params.get(key).map(String::as_str).filter(|value| !value.is_empty());

    let mut request = SearchRequest::new(defaults);
    if let Some(value) = params.get("q") {
        request.q.clone_from(value);
    }
    if let Some(value) = get("pageNo") {
        request.page_no = parse_page_number(value)?;
    }
    if let Some(value) = get("pageSize") {
        request.page_size = parse_page_size(value)?;
    }
    if let Some(value) = get("sortDir") {
        request.sort_dir = value.to_string();
    }
    if let Some(value) = get("sortBy") {
        request.sort_by = value.to_string();
    }
    request.next_page_token = get("nextPageToken").map(str::to_string);
    request.previous_page_token = get("previousPageToken").map(str::to_string);
    request.start_date = get("startDate").map(|value| bind_date("startDate", value)).transpose()?;
    request.end_date = get("endDate").map(|value| bind_date("endDate", value)).transpose()?;
    request.before_date = get("beforeDate")
        .map(|value| bind_date("beforeDate", value))
        .transpose()?;
    request.after_date = get("afterDate").map(|value| bind_date("afterDate", value)).transpose()?;
    request.latitude = get("latitude").map(|value| bind_f64("latitude", value)).transpose()?;
    request.longitude = get("longitude").map(|value| bind_f64("longitude", value)).transpose()?;
    if let Some(value) = get("radius") {
        request.radius = bind_f64("radius", value)?;
    }
    request.last_created_on = get("lastCreatedOn").map(bind_instant).transpose()?;

    Ok(request)
}

/// Bind, then run field validation; failures of either kind come back as an
/// envelope.
pub fn bind_validated_search_request(
    query: &str,
    defaults: &PagingDefaults,
) -> Result<SearchRequest, ErrorEnvelope> {
    let request = bind_search_request(query, defaults)?;
    request
        .validate()
        .map_err(|violations: Vec<FieldViolation>| violations_to_envelope(&violations))?;
    Ok(request)
}

fn parse_integer(field: &'static str, value: &str) -> Result<i64, QueryBindingError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| QueryBindingError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

fn parse_page_number(value: &str) -> Result<u32, QueryBindingError> {
    let number = parse_integer("pageNo", value)?;
    u32::try_from(number).map_err(|_| QueryBindingError::OutOfRange {
        field: "pageNo",
        value: value.to_string(),
    })
}

fn parse_page_size(value: &str) -> Result<u32, QueryBindingError> {
    let size = parse_integer("pageSize", value)?;
    u32::try_from(size)
        .ok()
        .filter(|size| *size > 0)
        .ok_or_else(|| QueryBindingError::OutOfRange {
            field: "pageSize",
            value: value.to_string(),
        })
}

fn bind_f64(field: &'static str, value: &str) -> Result<f64, QueryBindingError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .ok_or_else(|| QueryBindingError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

fn bind_date(field: &'static str, value: &str) -> Result<NaiveDate, QueryBindingError> {
    parse_date(value.trim()).ok_or_else(|| QueryBindingError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

fn bind_instant(value: &str) -> Result<DateTime<Utc>, QueryBindingError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|_| QueryBindingError::InvalidDate {
            field: "lastCreatedOn",
            value: value.to_string(),
        })
}
