//! Inbound search request and its translation to a [`PageSpec`].

use crate::paging::{PageSpec, PagingDefaults};
use crate::violation::FieldViolation;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use fleen_base_shared::ValidationError;
use fleen_base_shared::datetime::start_of_day;
use fleen_base_validate_derive::Validate;
use serde::{Deserialize, Serialize};

/// Paging, sorting and filtering parameters sent by a client.
///
/// Dates use `yyyy-MM-dd`. Geo fields are optional and bounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
#[validate(error = "FieldViolation")]
#[validate(date_range(start = "start_date", end = "end_date"))]
pub struct SearchRequest {
    /// Free-text filter.
    pub q: String,
    /// Zero-based page index.
    pub page_no: u32,
    /// Rows per page.
    #[validate(field = "pageSize", custom = "positive_page_size")]
    pub page_size: u32,
    /// Field to sort by.
    pub sort_by: String,
    /// Sort direction token; see [`crate::SortDirection::parse`].
    pub sort_dir: String,
    /// Cursor for the following page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
    /// Cursor for the preceding page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_page_token: Option<String>,
    /// Inclusive lower date bound.
    #[validate(field = "startDate")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper date bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Only entries before this date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before_date: Option<NaiveDate>,
    /// Only entries after this date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after_date: Option<NaiveDate>,
    /// Latitude in degrees.
    #[validate(field = "latitude", range(min = -90.0, max = 90.0))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Longitude in degrees.
    #[validate(field = "longitude", range(min = -180.0, max = 180.0))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Search radius around the coordinates.
    pub radius: f64,
    /// Keyset cursor on creation time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_created_on: Option<DateTime<Utc>>,
}

fn positive_page_size(page_size: &u32) -> Result<(), FieldViolation> {
    if *page_size == 0 {
        return Err(FieldViolation::invalid("pageSize", "must be greater than 0"));
    }
    Ok(())
}

impl SearchRequest {
    /// Empty request seeded from `defaults`.
    pub fn new(defaults: &PagingDefaults) -> Self {
        Self {
            q: String::new(),
            page_no: defaults.page_number,
            page_size: defaults.page_size,
            sort_by: defaults.sort_by.clone(),
            sort_dir: defaults.sort_direction.clone(),
            next_page_token: None,
            previous_page_token: None,
            start_date: None,
            end_date: None,
            before_date: None,
            after_date: None,
            latitude: None,
            longitude: None,
            radius: 0.0,
            last_created_on: None,
        }
    }

    /// Page spec derived from the current paging fields.
    ///
    /// ```
    /// use fleen_base_domain::{SearchRequest, SortDirection};
    ///
    /// let mut request = SearchRequest::default();
    /// request.sort_dir = "asc".into();
    /// let spec = request.page_spec();
    /// assert_eq!(spec.page_size, 10);
    /// assert_eq!(spec.sort_by, "updatedOn");
    /// assert_eq!(spec.direction, SortDirection::Asc);
    /// ```
    pub fn page_spec(&self) -> PageSpec {
        PageSpec::new(self.page_no, self.page_size, &*self.sort_by, &self.sort_dir)
    }

    /// Replace the page size; later [`Self::page_spec`] calls see it.
    pub const fn update_page_size(&mut self, page_size: u32) {
        self.page_size = page_size;
    }

    /// Both `startDate` and `endDate` are present.
    pub const fn are_all_dates_set(&self) -> bool {
        self.start_date.is_some() && self.end_date.is_some()
    }

    /// Start of the `startDate` day.
    pub fn start_date_time(&self) -> Option<NaiveDateTime> {
        self.start_date.map(start_of_day)
    }

    /// Start of the `endDate` day.
    pub fn end_date_time(&self) -> Option<NaiveDateTime> {
        self.end_date.map(start_of_day)
    }

    /// Keyset cursor, or the current instant when unset.
    pub fn last_created_on_or_now(&self) -> DateTime<Utc> {
        self.last_created_on.unwrap_or_else(Utc::now)
    }

    /// Both coordinates are present.
    pub const fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self::new(&PagingDefaults::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SortDirection;
    use fleen_base_shared::Validate;
    use std::error::Error;

    #[test]
    fn defaults_follow_paging_defaults() {
        let defaults = PagingDefaults {
            page_number: 2,
            page_size: 50,
            sort_by: "createdOn".to_string(),
            sort_direction: "ASC".to_string(),
        };
        let request = SearchRequest::new(&defaults);
        assert_eq!(
            request.page_spec(),
            PageSpec {
                page_number: 2,
                page_size: 50,
                sort_by: "createdOn".to_string(),
                direction: SortDirection::Asc,
            }
        );
    }

    #[test]
    fn garbage_direction_sorts_descending() {
        let request = SearchRequest {
            sort_dir: "garbage".to_string(),
            ..SearchRequest::default()
        };
        assert_eq!(request.page_spec().direction, SortDirection::Desc);
    }

    #[test]
    fn update_page_size_is_reflected_in_spec() {
        let mut request = SearchRequest::default();
        request.update_page_size(25);
        assert_eq!(request.page_spec().page_size, 25);
    }

    #[test]
    fn date_helpers() {
        let mut request = SearchRequest::default();
        assert!(!request.are_all_dates_set());
        assert_eq!(request.start_date_time(), None);

        request.start_date = NaiveDate::from_ymd_opt(2024, 5, 1);
        assert!(!request.are_all_dates_set());
        request.end_date = NaiveDate::from_ymd_opt(2024, 5, 31);
        assert!(request.are_all_dates_set());
        assert_eq!(
            request.end_date_time(),
            NaiveDate::from_ymd_opt(2024, 5, 31).and_then(|date| date.and_hms_opt(0, 0, 0))
        );
    }

    #[test]
    fn validation_reports_page_size_geo_and_range() {
        let request = SearchRequest {
            page_size: 0,
            latitude: Some(95.0),
            longitude: Some(-200.0),
            start_date: NaiveDate::from_ymd_opt(2024, 6, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 5, 1),
            ..SearchRequest::default()
        };
        let Err(violations) = request.validate() else {
            panic!("invalid request passed validation");
        };
        let fields: Vec<&str> = violations.iter().map(|violation| violation.field).collect();
        assert_eq!(fields, vec!["pageSize", "latitude", "longitude", "startDate"]);
    }

    #[test]
    fn default_request_is_valid() {
        assert!(SearchRequest::default().validate().is_ok());
    }

    #[test]
    fn deserializes_camel_case_with_defaults() -> Result<(), Box<dyn Error>> {
        let request: SearchRequest = serde_json::from_str(
            r#"{"q":"jazz","pageNo":3,"sortDir":"asc","startDate":"2024-01-02","lastCreatedOn":"2024-01-02T03:04:05Z"}"#,
        )?;
        assert_eq!(request.q, "jazz");
        assert_eq!(request.page_no, 3);
        assert_eq!(request.page_size, 10);
        assert_eq!(request.sort_by, "updatedOn");
        assert_eq!(request.start_date, NaiveDate::from_ymd_opt(2024, 1, 2));
        assert!(request.last_created_on.is_some());
        assert!(request.last_created_on_or_now() <= Utc::now());
        Ok(())
    }
}
