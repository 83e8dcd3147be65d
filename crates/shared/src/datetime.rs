//! Date and time helpers.
//!
//! Patterns are chrono `strftime` strings. Parse helpers return `Option` and
//! log the failure at `debug`; callers decide whether absence is an error.

use chrono::{
    DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike,
};

/// Format patterns shared by request DTOs and validators.
pub mod formats {
    /// `2024-03-01`
    pub const DATE: &str = "%Y-%m-%d";
    /// `2024-03-01T09:30:00`
    pub const DATE_TIME: &str = "%Y-%m-%dT%H:%M:%S";
    /// `09:30`
    pub const TIME: &str = "%H:%M";
    /// `2024-03-01T09:30:00.000Z`
    pub const DATE_TIME_WITH_TIMEZONE: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";
    /// `2024-03-01T09:30:00.1234567Z`
    pub const DATE_TIME_WITH_TIMEZONE_NANOSECOND: &str = "%Y-%m-%dT%H:%M:%S%.fZ";
    /// `2024-03-01T09:30`
    pub const DATE_TIME_NO_SECONDS: &str = "%Y-%m-%dT%H:%M";
    /// `2024-03-01 09:30`
    pub const DATE_TIME_NO_PERIOD_SECONDS: &str = "%Y-%m-%d %H:%M";
    /// `9:30AM`
    pub const TIME_12_HOUR_AM_PM: &str = "%-I:%M%p";
    /// `March 1, 2024`
    pub const FULL_DATE_WITH_SUFFIX: &str = "%B %-d, %Y";
}

/// Milliseconds covered by the product of the non-zero arguments.
///
/// Zero arguments are skipped rather than zeroing the product, so
/// `time_in_millis(60, 15, 0, 0)` is fifteen minutes. Saturates on overflow.
///
/// ```
/// use fleen_base_shared::datetime::time_in_millis;
///
/// assert_eq!(time_in_millis(60, 60, 5, 0), 18_000_000);
/// assert_eq!(time_in_millis(60, 15, 0, 0), 900_000);
/// assert_eq!(time_in_millis(0, 0, 0, 0), 1_000);
/// ```
#[must_use]
pub const fn time_in_millis(seconds: u64, minutes: u64, hours: u64, days: u64) -> u64 {
    let factors = [seconds, minutes, hours, days];
    let mut total: u64 = 1_000;
    let mut index = 0;
    while index < factors.len() {
        if factors[index] != 0 {
            total = total.saturating_mul(factors[index]);
        }
        index += 1;
    }
    total
}

/// Absolute number of whole hours between two instants.
#[must_use]
pub fn hours_between(first: NaiveDateTime, second: NaiveDateTime) -> i64 {
    (second - first).num_hours().abs()
}

/// Epoch milliseconds of a local date-time; absent or ambiguous-free gaps map to 0.
#[must_use]
pub fn to_epoch_millis(date_time: Option<NaiveDateTime>) -> i64 {
    date_time
        .and_then(|value| Local.from_local_datetime(&value).earliest())
        .map_or(0, |value| value.timestamp_millis())
}

/// Epoch milliseconds of `now + duration`, or `None` past the supported range.
#[must_use]
pub fn expiry_epoch_millis(duration: Duration) -> Option<i64> {
    Local::now()
        .checked_add_signed(duration)
        .map(|value| value.timestamp_millis())
}

/// Local date-time `hours` from now, or `None` past the supported range.
#[must_use]
pub fn add_hours_from_now(hours: i64) -> Option<NaiveDateTime> {
    Duration::try_hours(hours).and_then(|delta| Local::now().naive_local().checked_add_signed(delta))
}

/// Local date-time `minutes` from now, or `None` past the supported range.
#[must_use]
pub fn add_minutes_from_now(minutes: i64) -> Option<NaiveDateTime> {
    Duration::try_minutes(minutes)
        .and_then(|delta| Local::now().naive_local().checked_add_signed(delta))
}

/// Parse a [`formats::DATE`] string and return the start of that day.
#[must_use]
pub fn parse_date_start_of_day(value: &str) -> Option<NaiveDateTime> {
    parse_date(value).map(start_of_day)
}

/// Midnight at the start of `date`.
#[must_use]
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Placeholder date of birth used when a profile has none (2000-01-01T00:00).
#[must_use]
pub fn default_date_of_birth() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2000, 1, 1)
        .map(start_of_day)
        .unwrap_or_default()
}

/// Inclusive working-hour window, 09:00 to 18:00.
#[must_use]
pub fn working_hours() -> (NaiveTime, NaiveTime) {
    let start = NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN);
    let end = NaiveTime::from_hms_opt(18, 0, 0).unwrap_or(NaiveTime::MIN);
    (start, end)
}

/// True when `value` parses as a time inside [`working_hours`].
#[must_use]
pub fn is_within_working_hours(value: &str) -> bool {
    let (start, end) = working_hours();
    parse_time(value).is_some_and(|time| time >= start && time <= end)
}

/// Parse `HH:MM`, or a bare minute count (`30` is `00:30`).
#[must_use]
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    let parsed = if value.contains(':') {
        NaiveTime::parse_from_str(value, formats::TIME).ok()
    } else {
        value
            .parse::<u32>()
            .ok()
            .and_then(|minutes| NaiveTime::from_hms_opt(0, minutes, 0))
    };
    if parsed.is_none() {
        tracing::debug!(value, "unable to parse time");
    }
    parsed
}

/// Parse a [`formats::DATE`] string.
#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    parse_date_with(value, formats::DATE)
}

/// Parse a date with an explicit pattern.
#[must_use]
pub fn parse_date_with(value: &str, pattern: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(value, pattern) {
        Ok(date) => Some(date),
        Err(error) => {
            tracing::debug!(value, pattern, %error, "unable to parse date");
            None
        }
    }
}

/// Parse a date-time with an explicit pattern.
#[must_use]
pub fn parse_date_time_with(value: &str, pattern: &str) -> Option<NaiveDateTime> {
    match NaiveDateTime::parse_from_str(value, pattern) {
        Ok(date_time) => Some(date_time),
        Err(error) => {
            tracing::debug!(value, pattern, %error, "unable to parse date-time");
            None
        }
    }
}

/// Parse an RFC 3339 instant and convert it to local time.
#[must_use]
pub fn parse_instant(value: &str) -> Option<DateTime<Local>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|instant| instant.with_timezone(&Local))
}

/// True when `value` matches `pattern` as a date-time, a date or a time.
#[must_use]
pub fn is_date_time_valid(value: &str, pattern: &str) -> bool {
    let valid = NaiveDateTime::parse_from_str(value, pattern).is_ok()
        || NaiveDate::parse_from_str(value, pattern).is_ok()
        || NaiveTime::parse_from_str(value, pattern).is_ok();
    if !valid {
        tracing::debug!(value, pattern, "date-time does not match pattern");
    }
    valid
}

/// True when `value` is a date strictly after today.
///
/// Absent values pass; unparseable values fail.
#[must_use]
pub fn is_date_future(value: Option<&str>, pattern: &str) -> bool {
    is_date_future_at(value, pattern, Local::now().date_naive())
}

/// [`is_date_future`] against an explicit `today`.
#[must_use]
pub fn is_date_future_at(value: Option<&str>, pattern: &str, today: NaiveDate) -> bool {
    match value {
        None => true,
        Some(value) => parse_date_with(value, pattern).is_some_and(|date| date > today),
    }
}

/// True when `value` is a date-time strictly after `now`.
///
/// Absent values pass; unparseable values fail.
#[must_use]
pub fn is_date_time_future_at(value: Option<&str>, pattern: &str, now: NaiveDateTime) -> bool {
    match value {
        None => true,
        Some(value) => parse_date_time_with(value, pattern).is_some_and(|date_time| date_time > now),
    }
}

/// Render as `yyyy-MM-dd HH:mm AM|PM`; `None` renders the current time.
///
/// ```
/// use chrono::NaiveDate;
/// use fleen_base_shared::datetime::format_without_seconds;
///
/// let evening = NaiveDate::from_ymd_opt(2024, 3, 1).and_then(|date| date.and_hms_opt(18, 5, 59));
/// assert_eq!(format_without_seconds(evening), "2024-03-01 18:05 PM");
/// ```
#[must_use]
pub fn format_without_seconds(date_time: Option<NaiveDateTime>) -> String {
    let date_time = date_time.unwrap_or_else(|| Local::now().naive_local());
    let period = if date_time.hour() < 12 { "AM" } else { "PM" };
    format!(
        "{} {period}",
        date_time.format(formats::DATE_TIME_NO_PERIOD_SECONDS)
    )
}
