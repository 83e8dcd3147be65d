//! Field predicates behind `#[derive(Validate)]` rules.
//!
//! Each predicate answers for a present value. Whether an absent value passes
//! is decided per rule by the derive (see [`absent_is_valid`]).

use crate::datetime::{self, formats};
use crate::labels::LabeledEnum;
use chrono::{Local, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

/// Default violation messages.
pub mod messages {
    /// Malformed email address.
    pub const EMAIL: &str = "Invalid email address format.";
    /// Malformed phone number.
    pub const PHONE: &str = "Invalid phone number format.";
    /// Password policy not met.
    pub const PASSWORD: &str = "Password does not meet requirement.";
    /// Not a four-digit year.
    pub const YEAR: &str = "Invalid year format. Please provide a valid year (YYYY)";
    /// Not a decimal number.
    pub const NUMBER: &str = "Invalid number";
    /// Not `true`/`false`.
    pub const BOOLEAN: &str = "Invalid boolean string value. Please provide 'true' or 'false'.";
    /// Unparseable date.
    pub const DATE: &str = "Date is invalid";
    /// Unparseable date-time.
    pub const DATE_TIME: &str = "Date and time is invalid";
    /// Date not after now.
    pub const FUTURE_DATE: &str = "Date should be in the future";
    /// Start date after end date.
    pub const DATE_RANGE: &str = "Start date should  be before or equal to end date";
    /// Paired fields differ.
    pub const FIELD_MATCH: &str = "Fields do not match";
    /// Ordinal outside the accepted set.
    pub const ENUM_ORDINAL: &str = "Invalid value";
    /// Email already registered.
    pub const EMAIL_EXISTS: &str = "Email Address already exists";
    /// Phone number already registered.
    pub const PHONE_EXISTS: &str = "Phone Number already exists";
    /// Unknown country.
    pub const COUNTRY_NOT_FOUND: &str = "Country does not exist";
}

/// Rules that treat an absent value as valid.
///
/// Password, date and date-time require a value.
pub const fn absent_is_valid(rule: Rule) -> bool {
    !matches!(rule, Rule::Password | Rule::Date | Rule::DateTime)
}

/// Field rule identifiers understood by the derive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Email format.
    Email,
    /// Phone number format.
    Phone,
    /// Password policy.
    Password,
    /// Four-digit year.
    Year,
    /// Decimal number.
    Number,
    /// Boolean string.
    Boolean,
    /// Membership in an allowed set.
    OneOf,
    /// Enum constant name.
    EnumName,
    /// Enum ordinal.
    EnumOrdinal,
    /// Date pattern.
    Date,
    /// Date-time pattern.
    DateTime,
    /// Future date or date-time.
    FutureDate,
}

static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").ok());

static YEAR_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^\d{4}$").ok());

static NUMBER_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^-?\d+(\.\d+)?$").ok());

fn matches(pattern: &LazyLock<Option<Regex>>, value: &str) -> bool {
    pattern
        .as_ref()
        .is_some_and(|regex| regex.is_match(value))
}

const PASSWORD_MIN_LENGTH: usize = 8;
const PASSWORD_MAX_LENGTH: usize = 24;

/// Email shape check.
///
/// ```
/// use fleen_base_shared::validators::is_valid_email;
///
/// assert!(is_valid_email("ada@fleen.com"));
/// assert!(!is_valid_email("ada@fleen"));
/// ```
pub fn is_valid_email(value: &str) -> bool {
    matches(&EMAIL_PATTERN, value)
}

/// International phone number check (`+` and country code required).
pub fn is_valid_phone_number(value: &str) -> bool {
    phonenumber::parse(None, value).is_ok_and(|number| phonenumber::is_valid(&number))
}

/// Password policy: 8 to 24 characters with an ASCII uppercase letter, an
/// ASCII lowercase letter, a digit and an ASCII punctuation character, and no
/// whitespace. Other characters count toward the length only.
pub fn is_valid_password(value: &str) -> bool {
    let length = value.chars().count();
    if !(PASSWORD_MIN_LENGTH..=PASSWORD_MAX_LENGTH).contains(&length) {
        return false;
    }
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    value.chars().any(|character| character.is_ascii_uppercase())
        && value.chars().any(|character| character.is_ascii_lowercase())
        && value.chars().any(|character| character.is_ascii_digit())
        && value.chars().any(|character| character.is_ascii_punctuation())
}

/// Exactly four ASCII digits.
pub fn is_valid_year(value: &str) -> bool {
    matches(&YEAR_PATTERN, value)
}

/// Optional minus sign, digits, optional fractional part.
///
/// ```
/// use fleen_base_shared::validators::is_valid_number;
///
/// assert!(is_valid_number("-12.50"));
/// assert!(!is_valid_number("1e3"));
/// assert!(!is_valid_number(".5"));
/// ```
pub fn is_valid_number(value: &str) -> bool {
    matches(&NUMBER_PATTERN, value)
}

/// `true` or `false`, case-insensitive.
pub fn is_boolean(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false")
}

/// Membership in the enum's constant names plus `allowed` (trimmed).
pub fn is_one_of(value: &str, enum_names: &[&str], allowed: &[&str], ignore_case: bool) -> bool {
    enum_names
        .iter()
        .copied()
        .chain(allowed.iter().map(|candidate| candidate.trim()))
        .any(|candidate| {
            if ignore_case {
                candidate.to_lowercase() == value.to_lowercase()
            } else {
                candidate == value
            }
        })
}

/// [`is_one_of`] drawing names from a [`LabeledEnum`].
pub fn is_one_of_enum<E: LabeledEnum>(value: &str, allowed: &[&str], ignore_case: bool) -> bool {
    is_one_of(value, &E::names(), allowed, ignore_case)
}

/// Message for a failed one-of rule.
pub fn one_of_message(enum_names: &[&str], allowed: &[&str], enum_label: &str) -> String {
    let accepted: Vec<&str> = enum_names
        .iter()
        .copied()
        .chain(allowed.iter().map(|candidate| candidate.trim()))
        .collect();
    format!("must be one of {accepted:?} or valid {enum_label}")
}

/// The upper-cased value names a variant of `E`.
///
/// ```
/// use fleen_base_shared::LabeledEnum;
/// use fleen_base_shared::validators::is_enum_name;
///
/// #[derive(Clone, Copy, PartialEq)]
/// enum Visibility { Public, Private }
///
/// impl LabeledEnum for Visibility {
///     fn variants() -> &'static [Self] { &[Self::Public, Self::Private] }
///     fn name(self) -> &'static str {
///         match self { Self::Public => "PUBLIC", Self::Private => "PRIVATE" }
///     }
///     fn value(self) -> &'static str {
///         match self { Self::Public => "Public", Self::Private => "Private" }
///     }
/// }
///
/// assert!(is_enum_name::<Visibility>("public"));
/// assert!(!is_enum_name::<Visibility>("unlisted"));
/// ```
pub fn is_enum_name<E: LabeledEnum>(value: &str) -> bool {
    let upper = value.to_uppercase();
    E::variants().iter().any(|variant| variant.name() == upper)
}

/// Parses as an integer contained in `accepted`.
pub fn is_enum_ordinal(value: &str, accepted: &[i64]) -> bool {
    value
        .trim()
        .parse::<i64>()
        .is_ok_and(|ordinal| accepted.contains(&ordinal))
}

/// Date check with `pattern`, or [`formats::DATE`] when `None`.
pub fn is_valid_date(value: &str, pattern: Option<&str>) -> bool {
    datetime::is_date_time_valid(value, pattern.unwrap_or(formats::DATE))
}

/// Date-time check with `pattern`, or [`formats::DATE_TIME`] when `None`.
pub fn is_valid_date_time(value: &str, pattern: Option<&str>) -> bool {
    datetime::is_date_time_valid(value, pattern.unwrap_or(formats::DATE_TIME))
}

/// Strictly after the current local date (`date_only`) or date-time.
pub fn is_future(value: &str, date_only: bool) -> bool {
    is_future_at(value, date_only, Local::now().naive_local())
}

/// [`is_future`] against an explicit `now`.
pub fn is_future_at(value: &str, date_only: bool, now: NaiveDateTime) -> bool {
    if date_only {
        datetime::is_date_future_at(Some(value), formats::DATE, now.date())
    } else {
        datetime::is_date_time_future_at(Some(value), formats::DATE_TIME, now)
    }
}

/// Start is not after end; passes when either side is absent.
pub fn is_chronological<T: PartialOrd>(start: Option<&T>, end: Option<&T>) -> bool {
    match (start, end) {
        (Some(start), Some(end)) => start <= end,
        _ => true,
    }
}

/// Both absent, or both present and equal.
pub fn fields_match<T: PartialEq>(first: Option<&T>, second: Option<&T>) -> bool {
    first == second
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    #[test]
    fn email_requires_domain_suffix() {
        assert!(is_valid_email("first.last+tag@mail.example.org"));
        assert!(!is_valid_email("first.last@example"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("someone@example.com trailing"));
    }

    #[test]
    fn phone_requires_international_form() {
        assert!(is_valid_phone_number("+14155552671"));
        assert!(is_valid_phone_number("+2348031234567"));
        assert!(!is_valid_phone_number("12345"));
        assert!(!is_valid_phone_number("not a number"));
    }

    #[test]
    fn password_policy() {
        assert!(is_valid_password("Str0ng!Pass"));
        assert!(!is_valid_password("Sh0rt!"));
        assert!(!is_valid_password("N0SpecialCharacters"));
        assert!(!is_valid_password("no_upper_case_1"));
        assert!(!is_valid_password("NO_LOWER_CASE_1"));
        assert!(!is_valid_password("No Digits Here!"));
        assert!(!is_valid_password("Has Space 1!"));
        assert!(!is_valid_password("Way!Too!Long!Password123456"));
        assert!(!is_valid_password("ÉÉÉÉéé1€"));
        assert!(!is_valid_password("Ünïcödé1!"));
        assert!(!is_valid_password("Password1€"));
        assert!(is_valid_password("Pàssw0rd!"));
    }

    #[test]
    fn year_and_boolean() {
        assert!(is_valid_year("1999"));
        assert!(!is_valid_year("99"));
        assert!(!is_valid_year("19999"));
        assert!(is_boolean("TRUE"));
        assert!(is_boolean("false"));
        assert!(!is_boolean("yes"));
    }

    #[test]
    fn one_of_honours_case_flag() {
        let names = ["PUBLIC", "PRIVATE"];
        assert!(is_one_of("PUBLIC", &names, &[], false));
        assert!(!is_one_of("public", &names, &[], false));
        assert!(is_one_of("public", &names, &[], true));
        assert!(is_one_of("draft", &names, &[" draft "], false));
        assert!(!is_one_of("other", &names, &["draft"], true));
    }

    #[test]
    fn one_of_message_lists_accepted_values() {
        assert_eq!(
            one_of_message(&["A"], &[" b "], "Visibility"),
            r#"must be one of ["A", "b"] or valid Visibility"#
        );
    }

    #[test]
    fn ordinals_must_parse_and_be_accepted() {
        assert!(is_enum_ordinal("2", &[0, 1, 2]));
        assert!(!is_enum_ordinal("3", &[0, 1, 2]));
        assert!(!is_enum_ordinal("two", &[0, 1, 2]));
    }

    #[test]
    fn future_check_uses_pattern_for_kind() {
        let Some(now) = NaiveDate::from_ymd_opt(2024, 3, 1).and_then(|date| date.and_hms_opt(12, 0, 0))
        else {
            panic!("fixture date");
        };
        assert!(is_future_at("2024-03-02", true, now));
        assert!(!is_future_at("2024-03-01", true, now));
        assert!(is_future_at("2024-03-01T12:00:01", false, now));
        assert!(!is_future_at("2024-03-02", false, now));
    }

    #[test]
    fn range_and_match_skip_absent_values() {
        assert!(is_chronological(Some(&1), Some(&1)));
        assert!(!is_chronological(Some(&2), Some(&1)));
        assert!(is_chronological(None, Some(&1)));
        assert!(fields_match::<&str>(None, None));
        assert!(fields_match(Some(&"a"), Some(&"a")));
        assert!(!fields_match(Some(&"a"), None));
    }

    #[test]
    fn absent_handling_per_rule() {
        assert!(absent_is_valid(Rule::Email));
        assert!(absent_is_valid(Rule::FutureDate));
        assert!(!absent_is_valid(Rule::Password));
        assert!(!absent_is_valid(Rule::Date));
    }

    proptest! {
        #[test]
        fn integers_are_numbers(value in any::<i64>()) {
            prop_assert!(is_valid_number(&value.to_string()));
        }

        #[test]
        fn four_digit_years_are_valid(value in 1000_u32..=9999) {
            prop_assert!(is_valid_year(&value.to_string()));
        }
    }
}
