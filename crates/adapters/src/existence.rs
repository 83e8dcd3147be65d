//! Field checks that need a lookup against stored accounts or reference data.
//!
//! Each check returns `Ok(None)` when the field is valid and
//! `Ok(Some(violation))` when it is not. Absent values are valid.

use fleen_base_domain::FieldViolation;
use fleen_base_ports::{CountryLookupPort, EmailLookupPort, PhoneLookupPort};
use fleen_base_shared::validators::messages;
use fleen_base_shared::{Result, ValidationError};

/// Fails when `email` is already registered.
pub async fn check_email_not_taken(
    lookup: &dyn EmailLookupPort,
    field: &'static str,
    email: Option<&str>,
) -> Result<Option<FieldViolation>> {
    let Some(email) = email else {
        return Ok(None);
    };
    let taken = lookup.email_exists(email).await?;
    Ok(taken.then(|| FieldViolation::invalid(field, messages::EMAIL_EXISTS)))
}

/// Fails when `phone_number` is already registered.
pub async fn check_phone_not_taken(
    lookup: &dyn PhoneLookupPort,
    field: &'static str,
    phone_number: Option<&str>,
) -> Result<Option<FieldViolation>> {
    let Some(phone_number) = phone_number else {
        return Ok(None);
    };
    let taken = lookup.phone_exists(phone_number).await?;
    Ok(taken.then(|| FieldViolation::invalid(field, messages::PHONE_EXISTS)))
}

/// Fails when `country` is unknown. A failed lookup also counts as unknown.
pub async fn check_country_exists(
    lookup: &dyn CountryLookupPort,
    field: &'static str,
    country: Option<&str>,
) -> Option<FieldViolation> {
    let country = country?;
    match lookup.country_exists(country).await {
        Ok(true) => None,
        Ok(false) => Some(FieldViolation::invalid(field, messages::COUNTRY_NOT_FOUND)),
        Err(error) => {
            tracing::debug!(country, %error, "country lookup failed");
            Some(FieldViolation::invalid(field, messages::COUNTRY_NOT_FOUND))
        },
    }
}
