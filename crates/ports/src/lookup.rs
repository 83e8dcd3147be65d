//! Existence lookups backing the async field validators.

use crate::BoxFuture;
use fleen_base_shared::Result;

/// Checks whether an email address is already registered.
pub trait EmailLookupPort: Send + Sync {
    /// True when `email` belongs to an existing account.
    fn email_exists(&self, email: &str) -> BoxFuture<'_, Result<bool>>;
}

/// Checks whether a phone number is already registered.
pub trait PhoneLookupPort: Send + Sync {
    /// True when `phone_number` belongs to an existing account.
    fn phone_exists(&self, phone_number: &str) -> BoxFuture<'_, Result<bool>>;
}

/// Checks whether a country is known.
pub trait CountryLookupPort: Send + Sync {
    /// True when `country` names a known country.
    fn country_exists(&self, country: &str) -> BoxFuture<'_, Result<bool>>;
}
