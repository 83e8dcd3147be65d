//! Fixed strings and durations shared by services.

use fleen_base_shared::datetime::time_in_millis;

/// Header carrying the originating client address behind a proxy.
pub const X_FORWARDED_HEADER: &str = "X-Forwarded-For";

/// Search index holding videos.
pub const FLEEN_VIDEO_INDEX: &str = "fleen_video";

/// Prefixes for cache keys; the key is `prefix + subject`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKeyPrefix {
    /// Issued access tokens.
    AccessToken,
    /// Issued refresh tokens.
    RefreshToken,
    /// Password reset tokens.
    ResetPasswordToken,
    /// Pending email MFA setup codes.
    MfaSetupEmail,
    /// Pending phone MFA setup codes.
    MfaSetupPhone,
    /// Sign-up verification codes.
    PreVerification,
    /// Pre-authentication codes.
    PreAuthentication,
    /// Email address change codes.
    UpdateEmailAddress,
    /// Phone number change codes.
    UpdatePhoneNumber,
}

impl CacheKeyPrefix {
    /// Every prefix.
    pub const ALL: [Self; 9] = [
        Self::AccessToken,
        Self::RefreshToken,
        Self::ResetPasswordToken,
        Self::MfaSetupEmail,
        Self::MfaSetupPhone,
        Self::PreVerification,
        Self::PreAuthentication,
        Self::UpdateEmailAddress,
        Self::UpdatePhoneNumber,
    ];

    /// Literal prefix, `:::`-terminated.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AccessToken => "ACCESS_TOKEN:::",
            Self::RefreshToken => "REFRESH_TOKEN:::",
            Self::ResetPasswordToken => "RESET_PASSWORD_TOKEN:::",
            Self::MfaSetupEmail => "MFA_SETUP_EMAIL:::",
            Self::MfaSetupPhone => "MFA_SETUP_PHONE:::",
            Self::PreVerification => "PRE_VERIFICATION:::",
            Self::PreAuthentication => "PRE_AUTHENTICATION:::",
            Self::UpdateEmailAddress => "UPDATE_EMAIL_ADDRESS:::",
            Self::UpdatePhoneNumber => "UPDATE_PHONE_NUMBER:::",
        }
    }

    /// Cache key for `subject`.
    ///
    /// ```
    /// use fleen_base_domain::constants::CacheKeyPrefix;
    ///
    /// assert_eq!(CacheKeyPrefix::AccessToken.key("a@b.io"), "ACCESS_TOKEN:::a@b.io");
    /// ```
    pub fn key(self, subject: &str) -> String {
        format!("{}{subject}", self.as_str())
    }
}

/// Authentication and token constants.
pub mod security {
    use super::time_in_millis;

    /// Account label shown in authenticator apps.
    pub const MFA_SECRET_LABEL: &str = "start@fleenhistoria.com";
    /// Issuer shown in authenticator apps.
    pub const MFA_SECRET_ISSUER: &str = "Fleen Historia";
    /// Header carrying credentials.
    pub const AUTH_HEADER_KEY: &str = "Authorization";
    /// Scheme expected in [`AUTH_HEADER_KEY`].
    pub const AUTH_HEADER_PREFIX: &str = "Bearer";
    /// Claim holding the token type.
    pub const TOKEN_TYPE_KEY: &str = "tokenType";
    /// Claim holding the authentication status.
    pub const AUTHENTICATION_STATUS_KEY: &str = "authenticationStatus";
    /// Claim holding the user id.
    pub const CLAIMS_USER_ID_KEY: &str = "userId";
    /// Claim holding granted authorities.
    pub const CLAIMS_AUTHORITY_KEY: &str = "authorities";

    /// Access token lifetime: 5 hours.
    pub const ACCESS_TOKEN_VALIDITY_MS: u64 = time_in_millis(60, 60, 5, 0);
    /// Refresh token lifetime: 2 days.
    pub const REFRESH_TOKEN_VALIDITY_MS: u64 = time_in_millis(60, 60, 24, 2);
    /// Password reset token lifetime: 15 minutes.
    pub const RESET_PASSWORD_TOKEN_VALIDITY_MS: u64 = time_in_millis(60, 15, 0, 0);
}

/// Response descriptions used in API documentation.
pub mod api_description {
    /// 202.
    pub const RESPONSE_202: &str = "Accepted";
    /// 400.
    pub const RESPONSE_400: &str = "Invalid input parameters provided or request body";
    /// 404.
    pub const RESPONSE_404: &str = "Not found";
    /// 409.
    pub const RESPONSE_409: &str = "Conflict";
    /// 500.
    pub const RESPONSE_500: &str = "Internal server error";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_validities() {
        assert_eq!(security::ACCESS_TOKEN_VALIDITY_MS, 5 * 60 * 60 * 1000);
        assert_eq!(security::REFRESH_TOKEN_VALIDITY_MS, 2 * 24 * 60 * 60 * 1000);
        assert_eq!(security::RESET_PASSWORD_TOKEN_VALIDITY_MS, 15 * 60 * 1000);
    }

    #[test]
    fn cache_prefixes_are_unique_and_terminated() {
        let mut prefixes: Vec<&str> = CacheKeyPrefix::ALL.iter().map(|prefix| prefix.as_str()).collect();
        assert!(prefixes.iter().all(|prefix| prefix.ends_with(":::")));
        prefixes.sort_unstable();
        prefixes.dedup();
        assert_eq!(prefixes.len(), CacheKeyPrefix::ALL.len());
    }
}
