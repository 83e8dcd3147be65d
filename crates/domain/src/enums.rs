//! Labeled constant enums shared across services.
//!
//! Every enum carries a `SCREAMING_SNAKE_CASE` name and a display value.
//! Serialization uses the value; parsing accepts either.

use fleen_base_shared::{ErrorCode, ErrorEnvelope, LabeledEnum};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;

/// Text that matched no variant of a labeled enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    /// Enum type name.
    pub enum_name: &'static str,
    /// Rejected input.
    pub text: String,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "'{}' is not a valid {}", self.text, self.enum_name)
    }
}

impl std::error::Error for UnknownVariant {}

impl From<UnknownVariant> for ErrorEnvelope {
    fn from(error: UnknownVariant) -> Self {
        let message = error.to_string();
        Self::expected(ErrorCode::invalid_input(), message)
            .with_metadata("enum", error.enum_name)
            .with_metadata("value", error.text)
    }
}

macro_rules! labeled_enum {
    (
        $(#[$meta:meta])*
        $enum_name:ident {
            $($variant:ident => ($name:literal, $value:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $enum_name {
            $(
                #[doc = $value]
                $variant,
            )+
        }

        impl LabeledEnum for $enum_name {
            fn variants() -> &'static [Self] {
                &[$(Self::$variant),+]
            }

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }

            fn value(self) -> &'static str {
                match self {
                    $(Self::$variant => $value,)+
                }
            }
        }

        impl fmt::Display for $enum_name {
            fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str(self.value())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = UnknownVariant;

            fn from_str(text: &str) -> Result<Self, Self::Err> {
                <Self as LabeledEnum>::parse(text).ok_or_else(|| UnknownVariant {
                    enum_name: stringify!($enum_name),
                    text: text.to_string(),
                })
            }
        }

        impl Serialize for $enum_name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.value())
            }
        }

        impl<'de> Deserialize<'de> for $enum_name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let text = String::deserialize(deserializer)?;
                text.parse().map_err(de::Error::custom)
            }
        }
    };
}

// ── security ────────────────────────────────────────────────────────────────

labeled_enum! {
    /// Kind of issued token.
    TokenType {
        AccessToken => ("ACCESS_TOKEN", "ACCESS_TOKEN"),
        RefreshToken => ("REFRESH_TOKEN", "REFRESH_TOKEN"),
        ResetPassword => ("RESET_PASSWORD", "RESET_PASSWORD_USER"),
    }
}

labeled_enum! {
    /// Account standing of a member.
    MemberStatus {
        Active => ("ACTIVE", "Active"),
        Inactive => ("INACTIVE", "Inactive"),
        Disabled => ("DISABLED", "Disabled"),
        Banned => ("BANNED", "Banned"),
    }
}

labeled_enum! {
    /// Granted role.
    RoleType {
        SuperAdministrator => ("SUPER_ADMINISTRATOR", "Super Administrator"),
        Administrator => ("ADMINISTRATOR", "Administrator"),
        RefreshTokenUser => ("REFRESH_TOKEN_USER", "Refresh Token User"),
        PreVerifiedUser => ("PRE_VERIFIED_USER", "Pre Verified User"),
        PreAuthenticatedUser => ("PRE_AUTHENTICATED_USER", "Pre Authenticated User"),
        User => ("USER", "User"),
        Contributor => ("CONTRIBUTOR", "Contributor"),
        ResetPasswordUser => ("RESET_PASSWORD_USER", "Reset Password User"),
    }
}

labeled_enum! {
    /// Profile category.
    ProfileType {
        Contributor => ("CONTRIBUTOR", "Contributor"),
        User => ("USER", "User"),
        Admin => ("ADMIN", "Admin"),
    }
}

labeled_enum! {
    /// Second-factor channel.
    MfaType {
        Phone => ("PHONE", "PHONE"),
        Email => ("EMAIL", "Email"),
        Authenticator => ("AUTHENTICATOR", "Authenticator"),
        None => ("NONE", "None"),
    }
}

labeled_enum! {
    /// Progress of a second-factor setup.
    MfaSetupStatus {
        Complete => ("COMPLETE", "Complete"),
        InProgress => ("IN_PROGRESS", "In progress"),
    }
}

labeled_enum! {
    /// Whether a sign-in finished.
    AuthenticationStatus {
        InProgress => ("IN_PROGRESS", "In Progress"),
        Completed => ("COMPLETED", "Completed"),
    }
}

labeled_enum! {
    /// Step a sign-in is waiting on.
    AuthenticationStage {
        None => ("NONE", "None"),
        PreVerification => ("PRE_VERIFICATION", "Pre Verification"),
        MfaOrPreAuthentication => (
            "MFA_OR_PRE_AUTHENTICATION",
            "Multi Factor or Two FA or Pre Authentication"
        ),
    }
}

labeled_enum! {
    /// Review state of a contributor profile.
    ProfileVerificationStatus {
        Pending => ("PENDING", "Pending"),
        InProgress => ("IN_PROGRESS", "In Progress"),
        Disapproved => ("DISAPPROVED", "Disapproved"),
        Approved => ("APPROVED", "Approved"),
    }
}

labeled_enum! {
    /// Notification sent while a profile is reviewed.
    ProfileVerificationMessageType {
        Pending => ("PENDING", "Pending"),
        InProgress => ("IN_PROGRESS", "In Progress"),
        Disapproved => ("DISAPPROVED", "Disapproved"),
        Approved => ("APPROVED", "Approved"),
        SignupComplete => ("SIGNUP_COMPLETE", "Sign Up Complete"),
    }
}

labeled_enum! {
    /// Purpose of a verification code message.
    VerificationMessageType {
        ProfileUpdate => ("PROFILE_UPDATE", "Profile Update"),
        PreVerification => ("PRE_VERIFICATION", "Pre Verification"),
        ForgotPassword => ("FORGOT_PASSWORD", "Forgot Password"),
        PreAuthentication => ("PRE_AUTHENTICATION", "Pre Authentication"),
        MfaSetup => ("MFA_SETUP", "Multi Factor Authentication Setup"),
    }
}

labeled_enum! {
    /// Claim names written into issued tokens.
    TokenClaimField {
        FirstName => ("FIRST_NAME", "firstName"),
        LastName => ("LAST_NAME", "lastName"),
        EmailAddress => ("EMAIL_ADDRESS", "emailAddress"),
        PhoneNumber => ("PHONE_NUMBER", "phoneNumber"),
        ProfilePhoto => ("PROFILE_PHOTO", "profilePhoto"),
        Status => ("STATUS", "status"),
    }
}

// ── video ───────────────────────────────────────────────────────────────────

labeled_enum! {
    /// Publication state of a video.
    VideoStatus {
        Draft => ("DRAFT", "Draft"),
        InReview => ("IN_REVIEW", "In Review"),
        Approved => ("APPROVED", "Approved"),
        Disapproved => ("DISAPPROVED", "Disapproved"),
    }
}

labeled_enum! {
    /// Who can see a video.
    VideoVisibility {
        Public => ("PUBLIC", "Public"),
        Private => ("PRIVATE", "Private"),
        Unlisted => ("UNLISTED", "Unlisted"),
    }
}

labeled_enum! {
    /// Host a video is served from.
    VideoSource {
        Youtube => ("YOUTUBE", "YouTube"),
    }
}

labeled_enum! {
    /// Outcome of a moderator review.
    VideoReviewStatus {
        Approved => ("APPROVED", "Approved"),
        Declined => ("DECLINED", "Declined"),
    }
}

// ── general ─────────────────────────────────────────────────────────────────

labeled_enum! {
    /// Third-party system called by a service.
    ExternalSystemType {
        GoogleRecaptcha => ("GOOGLE_RECAPTCHA", "Google ReCaptcha"),
        YoutubeApi => ("YOUTUBE_API", "YouTube API"),
    }
}

labeled_enum! {
    /// Backing store for OAuth credentials.
    DataStoreType {
        File => ("FILE", "File"),
        Memory => ("MEMORY", "Memory"),
        Db => ("DB", "DB"),
    }
}

labeled_enum! {
    /// Placeholders available to email templates.
    EmailTemplateField {
        Code => ("CODE", "code"),
        EmailAddress => ("EMAIL_ADDRESS", "emailAddress"),
        PhoneNumber => ("PHONE_NUMBER", "phoneNumber"),
        FirstName => ("FIRST_NAME", "firstName"),
        LastName => ("LAST_NAME", "lastName"),
        Title => ("TITLE", "title"),
        Comment => ("COMMENT", "comment"),
    }
}

labeled_enum! {
    /// Boolean spelled as text.
    BooleanType {
        True => ("TRUE", "true"),
        False => ("FALSE", "false"),
    }
}

impl BooleanType {
    /// `true` for [`BooleanType::True`].
    pub const fn as_bool(self) -> bool {
        matches!(self, Self::True)
    }
}

impl From<bool> for BooleanType {
    fn from(value: bool) -> Self {
        if value { Self::True } else { Self::False }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn serializes_by_value_and_accepts_name() -> Result<(), Box<dyn Error>> {
        assert_eq!(serde_json::to_string(&VideoStatus::InReview)?, r#""In Review""#);
        let from_value: VideoStatus = serde_json::from_str(r#""In Review""#)?;
        let from_name: VideoStatus = serde_json::from_str(r#""IN_REVIEW""#)?;
        assert_eq!(from_value, VideoStatus::InReview);
        assert_eq!(from_name, VideoStatus::InReview);
        Ok(())
    }

    #[test]
    fn reset_password_token_value_differs_from_name() {
        assert_eq!(TokenType::ResetPassword.name(), "RESET_PASSWORD");
        assert_eq!(TokenType::ResetPassword.value(), "RESET_PASSWORD_USER");
        assert_eq!(TokenType::ResetPassword.to_string(), "RESET_PASSWORD_USER");
    }

    #[test]
    fn from_str_is_case_insensitive() -> Result<(), Box<dyn Error>> {
        assert_eq!("mfa_setup".parse::<VerificationMessageType>()?, VerificationMessageType::MfaSetup);
        assert_eq!("in progress".parse::<MfaSetupStatus>()?, MfaSetupStatus::InProgress);
        Ok(())
    }

    #[test]
    fn unknown_text_becomes_invalid_input() {
        let Err(error) = "Paused".parse::<VideoStatus>() else {
            panic!("unknown status parsed");
        };
        assert_eq!(error.to_string(), "'Paused' is not a valid VideoStatus");
        let envelope = ErrorEnvelope::from(error);
        assert_eq!(envelope.code, ErrorCode::invalid_input());
        assert_eq!(envelope.metadata.get("value").map(String::as_str), Some("Paused"));
    }

    #[test]
    fn ordinals_follow_declaration() {
        assert_eq!(RoleType::variants().len(), 8);
        assert_eq!(RoleType::User.ordinal(), 5);
        assert_eq!(MemberStatus::names(), vec!["ACTIVE", "INACTIVE", "DISABLED", "BANNED"]);
    }

    #[test]
    fn boolean_type_round_trips_bool() {
        assert_eq!(BooleanType::from(true), BooleanType::True);
        assert!(!BooleanType::False.as_bool());
        assert_eq!(BooleanType::True.value(), "true");
    }
}
