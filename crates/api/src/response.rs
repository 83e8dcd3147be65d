//! Success bodies and enum views.

use fleen_base_shared::{ErrorCode, LabeledEnum};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Base success body.
///
/// Only `message` goes on the wire; the message code and its parameters are
/// for resolving a localized message before the body is sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ApiResponse {
    /// Rendered message.
    pub message: String,
    /// Key for message lookup.
    #[serde(skip)]
    pub message_code: Option<String>,
    /// Arguments interpolated into the looked-up message.
    #[serde(skip)]
    pub params: Vec<String>,
}

impl ApiResponse {
    /// Response with a rendered message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            message_code: None,
            params: Vec::new(),
        }
    }

    /// Response whose message is resolved from `code` later.
    #[must_use]
    pub fn with_message_code(mut self, code: impl Into<String>) -> Self {
        self.message_code = Some(code.into());
        self
    }

    /// Message arguments.
    #[must_use]
    pub fn with_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params = params.into_iter().map(Into::into).collect();
        self
    }

    /// Response keyed by a stable error code's dotted message code.
    pub fn for_code(code: &ErrorCode, message: impl Into<String>) -> Self {
        Self::new(message).with_message_code(code.message_code())
    }
}

/// Name and display label of an enum variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EnumView {
    /// Constant name, e.g. `IN_PROGRESS`.
    pub name: String,
    /// Display value, e.g. `In progress`.
    pub label: String,
}

impl EnumView {
    /// View of one variant.
    pub fn of<E: LabeledEnum>(variant: E) -> Self {
        Self {
            name: variant.name().to_string(),
            label: variant.value().to_string(),
        }
    }

    /// Views of every variant, in declaration order.
    ///
    /// ```
    /// use fleen_base_api::EnumView;
    /// use fleen_base_domain::VideoVisibility;
    ///
    /// let views = EnumView::all::<VideoVisibility>();
    /// assert_eq!(views.first().map(|view| view.name.as_str()), Some("PUBLIC"));
    /// ```
    pub fn all<E: LabeledEnum>() -> Vec<Self> {
        E::variants().iter().copied().map(Self::of).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleen_base_domain::MfaSetupStatus;
    use serde_json::json;
    use std::error::Error;

    #[test]
    fn only_message_is_serialized() -> Result<(), Box<dyn Error>> {
        let response = ApiResponse::new("Video created")
            .with_message_code("video.created")
            .with_params(["Morning Jazz"]);
        assert_eq!(serde_json::to_value(&response)?, json!({"message": "Video created"}));
        assert_eq!(response.params, vec!["Morning Jazz".to_string()]);
        Ok(())
    }

    #[test]
    fn message_code_from_error_code() {
        let response = ApiResponse::for_code(&ErrorCode::decryption_failed(), "failed");
        assert_eq!(
            response.message_code.as_deref(),
            Some("security.decryption_failed")
        );
    }

    #[test]
    fn enum_view_uses_name_and_value() -> Result<(), Box<dyn Error>> {
        let view = EnumView::of(MfaSetupStatus::InProgress);
        assert_eq!(
            serde_json::to_value(&view)?,
            json!({"name": "IN_PROGRESS", "label": "In progress"})
        );
        Ok(())
    }
}
