use std::fmt;

use crate::providers::{ProviderError, ProviderErrorKind};

pub(crate) const DAILY_EVENTS_MESSAGE: &str =
    "Failed to fetch calendar data. Please check your API key and network connection.";
pub(crate) const WISH_MESSAGE: &str = "Failed to generate a wish. The AI model might be busy.";

pub(crate) fn all_name_days_message(country: &str) -> String {
    format!(
        "Failed to fetch name day list for {}. The AI model may not have this data available.",
        country
    )
}

/// Failure of one calendar client call.
///
/// `Display` yields only the fixed, operation-specific message meant for the
/// end user. The technical cause lives in `detail` and goes to the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FetchErrorKind,
    pub message: String,
    pub detail: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// Caller passed an unusable argument (blank country or name).
    InvalidInput,
    /// The model endpoint could not be reached or answered with an error status.
    Transport,
    /// No answer within the configured timeout.
    Timeout,
    /// Superseded by a newer request before it finished.
    Cancelled,
    /// Empty body, invalid JSON, or JSON that does not match the requested shape.
    MalformedResponse,
}

impl FetchError {
    pub fn new(kind: FetchErrorKind, message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: detail.into(),
        }
    }

    /// Classify an error coming back from a `ModelProvider`.
    pub(crate) fn from_provider(err: &anyhow::Error, message: impl Into<String>) -> Self {
        let kind = match err.downcast_ref::<ProviderError>().map(|e| e.kind) {
            Some(ProviderErrorKind::MalformedResponse) => FetchErrorKind::MalformedResponse,
            Some(ProviderErrorKind::Timeout) => FetchErrorKind::Timeout,
            _ => FetchErrorKind::Transport,
        };
        Self::new(kind, message, format!("{:#}", err))
    }

    pub fn is_malformed(&self) -> bool {
        self.kind == FetchErrorKind::MalformedResponse
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for FetchError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_hides_technical_detail() {
        let err = FetchError::new(
            FetchErrorKind::Transport,
            DAILY_EVENTS_MESSAGE,
            "connection refused (os error 111)",
        );
        assert_eq!(err.to_string(), DAILY_EVENTS_MESSAGE);
        assert!(err.detail.contains("os error 111"));
    }

    #[test]
    fn classifies_provider_errors() {
        let malformed: anyhow::Error = ProviderError::malformed_parse("eof").into();
        assert_eq!(
            FetchError::from_provider(&malformed, WISH_MESSAGE).kind,
            FetchErrorKind::MalformedResponse
        );

        let status: anyhow::Error = ProviderError::from_status(401, "bad key").into();
        let err = FetchError::from_provider(&status, WISH_MESSAGE);
        assert_eq!(err.kind, FetchErrorKind::Transport);
        assert!(err.detail.contains("bad key"));

        let other = anyhow::anyhow!("something odd");
        assert_eq!(
            FetchError::from_provider(&other, WISH_MESSAGE).kind,
            FetchErrorKind::Transport
        );
    }

    #[test]
    fn name_day_message_mentions_country() {
        assert_eq!(
            all_name_days_message("Japan"),
            "Failed to fetch name day list for Japan. The AI model may not have this data available."
        );
    }
}
