use std::fmt;

/// Classified provider error: tells the caller *why* the LLM call failed.
#[derive(Debug)]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    pub status: Option<u16>,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// 401/403: bad API key or permissions.
    Auth,
    /// 429: rate limited or quota exhausted.
    RateLimit,
    /// 404 or "model not found": bad model name.
    NotFound,
    /// 408, request timeout, or provider took too long.
    Timeout,
    /// Connection refused, DNS failure, reset, etc.
    Network,
    /// 500/502/503/504: provider-side outage.
    ServerError,
    /// 2xx with a body that is not the JSON envelope we expect.
    MalformedResponse,
    /// Anything else.
    Unknown,
}

impl ProviderError {
    pub fn from_status(status: u16, body: &str) -> Self {
        let kind = match status {
            401 | 403 => ProviderErrorKind::Auth,
            404 => ProviderErrorKind::NotFound,
            408 => ProviderErrorKind::Timeout,
            429 => ProviderErrorKind::RateLimit,
            500 | 502 | 503 | 504 => ProviderErrorKind::ServerError,
            _ => ProviderErrorKind::Unknown,
        };

        Self {
            kind,
            status: Some(status),
            message: truncate_body(body),
        }
    }

    pub fn network(err: &reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ProviderErrorKind::Timeout
        } else {
            ProviderErrorKind::Network
        };
        Self {
            kind,
            status: None,
            message: err.to_string(),
        }
    }

    pub fn malformed_parse(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::MalformedResponse,
            status: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(status) = self.status {
            write!(f, "Provider error ({}, {:?}): {}", status, self.kind, self.message)
        } else {
            write!(f, "Provider error ({:?}): {}", self.kind, self.message)
        }
    }
}

impl std::error::Error for ProviderError {}

fn truncate_body(body: &str) -> String {
    match body.char_indices().nth(300) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_common_statuses() {
        assert_eq!(
            ProviderError::from_status(403, "denied").kind,
            ProviderErrorKind::Auth
        );
        assert_eq!(
            ProviderError::from_status(429, "{}").kind,
            ProviderErrorKind::RateLimit
        );
        assert_eq!(
            ProviderError::from_status(503, "").kind,
            ProviderErrorKind::ServerError
        );
        assert_eq!(
            ProviderError::from_status(418, "").kind,
            ProviderErrorKind::Unknown
        );
    }

    #[test]
    fn truncates_long_bodies_on_char_boundary() {
        let body = "ž".repeat(400);
        let err = ProviderError::from_status(500, &body);
        assert!(err.message.ends_with("..."));
        assert_eq!(err.message.chars().count(), 303);
    }

    #[test]
    fn display_includes_status_when_present() {
        let err = ProviderError::from_status(404, "no such model");
        assert_eq!(
            err.to_string(),
            "Provider error (404, NotFound): no such model"
        );
        let err = ProviderError::malformed_parse("bad json");
        assert_eq!(err.to_string(), "Provider error (MalformedResponse): bad json");
    }
}
