//! Calendar client: turns (country, date) queries into model prompts and
//! the model's JSON back into typed records.

pub mod countries;
mod error;
mod grouping;
pub mod prompts;

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use tracing::{error, info, warn};

use crate::traits::{GenerateOptions, ModelProvider};
use crate::types::{CalendarEventData, FullNameDay, WishStyle};

pub use error::{FetchError, FetchErrorKind};
pub use grouping::{group_by_month, MonthGroup, MONTH_NAMES};

use error::{all_name_days_message, DAILY_EVENTS_MESSAGE, WISH_MESSAGE};

/// Stateless client for the three calendar requests. Cheap to clone.
#[derive(Clone)]
pub struct CalendarClient {
    provider: Arc<dyn ModelProvider>,
    model: String,
    timeout: Duration,
}

impl CalendarClient {
    pub fn new(provider: Arc<dyn ModelProvider>, model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            provider,
            model: model.into(),
            timeout,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Holidays, name days and observances for one country on one date.
    pub async fn fetch_daily_events(
        &self,
        country: &str,
        date: NaiveDate,
    ) -> Result<CalendarEventData, FetchError> {
        let country = require_non_empty(country, "country", DAILY_EVENTS_MESSAGE)?;
        let prompt = prompts::daily_events(country, date);
        let options = GenerateOptions::json_schema(prompts::daily_events_schema());

        let text = self
            .request("daily_events", &prompt, &options, DAILY_EVENTS_MESSAGE)
            .await?;
        if text.is_empty() {
            return Err(malformed("daily_events", DAILY_EVENTS_MESSAGE, "empty response body"));
        }
        parse_json(&text).map_err(|e| malformed("daily_events", DAILY_EVENTS_MESSAGE, e))
    }

    /// Every name day of the year for `country`. An empty body or `[]` means
    /// the country has no name day tradition and is not an error.
    pub async fn fetch_all_name_days(&self, country: &str) -> Result<Vec<FullNameDay>, FetchError> {
        let message = all_name_days_message(country);
        let country = require_non_empty(country, "country", &message)?;
        let prompt = prompts::all_name_days(country);
        let options = GenerateOptions::json_schema(prompts::all_name_days_schema());

        let text = self
            .request("all_name_days", &prompt, &options, &message)
            .await?;
        if text.is_empty() || text == "[]" {
            info!(country, "No name days reported");
            return Ok(Vec::new());
        }
        parse_json(&text).map_err(|e| malformed("all_name_days", &message, e))
    }

    /// A short generated wish in the style asked for, trimmed. Length is only
    /// requested in the prompt, never enforced.
    pub async fn generate_wish(
        &self,
        name: &str,
        country: &str,
        style: WishStyle,
    ) -> Result<String, FetchError> {
        let name = require_non_empty(name, "name", WISH_MESSAGE)?;
        let country = require_non_empty(country, "country", WISH_MESSAGE)?;
        let prompt = prompts::wish(name, country, style);

        let text = self
            .request("wish", &prompt, &GenerateOptions::default(), WISH_MESSAGE)
            .await?;
        if text.is_empty() {
            return Err(malformed("wish", WISH_MESSAGE, "empty response body"));
        }
        Ok(text)
    }

    /// One bounded model call. Returns the trimmed response text.
    async fn request(
        &self,
        operation: &'static str,
        prompt: &str,
        options: &GenerateOptions,
        message: &str,
    ) -> Result<String, FetchError> {
        info!(operation, model = %self.model, "Sending calendar request");

        let call = self.provider.generate(&self.model, prompt, options);
        let response = match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                let err = FetchError::from_provider(&e, message);
                error!(operation, kind = ?err.kind, detail = %err.detail, "Calendar request failed");
                return Err(err);
            }
            Err(_) => {
                error!(operation, timeout_secs = self.timeout.as_secs_f64(), "Calendar request timed out");
                return Err(FetchError::new(
                    FetchErrorKind::Timeout,
                    message,
                    format!("no response within {:?}", self.timeout),
                ));
            }
        };

        if let Some(usage) = &response.usage {
            info!(
                operation,
                model = %usage.model,
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "Token usage"
            );
        }
        if let Some(note) = &response.response_note {
            warn!(operation, note = %note, "Model attached a response note");
        }
        Ok(response
            .content
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string())
    }
}

fn require_non_empty<'a>(value: &'a str, field: &str, message: &str) -> Result<&'a str, FetchError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FetchError::new(
            FetchErrorKind::InvalidInput,
            message,
            format!("{} must not be empty", field),
        ));
    }
    Ok(trimmed)
}

fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, String> {
    serde_json::from_str(text).map_err(|e| format!("response does not match schema: {}", e))
}

fn malformed(operation: &'static str, message: &str, detail: impl Into<String>) -> FetchError {
    let err = FetchError::new(FetchErrorKind::MalformedResponse, message, detail);
    error!(operation, detail = %err.detail, "Malformed model response");
    err
}
