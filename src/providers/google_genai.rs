use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};
use zeroize::Zeroize;

use crate::providers::ProviderError;
use crate::traits::{GenerateOptions, ModelProvider, ProviderResponse, ResponseMode, TokenUsage};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Recursively strip fields unsupported by the Gemini API from a schema.
/// Gemini rejects `$schema` and `additionalProperties` in response schemas.
fn strip_unsupported_fields(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.remove("$schema");
            map.remove("additionalProperties");
            for v in map.values_mut() {
                strip_unsupported_fields(v);
            }
        }
        Value::Array(arr) => {
            for v in arr.iter_mut() {
                strip_unsupported_fields(v);
            }
        }
        _ => {}
    }
}

fn blocked_safety_categories(ratings: Option<&Vec<Value>>) -> Vec<String> {
    let mut categories = Vec::new();
    for rating in ratings.into_iter().flatten() {
        let blocked = rating
            .get("blocked")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        if !blocked {
            continue;
        }
        if let Some(category) = rating.get("category").and_then(|v| v.as_str()) {
            if !categories.iter().any(|c| c == category) {
                categories.push(category.to_string());
            }
        }
    }
    categories
}

fn build_response_note(
    finish_reason: Option<&str>,
    prompt_block_reason: Option<&str>,
    blocked_categories: &[String],
) -> Option<String> {
    let mut parts = Vec::new();

    if let Some(reason) = prompt_block_reason {
        parts.push(format!("prompt blocked ({})", reason));
    }
    if let Some(reason) = finish_reason {
        let upper = reason.to_ascii_uppercase();
        if upper != "STOP" && upper != "MAX_TOKENS" {
            parts.push(format!("finish reason: {}", reason));
        }
    }
    if !blocked_categories.is_empty() {
        parts.push(format!(
            "safety categories: {}",
            blocked_categories.join(", ")
        ));
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("; "))
    }
}

/// Gemini `generateContent` client authenticated with an API key header.
pub struct GoogleGenAiProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl Drop for GoogleGenAiProvider {
    fn drop(&mut self) {
        self.api_key.zeroize();
    }
}

impl GoogleGenAiProvider {
    pub fn new(api_key: &str, base_url: Option<&str>, timeout: Duration) -> anyhow::Result<Self> {
        let client = crate::providers::build_http_client(timeout)?;
        let base_url = base_url
            .unwrap_or(DEFAULT_GEMINI_BASE_URL)
            .trim_end_matches('/')
            .to_string();
        Ok(Self {
            client,
            base_url,
            api_key: api_key.to_string(),
        })
    }

    fn build_request_body(&self, prompt: &str, options: &GenerateOptions) -> Value {
        let mut body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }],
        });

        if let ResponseMode::JsonSchema { schema } = &options.response_mode {
            let mut stripped = schema.clone();
            strip_unsupported_fields(&mut stripped);
            body["generation_config"] = json!({
                "response_mime_type": "application/json",
                "response_schema": stripped
            });
        }

        body
    }

    /// Parse a Gemini generateContent response into a ProviderResponse.
    fn parse_response(&self, data: &Value, model: &str) -> ProviderResponse {
        let usage = data.get("usageMetadata").and_then(|u| {
            Some(TokenUsage {
                input_tokens: u.get("promptTokenCount")?.as_u64()?,
                output_tokens: u.get("candidatesTokenCount")?.as_u64()?,
                model: model.to_string(),
            })
        });

        let prompt_feedback = data.get("promptFeedback");
        let prompt_block_reason = prompt_feedback
            .and_then(|pf| pf.get("blockReason"))
            .and_then(|v| v.as_str());

        let Some(candidate) = data["candidates"].get(0) else {
            let prompt_blocked = blocked_safety_categories(
                prompt_feedback
                    .and_then(|pf| pf.get("safetyRatings"))
                    .and_then(|v| v.as_array()),
            );
            warn!(
                model,
                prompt_block_reason = prompt_block_reason.unwrap_or(""),
                blocked_categories = ?prompt_blocked,
                "Gemini returned no candidates"
            );
            let response_note = build_response_note(None, prompt_block_reason, &prompt_blocked)
                .or_else(|| Some("no candidates returned by provider".to_string()));
            return ProviderResponse {
                content: None,
                usage,
                response_note,
            };
        };

        let finish_reason = candidate.get("finishReason").and_then(|v| v.as_str());
        let blocked = blocked_safety_categories(
            candidate
                .get("safetyRatings")
                .and_then(|ratings| ratings.as_array()),
        );
        let mut response_note = build_response_note(finish_reason, prompt_block_reason, &blocked);

        let parts = candidate["content"]["parts"]
            .as_array()
            .map(|p| p.as_slice())
            .unwrap_or_default();

        let mut text = String::new();
        for part in parts {
            // Thinking models interleave thought parts; those are never the answer.
            if part.get("thought").and_then(|v| v.as_bool()).unwrap_or(false) {
                continue;
            }
            if let Some(chunk) = part.get("text").and_then(|s| s.as_str()) {
                text.push_str(chunk);
            }
        }

        if text.trim().is_empty() {
            let extra = format!(
                "empty response (finishReason={}, parts={})",
                finish_reason.unwrap_or("unknown"),
                parts.len()
            );
            response_note = Some(match response_note {
                Some(existing) => format!("{}; {}", existing, extra),
                None => extra,
            });
            warn!(
                model,
                finish_reason = finish_reason.unwrap_or(""),
                parts = parts.len(),
                "Gemini returned empty response"
            );
        }

        ProviderResponse {
            content: if text.is_empty() { None } else { Some(text) },
            usage,
            response_note,
        }
    }
}

#[async_trait]
impl ModelProvider for GoogleGenAiProvider {
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        options: &GenerateOptions,
    ) -> anyhow::Result<ProviderResponse> {
        let body = self.build_request_body(prompt, options);
        // Header auth keeps the key out of URLs and therefore out of logs.
        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        info!(
            model,
            url_prefix = %self.base_url,
            json_schema = matches!(options.response_mode, ResponseMode::JsonSchema { .. }),
            "Calling Google GenAI"
        );

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Google GenAI HTTP request failed: {}", e);
                ProviderError::network(&e)
            })?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| {
            error!("Failed to read response body: {}", e);
            ProviderError::network(&e)
        })?;

        if !status.is_success() {
            error!(status = %status, "Google GenAI API error: {}", text);
            return Err(ProviderError::from_status(status.as_u16(), &text).into());
        }

        debug!(model, body_len = text.len(), "Google GenAI response received");
        let data: Value = serde_json::from_str(&text).map_err(|e| {
            error!("Failed to parse Google GenAI response JSON: {}", e);
            ProviderError::malformed_parse(format!(
                "Malformed response from LLM provider (JSON parse error: {})",
                e
            ))
        })?;
        Ok(self.parse_response(&data, model))
    }
}
