use async_trait::async_trait;
use serde_json::Value;

/// Model provider: sends one prompt to a hosted LLM and returns its text.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        options: &GenerateOptions,
    ) -> anyhow::Result<ProviderResponse>;
}

/// How the model should shape its output.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ResponseMode {
    /// Free-form text.
    #[default]
    Text,
    /// JSON constrained by a Gemini-style (OpenAPI subset) schema.
    JsonSchema { schema: Value },
}

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub response_mode: ResponseMode,
}

impl GenerateOptions {
    pub fn json_schema(schema: Value) -> Self {
        Self {
            response_mode: ResponseMode::JsonSchema { schema },
        }
    }
}

/// Token usage statistics from an LLM API response.
#[derive(Debug, Clone, Default)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub model: String,
}

/// The LLM's response text plus whatever diagnostics came with it.
#[derive(Debug, Clone, Default)]
pub struct ProviderResponse {
    pub content: Option<String>,
    pub usage: Option<TokenUsage>,
    /// Optional provider-specific note about why no useful output was returned
    /// (for example Gemini finishReason/safety blocking metadata).
    pub response_note: Option<String>,
}
