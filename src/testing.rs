//! Test infrastructure: a scripted MockProvider and a CalendarClient wired to it.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::calendar::CalendarClient;
use crate::traits::{GenerateOptions, ModelProvider, ProviderResponse, TokenUsage};

/// A recorded call to `MockProvider::generate()`.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub model: String,
    pub prompt: String,
    pub options: GenerateOptions,
}

/// Mock LLM provider that returns scripted results in FIFO order.
pub struct MockProvider {
    results: Mutex<Vec<anyhow::Result<ProviderResponse>>>,
    delay: Option<Duration>,
    call_log: Mutex<Vec<MockCall>>,
}

impl MockProvider {
    /// A provider that always answers "Mock response".
    pub fn new() -> Self {
        Self::with_results(Vec::new())
    }

    pub fn with_results(results: Vec<anyhow::Result<ProviderResponse>>) -> Self {
        Self {
            results: Mutex::new(results),
            delay: None,
            call_log: Mutex::new(Vec::new()),
        }
    }

    /// Helper: queue plain text responses.
    pub fn with_texts(texts: &[&str]) -> Self {
        Self::with_results(texts.iter().map(|t| Ok(Self::text_response(t))).collect())
    }

    /// Sleep before answering; pair with `start_paused` tests.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn text_response(text: &str) -> ProviderResponse {
        ProviderResponse {
            content: Some(text.to_string()),
            usage: Some(TokenUsage {
                input_tokens: 10,
                output_tokens: 5,
                model: "mock".to_string(),
            }),
            response_note: None,
        }
    }

    pub async fn calls(&self) -> Vec<MockCall> {
        self.call_log.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.call_log.lock().await.len()
    }
}

#[async_trait]
impl ModelProvider for MockProvider {
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        options: &GenerateOptions,
    ) -> anyhow::Result<ProviderResponse> {
        self.call_log.lock().await.push(MockCall {
            model: model.to_string(),
            prompt: prompt.to_string(),
            options: options.clone(),
        });

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let mut results = self.results.lock().await;
        if results.is_empty() {
            Ok(MockProvider::text_response("Mock response"))
        } else {
            results.remove(0)
        }
    }
}

/// Client over a mock provider with a generous timeout.
pub fn mock_client(provider: Arc<MockProvider>) -> CalendarClient {
    CalendarClient::new(provider, "mock-model", Duration::from_secs(30))
}
