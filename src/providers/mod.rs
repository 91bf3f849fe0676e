mod error;
mod google_genai;

use std::time::Duration;

use reqwest::Client;
use tracing::warn;

pub use error::{ProviderError, ProviderErrorKind};
pub use google_genai::{GoogleGenAiProvider, DEFAULT_GEMINI_BASE_URL};

/// Build the shared HTTP client. System proxy discovery can panic on some
/// platforms, so a panicking or failing build falls back to `no_proxy()`.
pub(crate) fn build_http_client(timeout: Duration) -> anyhow::Result<Client> {
    let skip_proxy_discovery = cfg!(test)
        || matches!(
            std::env::var("DAILY365_NO_PROXY_DISCOVERY").as_deref(),
            Ok("1") | Ok("true")
        );

    if !skip_proxy_discovery {
        match std::panic::catch_unwind(|| Client::builder().timeout(timeout).build()) {
            Ok(Ok(client)) => return Ok(client),
            Ok(Err(e)) => warn!(error = %e, "HTTP client build failed; disabling proxy discovery"),
            Err(_) => warn!("HTTP client build panicked; disabling proxy discovery"),
        }
    }

    Client::builder()
        .timeout(timeout)
        .no_proxy()
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))
}
