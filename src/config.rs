use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use crate::providers::DEFAULT_GEMINI_BASE_URL;

/// Substituted when no API key is configured and startup is lenient.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY_HERE";

/// Environment variables consulted for the API key, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["API_KEY", "GEMINI_API_KEY"];

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Falls back to the environment when unset.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Refuse to start without a key instead of warning and using a placeholder.
    #[serde(default)]
    pub require_api_key: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            require_api_key: false,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_GEMINI_BASE_URL.to_string()
}
fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct CalendarConfig {
    #[serde(default = "default_country")]
    pub default_country: String,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            default_country: default_country(),
        }
    }
}

fn default_country() -> String {
    "Czech Republic".to_string()
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// Resolve the API key from config, then the environment.
    ///
    /// Without a key this either fails (`require_api_key`) or logs a warning
    /// and hands back the placeholder, so requests fail later instead.
    pub fn resolve_api_key(&self) -> anyhow::Result<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    fn resolve_api_key_with(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<String> {
        let configured = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string);
        let from_env = || {
            API_KEY_ENV_VARS
                .iter()
                .filter_map(|name| lookup(*name))
                .map(|v| v.trim().to_string())
                .find(|v| !v.is_empty())
        };

        if let Some(key) = configured.or_else(from_env) {
            return Ok(key);
        }
        if self.require_api_key {
            anyhow::bail!(
                "No API key configured. Set provider.api_key in config.toml or the API_KEY environment variable."
            );
        }
        warn!("API_KEY environment variable not set. Using a placeholder; requests will fail until a key is provided.");
        Ok(PLACEHOLDER_API_KEY.to_string())
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Load `path` if it exists, otherwise run on defaults.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        if config.provider.model.trim().is_empty() {
            anyhow::bail!("provider.model must not be empty");
        }
        Ok(config)
    }
}
