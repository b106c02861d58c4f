use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::error::{LLMError, Result};
use crate::transport::is_copilot_url;

/// Base URL used when none is configured
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

pub const BASE_URL_ENV: &str = "OPENAI_API_BASE_URL";

/// Provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider ID
    pub provider_id: String,
    /// Base URL for the API; empty means [`DEFAULT_BASE_URL`]
    #[serde(default)]
    pub base_url: String,
    /// API key sent as a bearer token
    #[serde(default)]
    pub api_key: String,
    /// Model used when the chat options leave it empty
    #[serde(default)]
    pub model: String,
    /// Request timeout in seconds
    #[serde(with = "serde_duration", default = "default_timeout")]
    pub timeout: Duration,
    /// Additional headers to include
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl ProviderConfig {
    /// Create a new provider config
    pub fn new(provider_id: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            provider_id: provider_id.into(),
            base_url: base_url.into(),
            api_key: String::new(),
            model: String::new(),
            timeout: default_timeout(),
            headers: HashMap::new(),
        }
    }

    /// Read `OPENAI_API_KEY` and `OPENAI_API_BASE_URL` from the environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup(API_KEY_ENV)
            .ok_or_else(|| LLMError::Config(format!("{} is not set", API_KEY_ENV)))?;
        let base_url = lookup(BASE_URL_ENV).unwrap_or_default();
        Ok(Self::new("openai", base_url).with_api_key(api_key))
    }

    /// Set API key
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = key.into();
        self
    }

    /// Set the fallback model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add a custom header
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set multiple headers
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    /// Effective base URL, without a trailing slash
    pub fn base_url(&self) -> &str {
        let url = self.base_url.trim();
        if url.is_empty() {
            DEFAULT_BASE_URL
        } else {
            url.trim_end_matches('/')
        }
    }

    /// Whether the configured endpoint is the GitHub Copilot API
    pub fn is_copilot(&self) -> bool {
        is_copilot_url(&self.base_url)
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(LLMError::Config("API key is required".to_string()));
        }
        Ok(())
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::new("openai", DEFAULT_BASE_URL)
    }
}

fn default_timeout() -> Duration {
    Duration::from_secs(60)
}

// Custom serialization for Duration
mod serde_duration {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
