use async_trait::async_trait;
use sprout_core::{ChatMessage, ChatOptions};
use std::sync::Arc;

use crate::error::Result;
use crate::provider::{BaseProvider, LLMProvider, ProviderConfig, ProviderMetadata};
use crate::transformer::{ChatAnswer, ResponsesTransformer};
use crate::transport::HttpExecutor;

/// OpenAI Provider
/// Uses the OpenAI Responses API or compatible endpoints (including GitHub Copilot)
pub struct OpenAiProvider {
    base: BaseProvider<ResponsesTransformer>,
}

impl OpenAiProvider {
    /// Create with custom configuration
    pub fn with_config(config: ProviderConfig) -> Result<Self> {
        let metadata = Self::metadata_for(&config);
        let base = BaseProvider::new(config, ResponsesTransformer::new(), metadata)?;
        Ok(Self { base })
    }

    /// Create on top of a specific executor
    pub fn with_executor(config: ProviderConfig, executor: Arc<dyn HttpExecutor>) -> Result<Self> {
        let metadata = Self::metadata_for(&config);
        let base = BaseProvider::with_executor(config, ResponsesTransformer::new(), metadata, executor)?;
        Ok(Self { base })
    }

    /// Create a new OpenAI provider with API key
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(ProviderConfig::default().with_api_key(api_key))
    }

    /// Create with custom base URL (for Azure, Copilot or other compatible APIs)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let config = ProviderConfig::new("openai", base_url).with_api_key(api_key);
        Self::with_config(config)
    }

    /// Create from `OPENAI_API_KEY` / `OPENAI_API_BASE_URL`
    pub fn from_env() -> Result<Self> {
        Self::with_config(ProviderConfig::from_env()?)
    }

    /// Whether requests go through the Copilot transport
    pub fn is_copilot(&self) -> bool {
        self.base.config().is_copilot()
    }

    pub fn config(&self) -> &ProviderConfig {
        self.base.config()
    }

    /// Send a conversation and keep text and citations apart
    pub async fn answer(&self, messages: &[ChatMessage], options: &ChatOptions) -> Result<ChatAnswer> {
        self.base.send_request(messages, options).await
    }

    fn metadata_for(config: &ProviderConfig) -> ProviderMetadata {
        if config.is_copilot() {
            ProviderMetadata::new("copilot", "GitHub Copilot")
        } else {
            ProviderMetadata::new(config.provider_id.clone(), "OpenAI")
        }
    }
}

#[async_trait]
impl LLMProvider for OpenAiProvider {
    fn provider_id(&self) -> &str {
        &self.base.metadata().id
    }

    fn metadata(&self) -> &ProviderMetadata {
        self.base.metadata()
    }

    async fn chat(&self, messages: &[ChatMessage], options: &ChatOptions) -> Result<String> {
        self.answer(messages, options).await.map(ChatAnswer::into_text)
    }

    async fn validate(&self) -> Result<()> {
        self.base.validate()
    }
}
