use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Request, Url};
use serde_json::Value;
use sprout_core::{ChatMessage, ChatOptions};
use std::borrow::Cow;
use std::sync::Arc;

use crate::error::{ConversionError, LLMError, Result};
use crate::provider::{ProviderConfig, ProviderMetadata};
use crate::transformer::{ChatAnswer, SchemaTransformer};
use crate::transport::{select_executor, HttpExecutor, LoggingMiddleware};

/// Seconds to wait on a 429 without a usable `retry-after` header
const DEFAULT_RETRY_AFTER: u64 = 60;

/// Base provider implementation
/// Handles common HTTP functionality and delegates schema transformation
pub struct BaseProvider<T: SchemaTransformer> {
    config: ProviderConfig,
    executor: Arc<dyn HttpExecutor>,
    transformer: Arc<T>,
    pub metadata: ProviderMetadata,
}

impl<T: SchemaTransformer + 'static> BaseProvider<T> {
    /// Create a new base provider backed by a `reqwest` client with the
    /// configured timeout
    pub fn new(config: ProviderConfig, transformer: T, metadata: ProviderMetadata) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LLMError::Config(e.to_string()))?;

        let http_client = reqwest_middleware::ClientBuilder::new(client)
            .with(LoggingMiddleware)
            .build();

        Self::with_executor(config, transformer, metadata, Arc::new(http_client))
    }

    /// Create on top of a caller-supplied executor.
    ///
    /// The Copilot transport is still layered on top when the base URL asks for it.
    pub fn with_executor(
        config: ProviderConfig,
        transformer: T,
        metadata: ProviderMetadata,
        base: Arc<dyn HttpExecutor>,
    ) -> Result<Self> {
        config.validate()?;
        let executor = select_executor(&config.base_url, base);

        Ok(Self {
            config,
            executor,
            transformer: Arc::new(transformer),
            metadata,
        })
    }

    /// Get the provider ID
    pub fn provider_id(&self) -> &str {
        self.transformer.provider_id()
    }

    /// Get the config
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    pub fn metadata(&self) -> &ProviderMetadata {
        &self.metadata
    }

    /// The executor installed at construction
    pub fn executor(&self) -> &Arc<dyn HttpExecutor> {
        &self.executor
    }

    /// Build request headers
    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.config.api_key))
            .map_err(|e| LLMError::Config(format!("Invalid API key: {}", e)))?;
        headers.insert(header::AUTHORIZATION, bearer);

        // Add custom headers from config
        for (key, value) in &self.config.headers {
            let header_name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| LLMError::Config(format!("Invalid header name: {}", e)))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| LLMError::Config(format!("Invalid header value: {}", e)))?;
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }

    fn build_http_request(&self, body: &T::Request) -> Result<Request> {
        let url = format!("{}/{}", self.config.base_url(), self.transformer.endpoint());
        let url = Url::parse(&url).map_err(|e| LLMError::Config(format!("Invalid base URL: {}", e)))?;

        let body = serde_json::to_vec(body).map_err(ConversionError::from)?;

        let mut request = Request::new(Method::POST, url);
        *request.headers_mut() = self.build_headers()?;
        *request.body_mut() = Some(body.into());
        Ok(request)
    }

    /// Send a non-streaming request
    pub async fn send_request(
        &self,
        messages: &[ChatMessage],
        options: &ChatOptions,
    ) -> Result<ChatAnswer> {
        let options = self.effective_options(options);
        let body = self.transformer.transform_request(messages, &options);
        let request = self.build_http_request(&body)?;

        let response = self.executor.execute(request).await?;
        let status = response.status();

        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_RETRY_AFTER);
            let error_text = response.text().await.unwrap_or_default();

            return Err(match status.as_u16() {
                401 | 403 => LLMError::Auth(error_text),
                429 => LLMError::RateLimited { retry_after },
                _ => LLMError::Api {
                    status: status.as_u16(),
                    message: error_text,
                },
            });
        }

        let response_data: Value = response
            .json()
            .await
            .map_err(|e| LLMError::Network(e.to_string()))?;

        Ok(self.transformer.parse_response(&response_data)?)
    }

    // Empty option model falls back to the configured one.
    fn effective_options<'a>(&self, options: &'a ChatOptions) -> Cow<'a, ChatOptions> {
        if options.model.is_empty() && !self.config.model.is_empty() {
            let mut resolved = options.clone();
            resolved.model = self.config.model.clone();
            Cow::Owned(resolved)
        } else {
            Cow::Borrowed(options)
        }
    }

    /// Check that the configuration yields a valid request
    pub fn validate(&self) -> Result<()> {
        self.config.validate()?;
        let _ = self.build_headers()?;
        Ok(())
    }
}
