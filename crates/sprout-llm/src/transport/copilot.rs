//! GitHub Copilot gateway support.
//!
//! The Copilot endpoint speaks the OpenAI protocol but rejects requests that
//! lack an `X-GitHub-Api-Version` header.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Request, Response};

use super::{default_executor, HttpExecutor};

/// Host marker identifying Copilot endpoints
pub const COPILOT_HOST: &str = "api.githubcopilot.com";

pub const API_VERSION_HEADER: &str = "x-github-api-version";

pub const API_VERSION: &str = "2023-05-01";

/// Whether `url` points at the Copilot API. Matches raw text, case-insensitively.
pub fn is_copilot_url(url: &str) -> bool {
    url.to_lowercase().contains(COPILOT_HOST)
}

/// Executor decorator that stamps the Copilot API version on every request
#[derive(Clone)]
pub struct CopilotTransport {
    base: Arc<dyn HttpExecutor>,
}

impl CopilotTransport {
    /// Wrap `base`, or the process-wide default executor when `None`
    pub fn new(base: Option<Arc<dyn HttpExecutor>>) -> Self {
        Self {
            base: base.unwrap_or_else(default_executor),
        }
    }

    /// The wrapped executor
    pub fn base(&self) -> &Arc<dyn HttpExecutor> {
        &self.base
    }

    /// Copy of `request` carrying the API version header.
    ///
    /// Fails when the body is a stream and cannot be cloned.
    pub fn decorate(request: &Request) -> reqwest_middleware::Result<Request> {
        let mut cloned = request.try_clone().ok_or_else(|| {
            reqwest_middleware::Error::Middleware(anyhow::anyhow!(
                "request body cannot be cloned"
            ))
        })?;
        set_api_version(cloned.headers_mut());
        Ok(cloned)
    }

    /// Send a copy of `request`, leaving the caller's request as it was.
    pub async fn round_trip(&self, request: &Request) -> reqwest_middleware::Result<Response> {
        let decorated = Self::decorate(request)?;
        self.base.execute(decorated).await
    }
}

impl std::fmt::Debug for CopilotTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CopilotTransport").finish_non_exhaustive()
    }
}

#[async_trait]
impl HttpExecutor for CopilotTransport {
    async fn execute(&self, mut request: Request) -> reqwest_middleware::Result<Response> {
        set_api_version(request.headers_mut());
        self.base.execute(request).await
    }
}

// Overwrites any caller-provided value.
fn set_api_version(headers: &mut HeaderMap) {
    headers.insert(
        HeaderName::from_static(API_VERSION_HEADER),
        HeaderValue::from_static(API_VERSION),
    );
}
