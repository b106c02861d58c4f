//! Request executors.
//!
//! An [`HttpExecutor`] turns a `reqwest::Request` into a response. Plain
//! clients, middleware clients and the [`CopilotTransport`] decorator all
//! implement it, so the provider can pick one at configuration time and
//! never branch per request.

pub mod copilot;
pub mod logging;

pub use copilot::{is_copilot_url, CopilotTransport, API_VERSION, API_VERSION_HEADER, COPILOT_HOST};
pub use logging::LoggingMiddleware;

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use reqwest::{Request, Response};
use tracing::info;

/// Anything that can execute an HTTP request
#[async_trait]
pub trait HttpExecutor: Send + Sync {
    async fn execute(&self, request: Request) -> reqwest_middleware::Result<Response>;
}

#[async_trait]
impl HttpExecutor for reqwest::Client {
    async fn execute(&self, request: Request) -> reqwest_middleware::Result<Response> {
        Ok(reqwest::Client::execute(self, request).await?)
    }
}

#[async_trait]
impl HttpExecutor for reqwest_middleware::ClientWithMiddleware {
    async fn execute(&self, request: Request) -> reqwest_middleware::Result<Response> {
        reqwest_middleware::ClientWithMiddleware::execute(self, request).await
    }
}

static DEFAULT_EXECUTOR: OnceLock<Arc<dyn HttpExecutor>> = OnceLock::new();

/// Process-wide executor used when none is supplied
pub fn default_executor() -> Arc<dyn HttpExecutor> {
    DEFAULT_EXECUTOR
        .get_or_init(|| Arc::new(reqwest::Client::new()) as Arc<dyn HttpExecutor>)
        .clone()
}

/// Choose the executor for a client talking to `base_url`.
///
/// Copilot endpoints get `base` wrapped in a [`CopilotTransport`]; everything
/// else uses `base` directly.
pub fn select_executor(base_url: &str, base: Arc<dyn HttpExecutor>) -> Arc<dyn HttpExecutor> {
    if is_copilot_url(base_url) {
        info!(base_url, "Copilot endpoint detected, installing API version transport");
        Arc::new(CopilotTransport::new(Some(base)))
    } else {
        info!(base_url, "Using default executor");
        base
    }
}
