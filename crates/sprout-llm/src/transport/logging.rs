use http::Extensions;
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next, Result};
use tracing::debug;

/// Logs outbound requests and the status they come back with
pub struct LoggingMiddleware;

#[async_trait::async_trait]
impl Middleware for LoggingMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> Result<Response> {
        debug!(method = %req.method(), url = %req.url(), "sending request");
        let response = next.run(req, extensions).await;
        if let Ok(res) = &response {
            debug!(status = %res.status(), url = %res.url(), "received response");
        }
        response
    }
}
