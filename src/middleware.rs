//! Request ID middleware for correlating logs with requests.
//!
//! Each incoming request gets a UUID v4 and a tracing span wrapping its whole
//! lifecycle, so every log line emitted while serving it carries `request_id`.
//! Responses are passed through untouched.

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::Instrument;
use uuid::Uuid;

/// Path polled by liveness probes; its completions are logged at debug level.
const PROBE_PATH: &str = "/health";

/// Request ID, available to handlers through request extensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestId(pub Uuid);

/// Middleware that generates a request ID and creates a request span.
///
/// This should be the outermost layer so the span covers routing and the
/// default 404 fallback as well as the handlers.
pub async fn request_id_layer(mut request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let is_probe = path == PROBE_PATH;

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %path,
        duration_ms = tracing::field::Empty,
    );

    request.extensions_mut().insert(RequestId(request_id));
    let start = Instant::now();

    async move {
        let response = next.run(request).await;
        let duration_ms = start.elapsed().as_millis() as u64;
        let status = response.status().as_u16();

        tracing::Span::current().record("duration_ms", duration_ms);
        if is_probe {
            tracing::debug!(status, duration_ms, "Request completed");
        } else {
            tracing::info!(status, duration_ms, "Request completed");
        }

        response
    }
    .instrument(span)
    .await
}
