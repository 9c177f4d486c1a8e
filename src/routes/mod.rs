//! HTTP route handlers.
//!
//! The routing table is built explicitly by `create_router` and handed to the
//! server by the caller; nothing is registered implicitly. Both routes accept
//! any method. Paths match exactly, and anything else falls through to axum's
//! default 404.
//!
//! Request tracing is enabled via middleware that generates a unique request ID
//! for each incoming request, allowing correlation of all logs within a request.

pub mod health;
pub mod home;

use axum::{middleware, routing::any, Router};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CACHE_CONTROL_HEALTH;
use crate::middleware::request_id_layer;

/// Creates the Axum router with both routes.
pub fn create_router() -> Router {
    let home_routes = Router::new().route("/", any(home::index));

    // Health check - never cached, always fresh for liveness probes
    let health_routes = Router::new()
        .route("/health", any(health::health))
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_HEALTH),
        ));

    Router::new()
        .merge(home_routes)
        .merge(health_routes)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
