//! Health check endpoint for container orchestration.
//!
//! Provides a liveness probe that returns 200 OK with a small JSON document
//! whenever the process can answer HTTP. Used by Kubernetes and load balancers
//! to verify the service is alive.

use axum::Json;
use serde::Serialize;

/// Service name reported by the health check
pub const SERVICE_NAME: &str = "flask-app";

/// Status reported while the process is serving
pub const STATUS_HEALTHY: &str = "healthy";

/// Body of the health check response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: &'static str,
}

impl HealthStatus {
    pub const HEALTHY: Self = Self {
        status: STATUS_HEALTHY,
        service: SERVICE_NAME,
    };
}

/// Health check handler.
///
/// This is a liveness probe: it only checks that the process can respond to HTTP.
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus::HEALTHY)
}
