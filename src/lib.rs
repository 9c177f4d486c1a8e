//! hello-gke: a greeting and health-check HTTP service.
//!
//! Serves a fixed greeting on `/` and a JSON liveness document on `/health`,
//! listening on `0.0.0.0:$PORT` (default 5000).

pub mod config;
pub mod http;
pub mod middleware;
pub mod routes;

pub use config::{AppConfig, ConfigError};
pub use http::{start_server, ServerError};
pub use routes::create_router;
