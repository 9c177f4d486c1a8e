//! Root greeting handler.

/// Greeting returned for every request to `/`
pub const GREETING: &str = "Hello from Flask on GKE, v2.0";

/// Root handler.
///
/// Returns the fixed greeting as `text/plain` regardless of method or body.
pub async fn index() -> &'static str {
    GREETING
}
