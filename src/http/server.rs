//! HTTP server startup logic.

use std::future::Future;
use std::io;
use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;

use crate::config::HttpServerConfig;

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind server to {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] io::Error),
}

/// Start the HTTP server on the configured address.
///
/// Blocks until a shutdown signal arrives and in-flight requests finish.
pub async fn start_server(app: Router, config: &HttpServerConfig) -> Result<(), ServerError> {
    let listener = bind(config.socket_addr()).await?;
    serve(listener, app, shutdown::shutdown_signal()).await
}

/// Bind a TCP listener, reporting the address on failure.
pub async fn bind(addr: SocketAddr) -> Result<TcpListener, ServerError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })
}

/// Serve `app` on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    match listener.local_addr() {
        Ok(addr) => tracing::info!(%addr, "Starting HTTP server"),
        Err(e) => tracing::warn!(error = %e, "Starting HTTP server on unknown address"),
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ServerError::Serve)?;

    tracing::info!("HTTP server stopped");
    Ok(())
}
