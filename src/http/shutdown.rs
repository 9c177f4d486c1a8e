//! Graceful shutdown and signal handling.
//!
//! SIGTERM (sent by Kubernetes before killing a pod) and SIGINT both stop the
//! listener and let in-flight requests complete.

use std::time::Duration;

use crate::config::SHUTDOWN_GRACE_SECS;

/// Resolves once Ctrl+C or SIGTERM is received.
///
/// A signal whose handler cannot be installed is logged and ignored; the
/// other one still triggers shutdown.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }

    tracing::info!(
        grace_secs = SHUTDOWN_GRACE_SECS,
        "Graceful shutdown initiated, waiting for connections to close"
    );
    spawn_shutdown_deadline(Duration::from_secs(SHUTDOWN_GRACE_SECS));
}

/// Force the process down if draining outlives the grace period.
fn spawn_shutdown_deadline(grace: Duration) {
    tokio::spawn(async move {
        tokio::time::sleep(grace).await;
        tracing::warn!(
            grace_secs = grace.as_secs(),
            "Connections still open after grace period, exiting"
        );
        std::process::exit(1);
    });
}
