//! hello-gke entry point.
//!
//! Loads configuration from the environment, initializes tracing, builds the
//! router and serves it until SIGTERM/SIGINT. Any startup failure is logged and
//! returned, which exits the process with a non-zero status.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hello_gke::config::{AppConfig, LogFormat, LoggingConfig};
use hello_gke::{create_router, start_server};

/// hello-gke: a greeting and health-check HTTP service
///
/// Configured through the environment: PORT (default 5000), RUST_LOG and
/// LOG_FORMAT (text or json).
#[derive(Parser, Debug)]
#[command(name = "hello-gke", version, about)]
struct Args {}

fn init_tracing(logging: &LoggingConfig) {
    let registry = tracing_subscriber::registry().with(EnvFilter::new(&logging.filter));

    // Logs go to stderr, alongside the error main returns on startup failure
    let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    match logging.format {
        LogFormat::Text => registry.with(layer).init(),
        LogFormat::Json => registry.with(layer.json()).init(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _args = Args::parse();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            // Config failed before the subscriber exists; log with defaults
            init_tracing(&LoggingConfig::default());
            tracing::error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    init_tracing(&config.logging);
    tracing::info!(
        port = config.http.port,
        log_format = ?config.logging.format,
        "Loaded configuration"
    );

    let app = create_router();

    if let Err(e) = start_server(app, &config.http).await {
        tracing::error!(error = %e, "Server failed");
        return Err(e.into());
    }

    Ok(())
}
