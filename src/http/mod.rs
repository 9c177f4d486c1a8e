//! HTTP server module.
//!
//! Binds the listener, serves the router, and drains connections on
//! SIGTERM/SIGINT so pod termination does not cut requests mid-flight.

mod server;
mod shutdown;

pub use server::{bind, serve, start_server, ServerError};
pub use shutdown::shutdown_signal;
