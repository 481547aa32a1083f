//! Logger module
//!
//! Thin helpers over `tracing` so call sites read the same everywhere:
//! - Server lifecycle logging
//! - Access logging with multiple formats (see [`AccessLogEntry`])
//! - Failure logging with correlation identifiers

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Initialize tracing and the access log sink
///
/// Should be called once at application startup. `RUST_LOG` takes
/// precedence over `logging.level`.
pub fn init(config: &Config) -> std::io::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::AlreadyExists, e))?;

    writer::init(config.logging.access_log_file.as_deref())
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    tracing::info!("======================================");
    tracing::info!("Hospital site server started");
    tracing::info!("Listening on: http://{addr}");
    tracing::info!("Log level: {}", config.logging.level);
    if let Some(workers) = config.server.workers {
        tracing::info!("Worker threads: {workers}");
    }
    if let Some(ref path) = config.logging.access_log_file {
        tracing::info!("Access log: {path}");
    }
    match config.site.root_path {
        Some(ref root) => tracing::info!("Image root path: {root}"),
        None => tracing::info!("Image root path: (relative URLs)"),
    }
    tracing::info!("======================================");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    tracing::debug!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    tracing::error!("Failed to serve connection: {err:?}");
}

pub fn log_info(message: &str) {
    tracing::info!("{message}");
}

pub fn log_error(message: &str) {
    tracing::error!("{message}");
}

pub fn log_warning(message: &str) {
    tracing::warn!("{message}");
}

/// A service substituted its bundled dataset for the store result
pub fn log_fallback(resource: &str, reason: &str) {
    tracing::warn!(resource, reason, "serving bundled dataset");
}

/// An API handler failed; the client only sees the correlation id
pub fn log_api_failure(request_id: &str, path: &str, error: &dyn std::error::Error) {
    tracing::error!(request_id, path, error = %error, "request failed");
}

pub fn log_api_request(method: &str, path: &str, status: u16, request_id: &str) {
    tracing::debug!(request_id, "[API] {method} {path} - {status}");
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    writer::write_access(&entry.format(format));
}

pub fn log_shutdown_requested(signal: &str) {
    tracing::info!("{signal} received, shutting down gracefully");
}

pub fn log_shutdown_complete() {
    tracing::info!("Server stopped");
}
