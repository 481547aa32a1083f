//! Request handler module
//!
//! Routes each request to health probes, the JSON API, public assets or
//! the localized pages.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
