//! HTTP protocol layer module
//!
//! Response builders and header helpers shared by the page, API and asset
//! handlers.

pub mod cache;
pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_304_response, build_404_response, build_405_response, build_cached_response,
    build_health_response, build_html_response, build_options_response,
    build_redirect_response, strip_body, with_server_header,
};
