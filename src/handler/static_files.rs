//! Public asset serving
//!
//! Files under the configured public directory, with traversal protection
//! and `ETag` revalidation.

use std::path::{Path, PathBuf};

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use tokio::fs;

use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime};
use crate::logger;

/// Path prefixes served from the public directory
pub const PUBLIC_PREFIXES: [&str; 2] = ["/images/", "/assets/"];

/// Individual public files served at the site root
pub const ROOT_FILES: [&str; 3] = ["/favicon.ico", "/favicon.svg", "/robots.txt"];

/// Whether a request path belongs to the public directory
pub fn is_public_path(path: &str) -> bool {
    ROOT_FILES.contains(&path) || PUBLIC_PREFIXES.iter().any(|p| path.starts_with(p))
}

/// Serve a file from the public directory
pub async fn serve_public(ctx: &RequestContext<'_>, public_dir: &str) -> Response<Full<Bytes>> {
    let Some(file_path) = resolve_public_file(public_dir, ctx.path) else {
        return http::build_404_response();
    };

    let content = match fs::read(&file_path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                file_path.display()
            ));
            return http::build_404_response();
        }
    };

    let etag = cache::generate_etag(&content);
    if cache::is_not_modified(ctx.if_none_match.as_deref(), &etag) {
        return http::build_304_response(&etag);
    }

    let content_type = mime::get_content_type(file_path.extension().and_then(|e| e.to_str()));
    http::build_cached_response(Bytes::from(content), content_type, &etag)
}

/// Map a request path to a regular file inside `public_dir`
///
/// Returns `None` for missing files, directories and anything resolving
/// outside the public directory.
pub fn resolve_public_file(public_dir: &str, request_path: &str) -> Option<PathBuf> {
    let relative = request_path.trim_start_matches('/');
    if relative.is_empty() || relative.split('/').any(|part| part == "..") {
        return None;
    }

    let root = match Path::new(public_dir).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Public directory not found or inaccessible '{public_dir}': {e}"
            ));
            return None;
        }
    };

    // Missing files are an ordinary 404, not worth a log line
    let candidate = root.join(relative).canonicalize().ok()?;
    if !candidate.starts_with(&root) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {request_path} -> {}",
            candidate.display()
        ));
        return None;
    }

    candidate.is_file().then_some(candidate)
}
