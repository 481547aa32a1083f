//! Image reference resolution

/// Absolute URL for an image reference
///
/// Absolute sources (`http://`, `https://`, protocol-relative `//`) pass
/// through. Relative sources are joined to `root_path` with exactly one `/`
/// between them; without a root path they are returned unchanged.
pub fn resolve_image_url(root_path: Option<&str>, src: &str) -> String {
    if is_absolute(src) {
        return src.to_string();
    }
    match root_path.map(str::trim).filter(|root| !root.is_empty()) {
        Some(root) => format!(
            "{}/{}",
            root.trim_end_matches('/'),
            src.trim_start_matches('/')
        ),
        None => src.to_string(),
    }
}

fn is_absolute(src: &str) -> bool {
    src.starts_with("http://") || src.starts_with("https://") || src.starts_with("//")
}
