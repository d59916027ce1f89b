//! User agent generation

/// Build the user agent sent to the upstream.
///
/// Wikimedia asks API clients to identify themselves, so this is a fixed
/// product token rather than a browser string.
pub fn generate_user_agent(suffix: Option<&str>) -> String {
    let base = format!(
        "WikiAgent/{} (+https://github.com/wikiagent/wikiagent)",
        crate::VERSION
    );
    match suffix.map(str::trim).filter(|s| !s.is_empty()) {
        Some(suffix) => format!("{} {}", base, suffix),
        None => base,
    }
}

/// Standard accept header for JSON requests
pub fn accept_json() -> &'static str {
    "application/json,text/javascript,*/*;q=0.01"
}
