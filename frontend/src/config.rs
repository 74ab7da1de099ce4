pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Backend host, fixed at build time through the `API_BASE_URL` variable.
pub fn api_base_url() -> &'static str {
    match option_env!("API_BASE_URL") {
        Some(url) if !url.trim().is_empty() => url,
        _ => DEFAULT_API_BASE_URL,
    }
}
