//! reqwest-based clients for the external services

mod config;
mod order_client;
mod rate_client;

pub use config::{ApiConfig, DEFAULT_ORDER_PATH, DEFAULT_RATE_PATH};
pub use order_client::HttpOrderHandoff;
pub use rate_client::HttpRateService;

use std::time::Duration;

use shipwise_types::ConfigError;
use url::Url;

/// Build the shared HTTP client: timeout plus optional bearer token
pub fn build_http_client(config: &ApiConfig) -> Result<reqwest::Client, ConfigError> {
    let mut headers = reqwest::header::HeaderMap::new();
    if let Some(token) = config.api_token.as_deref() {
        let value = reqwest::header::HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| ConfigError::ParseError("API token contains invalid characters".into()))?;
        headers.insert(reqwest::header::AUTHORIZATION, value);
    }

    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .default_headers(headers)
        .build()
        .map_err(|e| ConfigError::ParseError(format!("failed to build HTTP client: {}", e)))
}

/// Join a relative path onto a base URL, treating the base as a directory
pub(crate) fn endpoint_url(base: &Url, path: &str) -> Result<Url, ConfigError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let dir = format!("{}/", base.path());
        base.set_path(&dir);
    }
    base.join(path.trim_start_matches('/'))
        .map_err(|e| ConfigError::InvalidUrl(path.to_string(), e.to_string()))
}

/// Method and path, for error messages and log lines
pub(crate) fn endpoint_label(method: &str, url: &Url) -> String {
    format!("{} {}", method, url.path())
}
