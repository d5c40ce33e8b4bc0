//! Connection settings for the rating and order services

use url::Url;

/// Default path of the rate calculator, relative to the base URL
pub const DEFAULT_RATE_PATH: &str = "api/v1/rates/calculate";

/// Default path of the order hand-off endpoint, relative to the base URL
pub const DEFAULT_ORDER_PATH: &str = "api/v1/orders";

/// Connection settings shared by [`super::HttpRateService`] and
/// [`super::HttpOrderHandoff`].
///
/// `Debug` redacts the token.
#[derive(Clone)]
pub struct ApiConfig {
    pub base_url: Url,
    pub rate_path: String,
    pub order_path: String,
    pub api_token: Option<String>,
    /// Whole-request timeout; expiry surfaces as a fetch error
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Settings for a local or mock server with default paths and no token
    pub fn local(base_url: Url) -> Self {
        Self {
            base_url,
            rate_path: DEFAULT_RATE_PATH.to_string(),
            order_path: DEFAULT_ORDER_PATH.to_string(),
            api_token: None,
            timeout_secs: 5,
        }
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url.as_str())
            .field("rate_path", &self.rate_path)
            .field("order_path", &self.order_path)
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_token() {
        let mut config = ApiConfig::local("http://127.0.0.1:9000".parse().unwrap());
        config.api_token = Some("super-secret".into());
        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("[REDACTED]"));
    }
}
