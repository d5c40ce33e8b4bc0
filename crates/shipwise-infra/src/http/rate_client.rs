//! Client for the external rate calculator
//!
//! `POST {base_url}/{rate_path}` with a [`RateRequest`] body. The response
//! body is returned as raw JSON; shape checks happen in the domain
//! normalizer.

use async_trait::async_trait;
use serde_json::Value;
use shipwise_domain::model::RateRequest;
use shipwise_domain::repository::RateService;
use shipwise_types::{ConfigError, RateFetchError};
use tracing::debug;
use url::Url;

use super::{build_http_client, endpoint_label, endpoint_url, ApiConfig};

/// reqwest-backed [`RateService`]
#[derive(Debug, Clone)]
pub struct HttpRateService {
    http: reqwest::Client,
    url: Url,
}

impl HttpRateService {
    pub fn new(http: reqwest::Client, url: Url) -> Self {
        Self { http, url }
    }

    /// Build a client with its own connection pool
    pub fn from_config(config: &ApiConfig) -> Result<Self, ConfigError> {
        let http = build_http_client(config)?;
        let url = endpoint_url(&config.base_url, &config.rate_path)?;
        Ok(Self::new(http, url))
    }
}

#[async_trait]
impl RateService for HttpRateService {
    async fn calculate(&self, request: &RateRequest) -> Result<Value, RateFetchError> {
        let endpoint = endpoint_label("POST", &self.url);
        debug!(
            %endpoint,
            from = %request.from_pincode,
            to = %request.to_pincode,
            weight = request.weight,
            order_type = request.order_type,
            "requesting courier rates"
        );

        let resp = self
            .http
            .post(self.url.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| transport_error(&endpoint, e))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read response body: {e}>"));
            return Err(RateFetchError::Status {
                endpoint,
                status,
                body,
            });
        }

        resp.json::<Value>().await.map_err(|e| {
            if e.is_timeout() {
                RateFetchError::Timeout { endpoint }
            } else {
                RateFetchError::MalformedResponse {
                    reason: format!("{endpoint}: {e}"),
                }
            }
        })
    }
}

fn transport_error(endpoint: &str, e: reqwest::Error) -> RateFetchError {
    if e.is_timeout() {
        RateFetchError::Timeout {
            endpoint: endpoint.to_string(),
        }
    } else {
        RateFetchError::Transport {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        }
    }
}
