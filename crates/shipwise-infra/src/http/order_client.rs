//! Client for the order/payment hand-off endpoint

use async_trait::async_trait;
use shipwise_domain::model::OrderHandoffRequest;
use shipwise_domain::repository::OrderHandoff;
use shipwise_types::{ConfigError, HandoffError};
use tracing::debug;
use url::Url;

use super::{build_http_client, endpoint_label, endpoint_url, ApiConfig};

/// reqwest-backed [`OrderHandoff`]: `POST {base_url}/{order_path}`
#[derive(Debug, Clone)]
pub struct HttpOrderHandoff {
    http: reqwest::Client,
    url: Url,
}

impl HttpOrderHandoff {
    pub fn new(http: reqwest::Client, url: Url) -> Self {
        Self { http, url }
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ConfigError> {
        let http = build_http_client(config)?;
        let url = endpoint_url(&config.base_url, &config.order_path)?;
        Ok(Self::new(http, url))
    }
}

#[async_trait]
impl OrderHandoff for HttpOrderHandoff {
    async fn hand_off(&self, order: &OrderHandoffRequest) -> Result<(), HandoffError> {
        let endpoint = endpoint_label("POST", &self.url);
        debug!(%endpoint, courier = %order.courier, mode = %order.mode, total = order.charges.total, "handing off order");

        let resp = self
            .http
            .post(self.url.clone())
            .json(order)
            .send()
            .await
            .map_err(|e| HandoffError::Transport {
                endpoint: endpoint.clone(),
                message: e.to_string(),
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read response body: {e}>"));
            return Err(HandoffError::Rejected {
                endpoint,
                status,
                body,
            });
        }

        Ok(())
    }
}
