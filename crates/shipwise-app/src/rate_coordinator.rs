//! Issues rate queries against the rating service

use std::sync::Arc;

use chrono::Utc;
use shipwise_domain::model::{RateQuery, RateRequest, RateSet};
use shipwise_domain::repository::RateService;
use shipwise_domain::service::normalize_rate_response;
use shipwise_types::{ConfigurationError, Pincode, RateError};
use tracing::{debug, info};

/// Validates route identifiers, sends the request, and normalizes the reply.
///
/// Identifier problems are reported as [`ConfigurationError`] before anything
/// touches the network.
#[derive(Clone)]
pub struct RateQueryCoordinator {
    service: Arc<dyn RateService>,
    include_rto: bool,
}

impl RateQueryCoordinator {
    pub fn new(service: Arc<dyn RateService>) -> Self {
        Self {
            service,
            include_rto: false,
        }
    }

    pub fn with_include_rto(mut self, include_rto: bool) -> Self {
        self.include_rto = include_rto;
        self
    }

    /// Check origin, then destination. Identifiers are taken verbatim; padding is invalid.
    pub fn validate(query: &RateQuery) -> Result<(Pincode, Pincode), ConfigurationError> {
        let from = query
            .origin
            .parse::<Pincode>()
            .map_err(|_| ConfigurationError::WarehouseMissing(query.origin.clone()))?;
        let to = query
            .destination
            .parse::<Pincode>()
            .map_err(|_| ConfigurationError::DestinationMissing(query.destination.clone()))?;
        Ok((from, to))
    }

    pub async fn fetch_rates(&self, query: &RateQuery) -> Result<RateSet, RateError> {
        let (from, to) = Self::validate(query)?;
        let request = RateRequest::new(query, from, to, self.include_rto);
        debug!(key = %query.key(), weight = request.weight, "issuing rate query");

        let body = self.service.calculate(&request).await?;
        let rates = normalize_rate_response(&body, Utc::now())?;

        info!(
            quotes = rates.quotes.len(),
            zone = rates.zone.as_deref().unwrap_or("-"),
            "rate set received"
        );
        Ok(rates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use shipwise_domain::model::{Dimensions, ParcelSpec, PaymentMode};
    use shipwise_types::RateFetchError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct RecordingService {
        calls: AtomicUsize,
        last: Mutex<Option<RateRequest>>,
        reply: Result<Value, RateFetchError>,
    }

    impl RecordingService {
        fn replying(reply: Result<Value, RateFetchError>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                last: Mutex::new(None),
                reply,
            })
        }
    }

    #[async_trait]
    impl RateService for RecordingService {
        async fn calculate(&self, request: &RateRequest) -> Result<Value, RateFetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some(request.clone());
            self.reply.clone()
        }
    }

    fn query(origin: &str, destination: &str) -> RateQuery {
        let parcel = ParcelSpec::new(0.5, Dimensions::new(30.0, 30.0, 30.0)).unwrap();
        RateQuery::new(origin, destination, &parcel, PaymentMode::Prepaid)
    }

    #[tokio::test]
    async fn test_invalid_origin_never_reaches_service() {
        let service = RecordingService::replying(Ok(json!({"calculations": []})));
        let coordinator = RateQueryCoordinator::new(service.clone());

        let err = coordinator.fetch_rates(&query("", "560001")).await.unwrap_err();
        assert_eq!(
            err,
            RateError::Configuration(ConfigurationError::WarehouseMissing(String::new()))
        );
        assert!(!err.is_retryable());
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invalid_destination_never_reaches_service() {
        let service = RecordingService::replying(Ok(json!({"calculations": []})));
        let coordinator = RateQueryCoordinator::new(service.clone());

        let err = coordinator
            .fetch_rates(&query("110001", "abc123"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            RateError::Configuration(ConfigurationError::DestinationMissing("abc123".into()))
        );
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_padded_identifiers_never_reach_service() {
        let service = RecordingService::replying(Ok(json!({"calculations": []})));
        let coordinator = RateQueryCoordinator::new(service.clone());

        let err = coordinator
            .fetch_rates(&query(" 110001 ", "560001"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            RateError::Configuration(ConfigurationError::WarehouseMissing(" 110001 ".into()))
        );

        let err = coordinator
            .fetch_rates(&query("110001", "560001\n"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            RateError::Configuration(ConfigurationError::DestinationMissing("560001\n".into()))
        );
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_origin_checked_before_destination() {
        let service = RecordingService::replying(Ok(json!({"calculations": []})));
        let coordinator = RateQueryCoordinator::new(service);

        let err = coordinator.fetch_rates(&query("11", "22")).await.unwrap_err();
        assert!(matches!(
            err,
            RateError::Configuration(ConfigurationError::WarehouseMissing(_))
        ));
    }

    #[tokio::test]
    async fn test_request_uses_chargeable_weight_and_surface() {
        let service = RecordingService::replying(Ok(json!({
            "zone": "D",
            "calculations": [{
                "courier": "BlueDart", "mode": "Air",
                "baseRate": 100, "addlRate": 5, "shippingCost": 120,
                "codCharges": 0, "gst": 21.6, "total": 141.6
            }]
        })));
        let coordinator = RateQueryCoordinator::new(service.clone()).with_include_rto(true);

        let rates = coordinator
            .fetch_rates(&query("110001", "560001"))
            .await
            .unwrap();
        assert_eq!(rates.zone.as_deref(), Some("D"));
        assert_eq!(rates.quotes.len(), 1);

        let sent = service.last.lock().unwrap().clone().unwrap();
        assert!((sent.weight - 5.4).abs() < 1e-9);
        assert_eq!(sent.mode, shipwise_domain::model::ShippingMode::Surface);
        assert_eq!(sent.order_type, "prepaid");
        assert!(sent.include_rto);
    }

    #[tokio::test]
    async fn test_empty_calculations_is_success() {
        let service = RecordingService::replying(Ok(json!({"calculations": []})));
        let coordinator = RateQueryCoordinator::new(service);

        let rates = coordinator
            .fetch_rates(&query("110001", "560001"))
            .await
            .unwrap();
        assert!(rates.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_is_retryable() {
        let service = RecordingService::replying(Err(RateFetchError::Timeout {
            endpoint: "POST /api/v1/rates/calculate".into(),
        }));
        let coordinator = RateQueryCoordinator::new(service);

        let err = coordinator
            .fetch_rates(&query("110001", "560001"))
            .await
            .unwrap_err();
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_malformed_body_is_fetch_error() {
        let service = RecordingService::replying(Ok(json!({"calculations": "none"})));
        let coordinator = RateQueryCoordinator::new(service);

        let err = coordinator
            .fetch_rates(&query("110001", "560001"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RateError::Fetch(RateFetchError::MalformedResponse { .. })
        ));
    }
}
