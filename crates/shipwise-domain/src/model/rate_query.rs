//! Rate query and its wire request

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use shipwise_types::Pincode;
use std::fmt;

use super::parcel::{ChargeableWeight, Dimensions, ParcelSpec};
use super::quote::ShippingMode;
use crate::service::weight_calculator::resolve_chargeable_weight;

/// How the consignee pays
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum PaymentMode {
    #[default]
    Prepaid,
    CashOnDelivery { collectable_amount: f64 },
}

impl PaymentMode {
    pub fn is_cash_on_delivery(&self) -> bool {
        matches!(self, PaymentMode::CashOnDelivery { .. })
    }

    pub fn collectable_amount(&self) -> f64 {
        match self {
            PaymentMode::Prepaid => 0.0,
            PaymentMode::CashOnDelivery { collectable_amount } => *collectable_amount,
        }
    }
}

/// Everything the rating service needs for one quote request.
///
/// Origin and destination are kept as the raw text the caller supplied; they
/// are only checked when the query is about to be issued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateQuery {
    pub origin: String,
    pub destination: String,
    pub chargeable_weight: ChargeableWeight,
    pub dimensions: Dimensions,
    pub is_cash_on_delivery: bool,
    pub collectable_amount: f64,
}

impl RateQuery {
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        parcel: &ParcelSpec,
        payment: PaymentMode,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            chargeable_weight: resolve_chargeable_weight(parcel),
            dimensions: parcel.dimensions,
            is_cash_on_delivery: payment.is_cash_on_delivery(),
            collectable_amount: payment.collectable_amount(),
        }
    }

    /// Fingerprint of the input tuple, used to deduplicate requests and to
    /// recognise responses that arrive after the inputs moved on
    pub fn key(&self) -> QueryKey {
        let canonical = serde_json::json!([
            self.origin,
            self.destination,
            self.chargeable_weight.chargeable_kg,
            self.dimensions.length_cm,
            self.dimensions.width_cm,
            self.dimensions.height_cm,
            self.is_cash_on_delivery,
            self.collectable_amount,
        ]);
        let mut hasher = Sha256::new();
        hasher.update(canonical.to_string().as_bytes());
        QueryKey(format!("{:x}", hasher.finalize()))
    }
}

/// Hex SHA-256 of a [`RateQuery`]'s inputs
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryKey(String);

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // short form is enough for log lines
        f.write_str(&self.0[..12.min(self.0.len())])
    }
}

/// Request body for the rating service
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateRequest {
    pub from_pincode: Pincode,
    pub to_pincode: Pincode,
    pub weight: f64,
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub mode: ShippingMode,
    pub order_type: &'static str,
    pub cod_collectable_amount: f64,
    #[serde(rename = "includeRTO")]
    pub include_rto: bool,
}

impl RateRequest {
    /// Build the wire request from a query whose identifiers were already validated
    pub fn new(query: &RateQuery, from: Pincode, to: Pincode, include_rto: bool) -> Self {
        Self {
            from_pincode: from,
            to_pincode: to,
            weight: query.chargeable_weight.chargeable_kg,
            length: query.dimensions.length_cm,
            width: query.dimensions.width_cm,
            height: query.dimensions.height_cm,
            mode: ShippingMode::Surface,
            order_type: if query.is_cash_on_delivery { "cod" } else { "prepaid" },
            cod_collectable_amount: query.collectable_amount,
            include_rto,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parcel() -> ParcelSpec {
        ParcelSpec {
            weight_kg: 0.5,
            dimensions: Dimensions::new(30.0, 30.0, 30.0),
        }
    }

    #[test]
    fn test_query_uses_chargeable_weight() {
        let q = RateQuery::new("110001", "560001", &parcel(), PaymentMode::Prepaid);
        assert!((q.chargeable_weight.chargeable_kg - 5.4).abs() < 1e-9);
        assert!(!q.is_cash_on_delivery);
        assert_eq!(q.collectable_amount, 0.0);
    }

    #[test]
    fn test_key_is_stable_and_input_sensitive() {
        let a = RateQuery::new("110001", "560001", &parcel(), PaymentMode::Prepaid);
        let b = RateQuery::new("110001", "560001", &parcel(), PaymentMode::Prepaid);
        assert_eq!(a.key(), b.key());

        let c = RateQuery::new("110001", "560002", &parcel(), PaymentMode::Prepaid);
        assert_ne!(a.key(), c.key());

        let d = RateQuery::new(
            "110001",
            "560001",
            &parcel(),
            PaymentMode::CashOnDelivery {
                collectable_amount: 1200.0,
            },
        );
        assert_ne!(a.key(), d.key());
    }

    #[test]
    fn test_request_wire_shape() {
        let q = RateQuery::new(
            "110001",
            "560001",
            &parcel(),
            PaymentMode::CashOnDelivery {
                collectable_amount: 999.0,
            },
        );
        let req = RateRequest::new(
            &q,
            "110001".parse().unwrap(),
            "560001".parse().unwrap(),
            true,
        );
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["fromPincode"], "110001");
        assert_eq!(json["toPincode"], "560001");
        assert_eq!(json["mode"], "Surface");
        assert_eq!(json["orderType"], "cod");
        assert_eq!(json["codCollectableAmount"], 999.0);
        assert_eq!(json["includeRTO"], true);
        assert_eq!(json["length"], 30.0);
        assert!((json["weight"].as_f64().unwrap() - 5.4).abs() < 1e-9);
    }
}
