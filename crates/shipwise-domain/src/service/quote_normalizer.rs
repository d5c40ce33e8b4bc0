//! Normalization of rating-service responses into [`CourierQuote`]s
//!
//! Providers send loosely typed records: numbers may be missing, `null`, or
//! numeric strings. Optional fields fall back to defaults; only a record
//! without a courier name is rejected; an unknown mode falls back to Surface.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use shipwise_types::RateFetchError;
use tracing::warn;

use crate::model::{CourierQuote, RateSet, ShippingMode, DEFAULT_PRODUCT_NAME};

/// Parse a raw response body `{ zone, calculations: [...] }` into a [`RateSet`].
///
/// Quote order is the provider's.
pub fn normalize_rate_response(
    body: &Value,
    quoted_at: DateTime<Utc>,
) -> Result<RateSet, RateFetchError> {
    let object = body.as_object().ok_or_else(|| RateFetchError::MalformedResponse {
        reason: format!("expected a JSON object, got {}", type_name(body)),
    })?;

    let calculations = match object.get("calculations") {
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(RateFetchError::MalformedResponse {
                reason: format!("`calculations` must be an array, got {}", type_name(other)),
            })
        }
        None => {
            return Err(RateFetchError::MalformedResponse {
                reason: "missing `calculations`".to_string(),
            })
        }
    };

    let quotes = calculations
        .iter()
        .enumerate()
        .map(|(index, record)| normalize_quote(index, record))
        .collect::<Result<Vec<_>, _>>()?;

    let zone = object
        .get("zone")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|z| !z.is_empty())
        .map(str::to_string);

    Ok(RateSet {
        zone,
        quotes,
        quoted_at,
    })
}

/// Normalize one provider record
pub fn normalize_quote(index: usize, record: &Value) -> Result<CourierQuote, RateFetchError> {
    let fields = record.as_object().ok_or_else(|| RateFetchError::InvalidQuote {
        index,
        reason: format!("expected an object, got {}", type_name(record)),
    })?;

    let courier_name = text_field(fields, "courier").ok_or_else(|| RateFetchError::InvalidQuote {
        index,
        reason: "missing courier name".to_string(),
    })?;

    let product_name =
        text_field(fields, "productName").unwrap_or_else(|| DEFAULT_PRODUCT_NAME.to_string());

    let mode = match fields.get("mode") {
        None | Some(Value::Null) => ShippingMode::Surface,
        Some(Value::String(s)) if s.trim().is_empty() => ShippingMode::Surface,
        Some(Value::String(s)) => s.trim().parse().unwrap_or_else(|reason: String| {
            warn!(index, %courier_name, %reason, "defaulting quote mode to Surface");
            ShippingMode::Surface
        }),
        Some(other) => {
            warn!(
                index,
                %courier_name,
                kind = type_name(other),
                "non-string quote mode, defaulting to Surface"
            );
            ShippingMode::Surface
        }
    };

    let base_rate = number_field(fields, "baseRate").unwrap_or(0.0);
    let additional_charges = number_field(fields, "addlRate").unwrap_or(0.0);
    let shipping_cost =
        number_field(fields, "shippingCost").unwrap_or(base_rate + additional_charges);

    Ok(CourierQuote {
        courier_name,
        product_name,
        mode,
        base_rate,
        additional_charges,
        shipping_cost,
        cod_charge: number_field(fields, "codCharges").unwrap_or(0.0),
        gst_amount: number_field(fields, "gst").unwrap_or(0.0),
        total_amount: number_field(fields, "total").unwrap_or(0.0),
        estimated_delivery_window: delivery_window(fields),
    })
}

/// Finite number from a JSON number or numeric string
fn number_field(fields: &Map<String, Value>, key: &str) -> Option<f64> {
    let value = match fields.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    value.is_finite().then_some(value)
}

fn text_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn delivery_window(fields: &Map<String, Value>) -> Option<String> {
    ["estimatedDelivery", "edd"].iter().find_map(|key| match fields.get(*key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(format!("{} days", n)),
        _ => None,
    })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn test_full_record() {
        let body = json!({
            "zone": "D",
            "calculations": [{
                "courier": "Delhivery",
                "productName": "Delhivery Surface 0.5kg",
                "mode": "Surface",
                "baseRate": 40,
                "addlRate": 12.5,
                "shippingCost": 52.5,
                "gst": 9.45,
                "codCharges": 35,
                "total": 96.95,
                "estimatedDelivery": "3-5 days"
            }]
        });
        let set = normalize_rate_response(&body, now()).unwrap();
        assert_eq!(set.zone.as_deref(), Some("D"));
        let q = &set.quotes[0];
        assert_eq!(q.courier_name, "Delhivery");
        assert_eq!(q.product_name, "Delhivery Surface 0.5kg");
        assert_eq!(q.mode, ShippingMode::Surface);
        assert_eq!(q.base_rate, 40.0);
        assert_eq!(q.additional_charges, 12.5);
        assert_eq!(q.shipping_cost, 52.5);
        assert_eq!(q.cod_charge, 35.0);
        assert_eq!(q.gst_amount, 9.45);
        assert_eq!(q.total_amount, 96.95);
        assert_eq!(q.estimated_delivery_window.as_deref(), Some("3-5 days"));
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let body = json!({ "calculations": [{ "courier": "Ekart" }] });
        let set = normalize_rate_response(&body, now()).unwrap();
        let q = &set.quotes[0];
        assert_eq!(q.product_name, DEFAULT_PRODUCT_NAME);
        assert_eq!(q.mode, ShippingMode::Surface);
        assert_eq!(q.base_rate, 0.0);
        assert_eq!(q.additional_charges, 0.0);
        assert_eq!(q.shipping_cost, 0.0);
        assert_eq!(q.cod_charge, 0.0);
        assert_eq!(q.gst_amount, 0.0);
        assert_eq!(q.total_amount, 0.0);
        assert!(q.estimated_delivery_window.is_none());
        assert!(set.zone.is_none());
    }

    #[test]
    fn test_null_and_garbage_numbers_default_to_zero() {
        let body = json!({ "calculations": [{
            "courier": "Xpressbees",
            "baseRate": null,
            "gst": "n/a",
            "codCharges": true,
            "total": "118.00"
        }]});
        let q = &normalize_rate_response(&body, now()).unwrap().quotes[0];
        assert_eq!(q.base_rate, 0.0);
        assert_eq!(q.gst_amount, 0.0);
        assert_eq!(q.cod_charge, 0.0);
        assert_eq!(q.total_amount, 118.0);
        assert!(q.total_amount.is_finite());
    }

    #[test]
    fn test_shipping_cost_falls_back_to_base_plus_additional() {
        let body = json!({ "calculations": [{
            "courier": "Bluedart", "baseRate": 60, "addlRate": 20
        }]});
        let q = &normalize_rate_response(&body, now()).unwrap().quotes[0];
        assert_eq!(q.shipping_cost, 80.0);
    }

    #[test]
    fn test_preserves_provider_order() {
        let body = json!({ "calculations": [
            { "courier": "C", "total": 30 },
            { "courier": "A", "total": 10 },
            { "courier": "B", "total": 20 }
        ]});
        let names: Vec<_> = normalize_rate_response(&body, now())
            .unwrap()
            .quotes
            .into_iter()
            .map(|q| q.courier_name)
            .collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_empty_calculations_is_valid() {
        let set = normalize_rate_response(&json!({ "zone": "A", "calculations": [] }), now()).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_air_mode_and_numeric_edd() {
        let body = json!({ "calculations": [{ "courier": "Bluedart", "mode": "air", "edd": 2 }]});
        let q = &normalize_rate_response(&body, now()).unwrap().quotes[0];
        assert_eq!(q.mode, ShippingMode::Air);
        assert_eq!(q.estimated_delivery_window.as_deref(), Some("2 days"));
    }

    #[test]
    fn test_missing_courier_is_rejected() {
        let body = json!({ "calculations": [{ "courier": "A" }, { "total": 10 }]});
        let err = normalize_rate_response(&body, now()).unwrap_err();
        assert!(matches!(err, RateFetchError::InvalidQuote { index: 1, .. }));
    }

    #[test]
    fn test_unknown_mode_defaults_to_surface() {
        let body = json!({ "calculations": [
            { "courier": "Delhivery", "mode": "Air", "total": 90 },
            { "courier": "Ekart", "mode": "Express", "total": 70 },
            { "courier": "Xpress", "mode": 3 }
        ]});
        let set = normalize_rate_response(&body, now()).unwrap();
        assert_eq!(set.quotes.len(), 3);
        assert_eq!(set.quotes[0].mode, ShippingMode::Air);
        assert_eq!(set.quotes[1].courier_name, "Ekart");
        assert_eq!(set.quotes[1].mode, ShippingMode::Surface);
        assert_eq!(set.quotes[1].total_amount, 70.0);
        assert_eq!(set.quotes[2].mode, ShippingMode::Surface);
    }

    #[test]
    fn test_missing_calculations_is_malformed() {
        let err = normalize_rate_response(&json!({ "zone": "A" }), now()).unwrap_err();
        assert!(matches!(err, RateFetchError::MalformedResponse { .. }));

        let err = normalize_rate_response(&json!([]), now()).unwrap_err();
        assert!(matches!(err, RateFetchError::MalformedResponse { .. }));

        let err = normalize_rate_response(&json!({ "calculations": {} }), now()).unwrap_err();
        assert!(matches!(err, RateFetchError::MalformedResponse { .. }));
    }
}
