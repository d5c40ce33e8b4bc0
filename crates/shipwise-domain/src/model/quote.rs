//! Normalized courier quotes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Product name used when the provider does not send one
pub const DEFAULT_PRODUCT_NAME: &str = "Standard Service";

/// Transport mode offered by a courier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShippingMode {
    #[default]
    Surface,
    Air,
}

impl ShippingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShippingMode::Surface => "Surface",
            ShippingMode::Air => "Air",
        }
    }
}

impl fmt::Display for ShippingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShippingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "surface" => Ok(ShippingMode::Surface),
            "air" => Ok(ShippingMode::Air),
            other => Err(format!("unknown shipping mode {:?}", other)),
        }
    }
}

/// One courier's price for the queried shipment, in the provider's currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourierQuote {
    pub courier_name: String,
    pub product_name: String,
    pub mode: ShippingMode,
    pub base_rate: f64,
    pub additional_charges: f64,
    /// Freight before COD fee and tax
    pub shipping_cost: f64,
    pub cod_charge: f64,
    pub gst_amount: f64,
    pub total_amount: f64,
    pub estimated_delivery_window: Option<String>,
}

/// Quotes returned for one rate query, in provider order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSet {
    pub zone: Option<String>,
    pub quotes: Vec<CourierQuote>,
    pub quoted_at: DateTime<Utc>,
}

impl RateSet {
    /// "No rates for this route" is a displayable state, not an error
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse_is_case_insensitive() {
        assert_eq!("surface".parse::<ShippingMode>().unwrap(), ShippingMode::Surface);
        assert_eq!("AIR".parse::<ShippingMode>().unwrap(), ShippingMode::Air);
        assert_eq!(" Air ".parse::<ShippingMode>().unwrap(), ShippingMode::Air);
    }

    #[test]
    fn test_mode_parse_rejects_unknown() {
        assert!("express".parse::<ShippingMode>().is_err());
    }

    #[test]
    fn test_default_mode_is_surface() {
        assert_eq!(ShippingMode::default(), ShippingMode::Surface);
    }
}
