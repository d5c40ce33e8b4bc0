//! Selection and the charge breakdown handed to the order service

use serde::{Deserialize, Serialize};

use super::quote::{CourierQuote, ShippingMode};

/// The user's pick: identifies one quote by courier and mode
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub courier_name: String,
    pub mode: ShippingMode,
}

impl Selection {
    pub fn new(courier_name: impl Into<String>, mode: ShippingMode) -> Self {
        Self {
            courier_name: courier_name.into(),
            mode,
        }
    }

    pub fn of(quote: &CourierQuote) -> Self {
        Self::new(quote.courier_name.clone(), quote.mode)
    }

    pub fn matches(&self, quote: &CourierQuote) -> bool {
        quote.courier_name == self.courier_name && quote.mode == self.mode
    }
}

/// Charges copied from the selected quote at submission time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeBreakdown {
    pub shipping_charge: f64,
    pub cod_charge: f64,
    pub gst: f64,
    pub total: f64,
}

impl From<&CourierQuote> for ChargeBreakdown {
    fn from(quote: &CourierQuote) -> Self {
        Self {
            shipping_charge: quote.shipping_cost,
            cod_charge: quote.cod_charge,
            gst: quote.gst_amount,
            total: quote.total_amount,
        }
    }
}

/// Body sent to the order/payment collaborator
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderHandoffRequest {
    pub courier: String,
    pub mode: ShippingMode,
    pub charges: ChargeBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warehouse: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rto_warehouse: Option<String>,
}
