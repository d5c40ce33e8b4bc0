//! Pickup warehouse definitions

use serde::{Deserialize, Serialize};
use shipwise_types::Pincode;

/// A pickup (or return-to-origin) location registered by the seller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    /// Short identifier (e.g., "WH-DEL-01")
    pub id: String,
    /// Display name
    pub name: String,
    /// Postal code used as the rate query origin
    pub pincode: Pincode,
    /// Used when no warehouse is named explicitly
    #[serde(default)]
    pub default: bool,
}
