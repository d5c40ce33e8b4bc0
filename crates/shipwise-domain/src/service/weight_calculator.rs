//! Chargeable weight calculation for parcels

use crate::model::{ChargeableWeight, Dimensions, ParcelSpec};

/// cm³ per kg used by couriers for volumetric weight
pub const VOLUMETRIC_DIVISOR: f64 = 5000.0;

/// Volumetric weight in kg: L x W x H / 5000
pub fn volumetric_weight(dimensions: &Dimensions) -> f64 {
    dimensions.volume_cm3() / VOLUMETRIC_DIVISOR
}

/// Chargeable weight for a parcel.
///
/// # Formula
/// chargeable = max(actual, L x W x H / 5000)
///
/// Input is assumed to be validated already (see [`ParcelSpec::new`]); no
/// rounding is applied.
pub fn resolve_chargeable_weight(parcel: &ParcelSpec) -> ChargeableWeight {
    let volumetric_kg = volumetric_weight(&parcel.dimensions);
    ChargeableWeight {
        actual_kg: parcel.weight_kg,
        volumetric_kg,
        chargeable_kg: parcel.weight_kg.max(volumetric_kg),
    }
}
