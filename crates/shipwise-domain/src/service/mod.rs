//! Domain services

pub mod quote_normalizer;
pub mod weight_calculator;

pub use quote_normalizer::normalize_rate_response;
pub use weight_calculator::{resolve_chargeable_weight, volumetric_weight, VOLUMETRIC_DIVISOR};
