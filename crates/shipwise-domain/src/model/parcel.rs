//! Parcel and chargeable weight types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Parcel dimensions in centimetres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length_cm: f64,
    pub width_cm: f64,
    pub height_cm: f64,
}

impl Dimensions {
    pub fn new(length_cm: f64, width_cm: f64, height_cm: f64) -> Self {
        Self {
            length_cm,
            width_cm,
            height_cm,
        }
    }

    /// Volume in cubic centimetres
    pub fn volume_cm3(&self) -> f64 {
        self.length_cm * self.width_cm * self.height_cm
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParcelError {
    #[error("weight must be a finite number greater than 0 kg (got {0})")]
    NonPositiveWeight(f64),

    #[error("{field} must be a finite number greater than 0 cm (got {value})")]
    NonPositiveDimension { field: &'static str, value: f64 },
}

/// A parcel as supplied by the caller.
///
/// Weight is in kilograms. The fields are public so that pre-validated data
/// can be constructed directly; [`ParcelSpec::new`] is the checked path used
/// at input boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParcelSpec {
    pub weight_kg: f64,
    pub dimensions: Dimensions,
}

impl ParcelSpec {
    /// Build a parcel, rejecting non-positive (or NaN) weight and dimensions
    pub fn new(weight_kg: f64, dimensions: Dimensions) -> Result<Self, ParcelError> {
        if !is_positive(weight_kg) {
            return Err(ParcelError::NonPositiveWeight(weight_kg));
        }
        for (field, value) in [
            ("length", dimensions.length_cm),
            ("width", dimensions.width_cm),
            ("height", dimensions.height_cm),
        ] {
            if !is_positive(value) {
                return Err(ParcelError::NonPositiveDimension { field, value });
            }
        }
        Ok(Self {
            weight_kg,
            dimensions,
        })
    }
}

/// Finite and strictly positive; rejects NaN and infinities
fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Which of the two weights a courier will bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightBasis {
    Actual,
    Volumetric,
}

impl WeightBasis {
    pub fn label(&self) -> &'static str {
        match self {
            WeightBasis::Actual => "actual",
            WeightBasis::Volumetric => "volumetric",
        }
    }
}

/// Derived billing weight: the greater of actual and volumetric weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChargeableWeight {
    pub actual_kg: f64,
    pub volumetric_kg: f64,
    pub chargeable_kg: f64,
}

impl ChargeableWeight {
    /// Ties go to the actual weight
    pub fn basis(&self) -> WeightBasis {
        if self.volumetric_kg > self.actual_kg {
            WeightBasis::Volumetric
        } else {
            WeightBasis::Actual
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_positive_values() {
        let parcel = ParcelSpec::new(0.5, Dimensions::new(10.0, 10.0, 10.0)).unwrap();
        assert!((parcel.weight_kg - 0.5).abs() < f64::EPSILON);
        assert!((parcel.dimensions.volume_cm3() - 1000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_new_rejects_zero_weight() {
        let err = ParcelSpec::new(0.0, Dimensions::new(10.0, 10.0, 10.0)).unwrap_err();
        assert_eq!(err, ParcelError::NonPositiveWeight(0.0));
    }

    #[test]
    fn test_new_rejects_nan_weight() {
        assert!(ParcelSpec::new(f64::NAN, Dimensions::new(1.0, 1.0, 1.0)).is_err());
    }

    #[test]
    fn test_new_rejects_infinite_values() {
        assert_eq!(
            ParcelSpec::new(f64::INFINITY, Dimensions::new(1.0, 1.0, 1.0)).unwrap_err(),
            ParcelError::NonPositiveWeight(f64::INFINITY)
        );
        assert_eq!(
            ParcelSpec::new(1.0, Dimensions::new(1.0, 1.0, f64::INFINITY)).unwrap_err(),
            ParcelError::NonPositiveDimension {
                field: "height",
                value: f64::INFINITY
            }
        );
        assert!(ParcelSpec::new(1.0, Dimensions::new(f64::NEG_INFINITY, 1.0, 1.0)).is_err());
    }

    #[test]
    fn test_new_names_the_bad_dimension() {
        let err = ParcelSpec::new(1.0, Dimensions::new(10.0, -2.0, 10.0)).unwrap_err();
        assert_eq!(
            err,
            ParcelError::NonPositiveDimension {
                field: "width",
                value: -2.0
            }
        );
    }

    #[test]
    fn test_basis() {
        let w = ChargeableWeight {
            actual_kg: 0.5,
            volumetric_kg: 5.4,
            chargeable_kg: 5.4,
        };
        assert_eq!(w.basis(), WeightBasis::Volumetric);

        let tie = ChargeableWeight {
            actual_kg: 2.0,
            volumetric_kg: 2.0,
            chargeable_kg: 2.0,
        };
        assert_eq!(tie.basis(), WeightBasis::Actual);
    }
}
