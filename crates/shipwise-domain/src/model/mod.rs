//! Domain model types

pub mod charge;
pub mod parcel;
pub mod quote;
pub mod rate_query;
pub mod warehouse;

pub use charge::{ChargeBreakdown, OrderHandoffRequest, Selection};
pub use parcel::{ChargeableWeight, Dimensions, ParcelError, ParcelSpec, WeightBasis};
pub use quote::{CourierQuote, RateSet, ShippingMode, DEFAULT_PRODUCT_NAME};
pub use rate_query::{PaymentMode, QueryKey, RateQuery, RateRequest};
pub use warehouse::Warehouse;
