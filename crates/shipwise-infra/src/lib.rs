//! Infrastructure layer - HTTP clients for the rating and order services,
//! the TOML warehouse directory, and the parcel CSV loader

pub mod http;
pub mod parcel_csv;
pub mod persistence;
pub mod warehouse_loader;
