//! Core types for shipping rate selection

mod error;
mod types;

pub use error::*;
pub use types::*;
