//! Shared value types

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output format for results
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Number of digits in a postal identifier
pub const PINCODE_LEN: usize = 6;

/// A validated 6-digit postal identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pincode(String);

impl Pincode {
    /// Check `^\d{6}$` without allocating
    pub fn is_valid(raw: &str) -> bool {
        raw.len() == PINCODE_LEN && raw.bytes().all(|b| b.is_ascii_digit())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Rejected pincode text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid pincode {0:?}: expected {PINCODE_LEN} digits")]
pub struct InvalidPincode(pub String);

impl FromStr for Pincode {
    type Err = InvalidPincode;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if Self::is_valid(s) {
            Ok(Pincode(s.to_string()))
        } else {
            Err(InvalidPincode(s.to_string()))
        }
    }
}

impl TryFrom<String> for Pincode {
    type Error = InvalidPincode;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        if Self::is_valid(&value) {
            Ok(Pincode(value))
        } else {
            Err(InvalidPincode(value))
        }
    }
}

impl From<Pincode> for String {
    fn from(p: Pincode) -> Self {
        p.0
    }
}

impl fmt::Display for Pincode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
