//! GST computation: jurisdictions, GSTIN handling and the invoice tax
//! calculator.

mod calculator;
pub mod gstin;

pub use calculator::{TaxCalculator, TaxPolicy};
pub use gstin::{Gstin, state_code, validate_gstin};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Two-character state code identifying a taxing region.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Jurisdiction(String);

impl Jurisdiction {
    /// Create a jurisdiction from a two-character ASCII alphanumeric code.
    pub fn new(code: &str) -> Option<Self> {
        let code = code.trim();
        if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphanumeric()) {
            Some(Self(code.to_ascii_uppercase()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Jurisdiction {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Jurisdiction::new(&value).ok_or_else(|| format!("invalid state code: {:?}", value))
    }
}

impl From<Jurisdiction> for String {
    fn from(value: Jurisdiction) -> Self {
        value.0
    }
}
