//! GSTIN (GST Identification Number) validation and state code extraction.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::GstinError;

use super::Jurisdiction;

const GSTIN_LEN: usize = 15;
const CHARSET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// A validated GSTIN.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Gstin(String);

impl Gstin {
    /// Parse and validate a GSTIN.
    ///
    /// Layout: 2-digit state code, 10-character PAN (5 letters, 4 digits,
    /// 1 letter), entity code, literal `Z`, check character.
    pub fn parse(s: &str) -> Result<Self, GstinError> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_uppercase();

        let chars: Vec<char> = normalized.chars().collect();
        if chars.len() != GSTIN_LEN {
            return Err(GstinError::Length(chars.len()));
        }

        for (position, &ch) in chars.iter().enumerate() {
            let ok = match position {
                0 | 1 | 7..=10 => ch.is_ascii_digit(),
                2..=6 | 11 => ch.is_ascii_uppercase(),
                13 => ch == 'Z',
                _ => ch.is_ascii_digit() || ch.is_ascii_uppercase(),
            };
            if !ok {
                return Err(GstinError::Format { position, ch });
            }
        }

        let expected = check_character(&normalized[..14]);
        let found = chars[14];
        if expected != found {
            return Err(GstinError::Checksum { expected, found });
        }

        Ok(Self(normalized))
    }

    /// The state code (first two characters).
    pub fn state_code(&self) -> Jurisdiction {
        Jurisdiction(self.0[..2].to_string())
    }

    /// The embedded PAN.
    pub fn pan(&self) -> &str {
        &self.0[2..12]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Gstin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Gstin {
    type Error = GstinError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Gstin::parse(&value)
    }
}

impl From<Gstin> for String {
    fn from(value: Gstin) -> Self {
        value.0
    }
}

/// Compute the GSTIN check character over the first 14 characters.
///
/// Factors alternate 1, 2; each product folds as `p / 36 + p % 36`.
fn check_character(body: &str) -> char {
    let sum: u32 = body
        .bytes()
        .enumerate()
        .map(|(i, b)| {
            let value = CHARSET.iter().position(|&c| c == b).unwrap_or(0) as u32;
            let factor = if i % 2 == 0 { 1 } else { 2 };
            let product = value * factor;
            product / 36 + product % 36
        })
        .sum();

    let check = (36 - sum % 36) % 36;
    CHARSET[check as usize] as char
}

/// Validate a GSTIN, including its check character.
pub fn validate_gstin(gstin: &str) -> bool {
    Gstin::parse(gstin).is_ok()
}

/// Derive the state code from a tax ID without validating the rest of it.
///
/// Returns `None` for an empty ID or one whose prefix is not a state code,
/// which callers treat as an inter-state counterparty.
pub fn state_code(tax_id: &str) -> Option<Jurisdiction> {
    let prefix: String = tax_id.trim_start().chars().take(2).collect();
    Jurisdiction::new(&prefix)
}
