//! Error types for the gstr-core library.

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the gstr library.
#[derive(Error, Debug)]
pub enum GstrError {
    /// GSTIN parsing error.
    #[error("GSTIN error: {0}")]
    Gstin(#[from] GstinError),

    /// Malformed numeric input.
    #[error("input error: {0}")]
    Input(#[from] InputError),

    /// Invoice validation error.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to GSTIN parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GstinError {
    /// The identifier does not have 15 characters.
    #[error("expected 15 characters, got {0}")]
    Length(usize),

    /// A character does not fit the GSTIN layout.
    #[error("unexpected character {ch:?} at position {position}")]
    Format { position: usize, ch: char },

    /// The trailing check character is wrong.
    #[error("check character mismatch: expected {expected}, found {found}")]
    Checksum { expected: char, found: char },
}

/// Errors raised when turning raw user input into amounts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// The text is not a number.
    #[error("not a number: {0:?}")]
    NotANumber(String),

    /// The amount is larger than an invoice may carry.
    #[error("{field} {value} exceeds the maximum of {max}")]
    TooLarge {
        field: String,
        value: Decimal,
        max: Decimal,
    },
}

/// Errors related to invoice records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field is missing.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// Stored totals do not match the line items.
    #[error("{field} is {stored}, recomputed {computed}")]
    TotalsMismatch {
        field: String,
        stored: Decimal,
        computed: Decimal,
    },
}

/// Result type for the gstr library.
pub type Result<T> = std::result::Result<T, GstrError>;
