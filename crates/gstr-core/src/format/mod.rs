//! Rupee formatting and amount-in-words rendering.

pub mod amount;
pub mod words;

pub use amount::{format_indian, format_inr, parse_amount, round_paise};
pub use words::{amount_in_words, number_to_words};
