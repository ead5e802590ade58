//! Amount in words, Indian numbering (thousand, lakh, crore).

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use super::amount::round_paise;

const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// Spell out a whole number. Zero yields an empty string.
pub fn number_to_words(n: u64) -> String {
    match n {
        0..=19 => ONES[n as usize].to_string(),
        20..=99 => join(TENS[(n / 10) as usize], " ", &number_to_words(n % 10)),
        100..=999 => join(
            &format!("{} Hundred", ONES[(n / 100) as usize]),
            " and ",
            &number_to_words(n % 100),
        ),
        1_000..=99_999 => scaled(n, 1_000, "Thousand"),
        100_000..=9_999_999 => scaled(n, 100_000, "Lakh"),
        _ => scaled(n, 10_000_000, "Crore"),
    }
}

fn scaled(n: u64, unit: u64, name: &str) -> String {
    join(
        &format!("{} {}", number_to_words(n / unit), name),
        " ",
        &number_to_words(n % unit),
    )
}

fn join(head: &str, sep: &str, tail: &str) -> String {
    if tail.is_empty() {
        head.to_string()
    } else {
        format!("{}{}{}", head, sep, tail)
    }
}

/// Render an amount the way it is printed on an invoice, e.g.
/// `Rupees Two Hundred and Ninety Five and Fifty Paise Only`.
pub fn amount_in_words(amount: Decimal) -> String {
    let rounded = round_paise(amount);
    let abs = rounded.abs();
    let rupees = abs.trunc();
    let paise = ((abs - rupees) * Decimal::ONE_HUNDRED).to_u64().unwrap_or(0);
    let rupees = rupees.to_u64().unwrap_or(u64::MAX);

    let mut result = String::from("Rupees ");
    if rounded < Decimal::ZERO {
        result.push_str("Minus ");
    }
    if rupees == 0 {
        result.push_str("Zero");
    } else {
        result.push_str(&number_to_words(rupees));
    }
    if paise > 0 {
        result.push_str(" and ");
        result.push_str(&number_to_words(paise));
        result.push_str(" Paise");
    }
    result.push_str(" Only");
    result
}
