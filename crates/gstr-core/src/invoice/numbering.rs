//! Sequential invoice numbers of the form `PREFIX/2024-25/001`.

use chrono::{Datelike, NaiveDate};

/// Indian financial year (April to March) containing `date`, as `YYYY-YY`.
pub fn financial_year(date: NaiveDate) -> String {
    let start = if date.month() >= 4 {
        date.year()
    } else {
        date.year() - 1
    };
    format!("{}-{:02}", start, (start + 1).rem_euclid(100))
}

/// Invoice number generator.
#[derive(Debug, Clone)]
pub struct InvoiceNumbering {
    prefix: String,
    width: usize,
}

impl InvoiceNumbering {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            width: 3,
        }
    }

    /// Set the minimum number of digits in the sequence part.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Number for the next invoice after `existing` invoices have been
    /// issued.
    pub fn number(&self, existing: usize, date: NaiveDate) -> String {
        format!(
            "{}/{}/{:0width$}",
            self.prefix,
            financial_year(date),
            existing + 1,
            width = self.width
        )
    }
}
