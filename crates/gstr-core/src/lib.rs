//! Core library for GST invoice computation.
//!
//! This crate provides:
//! - The invoice tax calculator (CGST/SGST vs IGST split by jurisdiction)
//! - GSTIN validation and state code extraction
//! - Sales and purchase invoice drafts with recomputed totals
//! - Invoice numbering by Indian financial year
//! - Rupee formatting and amount-in-words rendering
//! - Profit report summaries

pub mod error;
pub mod format;
pub mod invoice;
pub mod models;
pub mod report;
pub mod tax;

pub use error::{GstinError, GstrError, InputError, Result, ValidationError};
pub use format::{amount_in_words, format_inr, parse_amount};
pub use invoice::{InvoiceDraft, InvoiceNumbering, InvoiceRecord, InvoiceStatus, financial_year};
pub use models::invoice::{InvoiceKind, InvoiceTotals, LineItem, Party, TaxBreakdown};
pub use report::{ItemProfit, ProfitSummary};
pub use tax::{Gstin, Jurisdiction, TaxCalculator, TaxPolicy, state_code, validate_gstin};
