//! Invoice drafts, persisted records and numbering.

mod draft;
mod numbering;

pub use draft::{InvoiceDraft, InvoiceRecord, InvoiceStatus};
pub use numbering::{InvoiceNumbering, financial_year};
