//! Sales and purchase invoice drafts.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{InputError, Result, ValidationError};
use crate::models::invoice::{InvoiceKind, InvoiceTotals, LineItem, Party, bounded_amount, max_amount};
use crate::tax::{Gstin, Jurisdiction, TaxCalculator, state_code};

/// An invoice being authored. Holds inputs only; totals are always derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    /// Sales or purchase.
    #[serde(default)]
    pub kind: InvoiceKind,

    /// Invoice number.
    #[serde(default)]
    pub invoice_no: String,

    /// Date the invoice was issued.
    pub invoice_date: NaiveDate,

    /// Customer (sales) or vendor (purchase).
    pub counterparty: Party,

    /// Line items.
    #[serde(default)]
    pub items: Vec<LineItem>,

    /// Freight charge.
    #[serde(default)]
    pub freight: Decimal,

    /// Buyer's purchase order number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub po_no: Option<String>,

    /// Buyer's purchase order date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub po_date: Option<NaiveDate>,
}

impl InvoiceDraft {
    /// Create an empty draft.
    pub fn new(kind: InvoiceKind, invoice_date: NaiveDate, counterparty: Party) -> Self {
        Self {
            kind,
            invoice_no: String::new(),
            invoice_date,
            counterparty,
            items: Vec::new(),
            freight: Decimal::ZERO,
            po_no: None,
            po_date: None,
        }
    }

    pub fn with_invoice_no(mut self, invoice_no: impl Into<String>) -> Self {
        self.invoice_no = invoice_no.into();
        self
    }

    pub fn with_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_freight(mut self, freight: Decimal) -> Self {
        self.freight = freight;
        self
    }

    /// Parse a draft from JSON, clamping numeric inputs into valid ranges.
    ///
    /// Prices and freight above `max_amount()` are rejected rather than
    /// clamped.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut draft: InvoiceDraft = serde_json::from_str(json)?;
        draft.check_amounts()?;
        draft.clamp_inputs();
        Ok(draft)
    }

    /// Reject prices and freight too large to invoice.
    pub fn check_amounts(&self) -> std::result::Result<(), InputError> {
        let max = max_amount();
        let too_large = |field: String, value: Decimal| InputError::TooLarge { field, value, max };

        for (idx, item) in self.items.iter().enumerate() {
            if item.unit_price > max {
                return Err(too_large(format!("item {} price", idx + 1), item.unit_price));
            }
        }

        if self.freight > max {
            return Err(too_large("freight".to_string(), self.freight));
        }

        Ok(())
    }

    /// Force item prices, rates, discounts and freight into valid ranges.
    pub fn clamp_inputs(&mut self) {
        for (idx, item) in self.items.iter_mut().enumerate() {
            let clamped = item.clone().clamped();
            if clamped != *item {
                warn!(item = idx + 1, name = %item.name, "clamped out-of-range line item values");
                *item = clamped;
            }
        }

        let freight = bounded_amount(self.freight);
        if freight != self.freight {
            warn!(freight = %self.freight, "out-of-range freight clamped to {}", freight);
            self.freight = freight;
        }
    }

    /// State code of the counterparty, from its GSTIN.
    pub fn counterparty_jurisdiction(&self) -> Option<Jurisdiction> {
        self.counterparty.gstin.as_deref().and_then(state_code)
    }

    /// Compute totals for the current inputs.
    pub fn totals(&self, calculator: &TaxCalculator) -> InvoiceTotals {
        calculator.calculate(
            &self.items,
            self.freight,
            self.counterparty_jurisdiction().as_ref(),
        )
    }

    /// Check the draft and return any issues found.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        let party = self.kind.counterparty_label();

        if self.invoice_no.trim().is_empty() {
            issues.push("Missing invoice number".to_string());
        }

        if self.counterparty.name.trim().is_empty() {
            issues.push(format!("Missing {} name", party));
        }

        if let Some(gstin) = self.counterparty.gstin.as_deref().filter(|g| !g.is_empty()) {
            if let Err(e) = Gstin::parse(gstin) {
                issues.push(format!("Invalid {} GSTIN {}: {}", party, gstin, e));
            }
        }

        if self.items.is_empty() {
            issues.push("No line items".to_string());
        }

        for (idx, item) in self.items.iter().enumerate() {
            let label = if item.name.is_empty() {
                format!("Item {}", idx + 1)
            } else {
                format!("Item {} ({})", idx + 1, item.name)
            };

            if self.kind == InvoiceKind::Sales && item.exceeds_stock() {
                issues.push(format!(
                    "{}: quantity {} exceeds available stock {}",
                    label,
                    item.quantity,
                    item.stock.unwrap_or_default()
                ));
            }

            if item.discount_percent < Decimal::ZERO || item.discount_percent > Decimal::ONE_HUNDRED
            {
                issues.push(format!(
                    "{}: discount {}% is outside 0-100",
                    label, item.discount_percent
                ));
            }

            if item.unit_price < Decimal::ZERO {
                issues.push(format!("{}: negative price {}", label, item.unit_price));
            }

            if item.tax_rate_percent < Decimal::ZERO {
                issues.push(format!("{}: negative GST rate {}", label, item.tax_rate_percent));
            }
        }

        if self.freight < Decimal::ZERO {
            issues.push(format!("Negative freight {}", self.freight));
        }

        issues
    }

    /// Build the record submitted for persistence, with freshly computed
    /// totals.
    pub fn into_record(self, calculator: &TaxCalculator) -> InvoiceRecord {
        let totals = self.totals(calculator);
        let status = match self.kind {
            InvoiceKind::Sales => InvoiceStatus::UnderProcess,
            InvoiceKind::Purchase => InvoiceStatus::Received,
        };

        debug!(
            invoice_no = %self.invoice_no,
            grand_total = %totals.grand_total,
            "built invoice record"
        );

        InvoiceRecord {
            invoice: self,
            totals,
            status,
        }
    }
}

/// Processing status of a stored invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvoiceStatus {
    /// Sales invoice awaiting dispatch.
    UnderProcess,
    /// Purchase invoice booked.
    Received,
    /// Sales invoice dispatched. Set by the dispatch workflow outside this
    /// crate; present so stored records deserialize.
    Completed,
}

/// The persisted form of an invoice: inputs plus derived totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    pub invoice: InvoiceDraft,
    pub totals: InvoiceTotals,
    pub status: InvoiceStatus,
}

impl InvoiceRecord {
    /// Recompute totals from the stored inputs and check they match.
    pub fn verify_totals(&self, calculator: &TaxCalculator) -> std::result::Result<(), ValidationError> {
        let computed = self.invoice.totals(calculator);
        let stored = &self.totals;

        let fields = [
            ("subtotal", stored.subtotal, computed.subtotal),
            ("freight", stored.freight, computed.freight),
            ("central_tax", stored.central_tax, computed.central_tax),
            ("state_tax", stored.state_tax, computed.state_tax),
            ("integrated_tax", stored.integrated_tax, computed.integrated_tax),
            ("grand_total", stored.grand_total, computed.grand_total),
        ];

        for (field, was, now) in fields {
            if was != now {
                return Err(ValidationError::TotalsMismatch {
                    field: field.to_string(),
                    stored: was,
                    computed: now,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GstrError;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 14).unwrap()
    }

    fn sales_draft(gstin: &str) -> InvoiceDraft {
        InvoiceDraft::new(
            InvoiceKind::Sales,
            date(),
            Party::new("Sharma Traders").with_gstin(gstin),
        )
        .with_invoice_no("NLTE/2024-25/001")
        .with_item(LineItem::new(2, dec("100"), Decimal::ZERO, dec("18")).with_name("Ceiling Fan"))
        .with_freight(dec("50"))
    }

    #[test]
    fn test_totals_follow_counterparty_state() {
        let calc = TaxCalculator::default();

        let local = sales_draft("23CAWPV8800M1ZT").totals(&calc);
        assert_eq!(local.central_tax, dec("22.5"));
        assert_eq!(local.integrated_tax, Decimal::ZERO);

        let remote = sales_draft("27AAPFU0939F1ZV").totals(&calc);
        assert_eq!(remote.integrated_tax, dec("45"));
        assert_eq!(remote.grand_total, local.grand_total);
    }

    #[test]
    fn test_unregistered_party_is_inter_state() {
        let calc = TaxCalculator::default();
        let mut draft = sales_draft("");
        draft.counterparty.gstin = None;

        assert_eq!(draft.counterparty_jurisdiction(), None);
        assert_eq!(draft.totals(&calc).integrated_tax, dec("45"));
    }

    #[test]
    fn test_validate_clean_draft() {
        assert!(sales_draft("23CAWPV8800M1ZT").validate().is_empty());
    }

    #[test]
    fn test_validate_reports_issues() {
        let mut draft = InvoiceDraft::new(InvoiceKind::Purchase, date(), Party::default());
        draft.counterparty.gstin = Some("29AABCU9603R1ZM".to_string());

        let issues = draft.validate();
        assert!(issues.contains(&"Missing invoice number".to_string()));
        assert!(issues.contains(&"Missing vendor name".to_string()));
        assert!(issues.contains(&"No line items".to_string()));
        assert!(issues.iter().any(|i| i.starts_with("Invalid vendor GSTIN")));
    }

    #[test]
    fn test_validate_stock_only_for_sales() {
        let item = LineItem::new(5, dec("10"), Decimal::ZERO, dec("18"))
            .with_name("Iron")
            .with_stock(3);

        let sales = sales_draft("23CAWPV8800M1ZT").with_item(item.clone());
        assert_eq!(
            sales.validate(),
            vec!["Item 2 (Iron): quantity 5 exceeds available stock 3".to_string()]
        );

        let mut purchase = sales_draft("23CAWPV8800M1ZT").with_item(item);
        purchase.kind = InvoiceKind::Purchase;
        assert!(purchase.validate().is_empty());
    }

    #[test]
    fn test_from_json_clamps_inputs() {
        let json = r#"{
            "kind": "purchase",
            "invoice_no": "P-17",
            "invoice_date": "2024-09-14",
            "counterparty": {"name": "Gupta Electricals", "gstin": "23CAWPV8800M1ZT"},
            "items": [{"name": "Wire", "quantity": 10, "price": "-4", "discount": 140, "gstRate": 18}],
            "freight": "-20"
        }"#;

        let draft = InvoiceDraft::from_json(json).unwrap();
        assert_eq!(draft.items[0].unit_price, Decimal::ZERO);
        assert_eq!(draft.items[0].discount_percent, Decimal::ONE_HUNDRED);
        assert_eq!(draft.freight, Decimal::ZERO);
        assert!(draft.validate().is_empty());
    }

    #[test]
    fn test_from_json_rejects_oversized_amounts() {
        let json = r#"{
            "invoice_date": "2024-09-14",
            "counterparty": {"name": "X"},
            "items": [{"quantity": 4000000000, "price": "100000000000000000000", "gstRate": 18}]
        }"#;

        match InvoiceDraft::from_json(json) {
            Err(GstrError::Input(InputError::TooLarge { field, value, max })) => {
                assert_eq!(field, "item 1 price");
                assert_eq!(value, dec("100000000000000000000"));
                assert_eq!(max, max_amount());
            }
            other => panic!("expected TooLarge, got {:?}", other),
        }

        let json = r#"{
            "invoice_date": "2024-09-14",
            "counterparty": {"name": "X"},
            "freight": "1000000000000001"
        }"#;
        assert!(matches!(
            InvoiceDraft::from_json(json),
            Err(GstrError::Input(InputError::TooLarge { .. }))
        ));
    }

    #[test]
    fn test_largest_draft_totals_are_finite() {
        let calc = TaxCalculator::default();
        let draft = InvoiceDraft::new(InvoiceKind::Sales, date(), Party::new("Bulk Buyer"))
            .with_item(LineItem::new(u32::MAX, max_amount(), Decimal::ZERO, dec("28")))
            .with_freight(max_amount());

        let totals = draft.totals(&calc);
        assert_eq!(totals.subtotal, Decimal::from(u32::MAX) * max_amount());
        assert_eq!(
            totals.grand_total,
            totals.subtotal + totals.freight + totals.total_tax()
        );
    }

    #[test]
    fn test_from_json_rejects_malformed_amount() {
        let json = r#"{
            "invoice_date": "2024-09-14",
            "counterparty": {"name": "X"},
            "items": [{"quantity": 1, "price": "abc"}]
        }"#;
        assert!(InvoiceDraft::from_json(json).is_err());
    }

    #[test]
    fn test_record_totals_are_recomputed() {
        let calc = TaxCalculator::default();
        let draft = sales_draft("23CAWPV8800M1ZT");
        let expected = draft.totals(&calc);

        let record = draft.into_record(&calc);
        assert_eq!(record.totals, expected);
        assert_eq!(record.status, InvoiceStatus::UnderProcess);
        assert!(record.verify_totals(&calc).is_ok());
    }

    #[test]
    fn test_tampered_record_fails_verification() {
        let calc = TaxCalculator::default();
        let mut record = sales_draft("23CAWPV8800M1ZT").into_record(&calc);
        record.totals.grand_total = dec("1");

        assert_eq!(
            record.verify_totals(&calc),
            Err(ValidationError::TotalsMismatch {
                field: "grand_total".to_string(),
                stored: dec("1"),
                computed: dec("295"),
            })
        );
    }

    #[test]
    fn test_stored_completed_status_loads() {
        let status: InvoiceStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(status, InvoiceStatus::Completed);
    }

    #[test]
    fn test_record_json_round_trip_verifies() {
        let calc = TaxCalculator::default();
        let record = sales_draft("27AAPFU0939F1ZV").into_record(&calc);

        let json = serde_json::to_string(&record).unwrap();
        let loaded: InvoiceRecord = serde_json::from_str(&json).unwrap();

        assert!(loaded.verify_totals(&calc).is_ok());
        assert!(json.contains("\"status\":\"under-process\""));
    }
}
