use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::models::invoice::{
    InvoiceTotals, LineItem, TaxBreakdown, bounded_amount, bounded_percent,
};

use super::Jurisdiction;

/// Seller-side inputs to the tax computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxPolicy {
    /// The seller's home state.
    pub seller_jurisdiction: Jurisdiction,

    /// GST rate (percent) charged on freight, independent of item rates.
    pub freight_tax_rate: Decimal,
}

impl TaxPolicy {
    pub fn new(seller_jurisdiction: Jurisdiction, freight_tax_rate: Decimal) -> Self {
        Self {
            seller_jurisdiction,
            freight_tax_rate,
        }
    }
}

impl Default for TaxPolicy {
    fn default() -> Self {
        Self {
            seller_jurisdiction: Jurisdiction("23".to_string()),
            freight_tax_rate: Decimal::from(18),
        }
    }
}

/// Invoice tax calculator.
///
/// Pure and stateless: the same items, freight and counterparty always give
/// the same totals, so callers recompute whenever they need fresh numbers.
#[derive(Debug, Clone, Default)]
pub struct TaxCalculator {
    policy: TaxPolicy,
}

impl TaxCalculator {
    pub fn new(policy: TaxPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &TaxPolicy {
        &self.policy
    }

    /// True when the counterparty is in the seller's state. A counterparty
    /// without a state code is treated as inter-state.
    pub fn is_intra_state(&self, counterparty: Option<&Jurisdiction>) -> bool {
        counterparty == Some(&self.policy.seller_jurisdiction)
    }

    /// Compute the tax breakdown and totals for an invoice.
    ///
    /// Item tax is levied at each item's own rate; freight at the policy's
    /// freight rate. Intra-state tax splits into equal central and state
    /// halves, inter-state tax goes wholly to integrated. Freight is not part
    /// of the subtotal.
    ///
    /// Never fails: prices and freight are clamped into `[0, max_amount()]`
    /// and rates into `[0, 100]` before use.
    pub fn calculate(
        &self,
        items: &[LineItem],
        freight: Decimal,
        counterparty: Option<&Jurisdiction>,
    ) -> InvoiceTotals {
        let intra_state = self.is_intra_state(counterparty);
        let freight = bounded_amount(freight);

        let mut tax = TaxBreakdown::default();
        let mut subtotal = Decimal::ZERO;

        for item in items {
            subtotal += item.taxable_amount();
            tax.add(item.tax_amount(), intra_state);
        }

        let freight_tax =
            freight * (bounded_percent(self.policy.freight_tax_rate) / Decimal::ONE_HUNDRED);
        tax.add(freight_tax, intra_state);

        trace!(
            items = items.len(),
            intra_state,
            %subtotal,
            %freight_tax,
            "computed invoice tax"
        );

        InvoiceTotals::from_parts(subtotal, freight, tax)
    }
}
