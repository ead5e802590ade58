//! Invoice data models shared by the sales and purchase screens.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default GST rate (percent) applied to a freshly added line item.
pub const DEFAULT_ITEM_TAX_RATE: u32 = 18;

/// Largest unit price or freight charge, in rupees, an invoice may carry.
///
/// Keeps `quantity x price` and the invoice sums well inside `Decimal`'s
/// range for any `u32` quantity.
pub const MAX_AMOUNT_RUPEES: i64 = 1_000_000_000_000;

/// [`MAX_AMOUNT_RUPEES`] as a `Decimal`.
pub fn max_amount() -> Decimal {
    Decimal::from(MAX_AMOUNT_RUPEES)
}

/// Clamp a percentage into `[0, 100]`.
pub(crate) fn bounded_percent(value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

/// Clamp an amount into `[0, max_amount()]`.
pub(crate) fn bounded_amount(value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, max_amount())
}

/// Direction of an invoice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceKind {
    /// Outgoing invoice to a customer.
    #[default]
    Sales,
    /// Incoming invoice from a vendor.
    Purchase,
}

impl InvoiceKind {
    /// Label for the counterparty on this kind of invoice.
    pub fn counterparty_label(&self) -> &'static str {
        match self {
            InvoiceKind::Sales => "customer",
            InvoiceKind::Purchase => "vendor",
        }
    }
}

/// A customer or vendor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    /// Registered name.
    pub name: String,

    /// GST identification number, if registered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gstin: Option<String>,
}

impl Party {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            gstin: None,
        }
    }

    pub fn with_gstin(mut self, gstin: impl Into<String>) -> Self {
        self.gstin = Some(gstin.into());
        self
    }
}

/// A single line item on an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Inventory identifier.
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "itemId")]
    pub item_id: Option<String>,

    /// Product description.
    #[serde(default)]
    pub name: String,

    /// HSN classification code.
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "hsnCode")]
    pub hsn_code: Option<String>,

    /// Number of units.
    pub quantity: u32,

    /// Price per unit before discount and tax.
    #[serde(alias = "price")]
    pub unit_price: Decimal,

    /// Discount percentage, 0 to 100.
    #[serde(default, alias = "discount")]
    pub discount_percent: Decimal,

    /// GST rate percentage.
    #[serde(default = "default_tax_rate", alias = "gstRate")]
    pub tax_rate_percent: Decimal,

    /// Units on hand when the item was picked, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
}

fn default_tax_rate() -> Decimal {
    Decimal::from(DEFAULT_ITEM_TAX_RATE)
}

impl LineItem {
    /// Create a line item. The price is clamped into `[0, max_amount()]`, the
    /// discount and the rate into `[0, 100]`.
    pub fn new(
        quantity: u32,
        unit_price: Decimal,
        discount_percent: Decimal,
        tax_rate_percent: Decimal,
    ) -> Self {
        Self {
            item_id: None,
            name: String::new(),
            hsn_code: None,
            quantity,
            unit_price,
            discount_percent,
            tax_rate_percent,
            stock: None,
        }
        .clamped()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_hsn_code(mut self, hsn_code: impl Into<String>) -> Self {
        self.hsn_code = Some(hsn_code.into());
        self
    }

    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = Some(stock);
        self
    }

    /// Return the item with its numeric fields forced into valid ranges.
    pub fn clamped(mut self) -> Self {
        self.unit_price = bounded_amount(self.unit_price);
        self.tax_rate_percent = bounded_percent(self.tax_rate_percent);
        self.discount_percent = bounded_percent(self.discount_percent);
        self
    }

    /// Amount the tax is levied on: quantity x price x (1 - discount/100).
    ///
    /// Computed on the clamped values, so items built field by field cannot
    /// overflow.
    pub fn taxable_amount(&self) -> Decimal {
        let discount_factor =
            Decimal::ONE - bounded_percent(self.discount_percent) / Decimal::ONE_HUNDRED;
        Decimal::from(self.quantity) * bounded_amount(self.unit_price) * discount_factor
    }

    /// GST on this item at its own rate.
    pub fn tax_amount(&self) -> Decimal {
        self.taxable_amount() * (bounded_percent(self.tax_rate_percent) / Decimal::ONE_HUNDRED)
    }

    /// Taxable amount plus tax, as printed in the export line total.
    pub fn gross_amount(&self) -> Decimal {
        self.taxable_amount() + self.tax_amount()
    }

    /// True when the quantity is above the known stock.
    pub fn exceeds_stock(&self) -> bool {
        self.stock.is_some_and(|stock| self.quantity > stock)
    }
}

/// GST split into its central, state and integrated components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    /// Central GST (intra-state half).
    pub central_tax: Decimal,

    /// State GST (intra-state half).
    pub state_tax: Decimal,

    /// Integrated GST (inter-state).
    pub integrated_tax: Decimal,
}

impl TaxBreakdown {
    /// Add a tax amount: split in halves when intra-state, whole to
    /// integrated otherwise.
    pub fn add(&mut self, amount: Decimal, intra_state: bool) {
        if intra_state {
            let half = amount / Decimal::TWO;
            self.central_tax += half;
            self.state_tax += half;
        } else {
            self.integrated_tax += amount;
        }
    }

    /// Sum of all three components.
    pub fn total(&self) -> Decimal {
        self.central_tax + self.state_tax + self.integrated_tax
    }
}

/// Derived invoice totals. Always recomputed from line items and freight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    /// Sum of taxable amounts, freight excluded.
    pub subtotal: Decimal,

    /// Freight charge.
    pub freight: Decimal,

    pub central_tax: Decimal,
    pub state_tax: Decimal,
    pub integrated_tax: Decimal,

    /// subtotal + freight + all tax components.
    pub grand_total: Decimal,
}

impl InvoiceTotals {
    /// Assemble totals from their parts, deriving the grand total.
    pub fn from_parts(subtotal: Decimal, freight: Decimal, tax: TaxBreakdown) -> Self {
        Self {
            subtotal,
            freight,
            central_tax: tax.central_tax,
            state_tax: tax.state_tax,
            integrated_tax: tax.integrated_tax,
            grand_total: subtotal + freight + tax.total(),
        }
    }

    pub fn tax(&self) -> TaxBreakdown {
        TaxBreakdown {
            central_tax: self.central_tax,
            state_tax: self.state_tax,
            integrated_tax: self.integrated_tax,
        }
    }

    pub fn total_tax(&self) -> Decimal {
        self.tax().total()
    }
}
