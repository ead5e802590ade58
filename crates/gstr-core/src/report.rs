//! Per-item profit rows and their roll-up.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Profit figures for one inventory item, as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemProfit {
    pub item_name: String,
    #[serde(default)]
    pub buying_price: Decimal,
    #[serde(default)]
    pub total_quantity_sold: u64,
    #[serde(default)]
    pub average_selling_price: Decimal,
    #[serde(default)]
    pub total_commission: Decimal,
    #[serde(default)]
    pub total_profit: Decimal,
}

impl ItemProfit {
    /// Profit implied by the other figures: sold quantity times margin, less
    /// commission.
    pub fn derived_profit(&self) -> Decimal {
        Decimal::from(self.total_quantity_sold) * (self.average_selling_price - self.buying_price)
            - self.total_commission
    }
}

/// Totals across a profit report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitSummary {
    /// Sum of all items' profit.
    pub total_profit: Decimal,

    /// Total units sold.
    pub total_quantity_sold: u64,

    /// Item with the highest profit; the first one wins a tie.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_item: Option<String>,
}

impl ProfitSummary {
    pub fn from_items(items: &[ItemProfit]) -> Self {
        let mut top: Option<&ItemProfit> = None;
        for item in items {
            if top.is_none_or(|best| item.total_profit > best.total_profit) {
                top = Some(item);
            }
        }

        Self {
            total_profit: items.iter().map(|i| i.total_profit).sum(),
            total_quantity_sold: items.iter().map(|i| i.total_quantity_sold).sum(),
            top_item: top.map(|i| i.item_name.clone()),
        }
    }
}
