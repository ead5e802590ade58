//! Profit command - summarize a per-item profit report.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::warn;

use gstr_core::format::format_inr;
use gstr_core::{ItemProfit, ProfitSummary};

/// Arguments for the profit command.
#[derive(Args)]
pub struct ProfitArgs {
    /// Profit rows (JSON array)
    #[arg(required = true)]
    input: PathBuf,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: ProfitArgs) -> anyhow::Result<()> {
    let content = fs::read_to_string(&args.input)?;
    let items: Vec<ItemProfit> = serde_json::from_str(&content)?;

    for item in &items {
        let derived = item.derived_profit();
        if derived != item.total_profit {
            warn!(
                "{}: reported profit {} differs from derived {}",
                item.item_name, item.total_profit, derived
            );
        }
    }

    let summary = ProfitSummary::from_items(&items);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    for item in &items {
        println!(
            "  {:<30} {:>8} sold  {:>16}",
            item.item_name,
            item.total_quantity_sold,
            format_inr(item.total_profit)
        );
    }
    println!();
    println!(
        "{} Total profit: {}",
        style("ℹ").blue(),
        format_inr(summary.total_profit)
    );
    if let Some(top) = &summary.top_item {
        println!("{} Top item: {}", style("ℹ").blue(), top);
    }

    Ok(())
}
