//! Batch command - compute totals for multiple invoice drafts.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use tracing::{debug, error, warn};

use gstr_core::format::format_indian;
use gstr_core::{InvoiceDraft, InvoiceRecord, TaxCalculator};

use super::calc::{OutputFormat, format_record};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct BatchResult {
    path: PathBuf,
    record: Option<InvoiceRecord>,
    error: Option<String>,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;
    let calculator = TaxCalculator::new(config.tax_policy()?);

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("json"))
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} drafts to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} drafts")?
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        match load_record(&path, &calculator) {
            Ok(record) => {
                results.push(BatchResult {
                    path,
                    record: Some(record),
                    error: None,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(BatchResult {
                        path,
                        record: None,
                        error: Some(error_msg),
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    if let Some(output_dir) = &args.output_dir {
        for result in &results {
            let Some(record) = &result.record else {
                continue;
            };

            let output_name = result
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("invoice");
            let output_path =
                output_dir.join(format!("{}.{}", output_name, args.format.extension()));

            fs::write(&output_path, format_record(record, &config, args.format)?)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed = results.iter().filter(|r| r.error.is_some()).count();
    let grand_total: Decimal = results
        .iter()
        .filter_map(|r| r.record.as_ref())
        .map(|r| r.totals.grand_total)
        .sum();

    println!(
        "{} Processed {} drafts in {:?}, grand total {}",
        style("✓").green(),
        results.len(),
        start.elapsed(),
        format_indian(grand_total)
    );
    if failed > 0 {
        println!("{} {} drafts failed", style("✗").red(), failed);
    }

    Ok(())
}

fn load_record(path: &Path, calculator: &TaxCalculator) -> anyhow::Result<InvoiceRecord> {
    let draft = InvoiceDraft::from_json(&fs::read_to_string(path)?)?;
    for issue in draft.validate() {
        warn!("{}: {}", path.display(), issue);
    }
    Ok(draft.into_record(calculator))
}

fn write_summary(path: &Path, results: &[BatchResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "file",
        "status",
        "invoice_no",
        "party",
        "subtotal",
        "freight",
        "cgst",
        "sgst",
        "igst",
        "grand_total",
        "error",
    ])?;

    for result in results {
        let file = result.path.display().to_string();
        match &result.record {
            Some(record) => {
                let t = &record.totals;
                wtr.write_record([
                    file.as_str(),
                    "ok",
                    record.invoice.invoice_no.as_str(),
                    record.invoice.counterparty.name.as_str(),
                    t.subtotal.to_string().as_str(),
                    t.freight.to_string().as_str(),
                    t.central_tax.to_string().as_str(),
                    t.state_tax.to_string().as_str(),
                    t.integrated_tax.to_string().as_str(),
                    t.grand_total.to_string().as_str(),
                    "",
                ])?;
            }
            None => {
                wtr.write_record([
                    file.as_str(),
                    "error",
                    "",
                    "",
                    "",
                    "",
                    "",
                    "",
                    "",
                    "",
                    result.error.as_deref().unwrap_or_default(),
                ])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
