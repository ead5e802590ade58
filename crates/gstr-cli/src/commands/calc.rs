//! Calc command - compute totals for a single invoice draft.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use gstr_core::format::{amount_in_words, format_indian, format_inr};
use gstr_core::models::config::GstrConfig;
use gstr_core::{InvoiceDraft, InvoiceNumbering, InvoiceRecord, TaxCalculator};

/// Arguments for the calc command.
#[derive(Args)]
pub struct CalcArgs {
    /// Invoice draft (JSON)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Assign an invoice number, given the count of invoices already issued
    #[arg(long, value_name = "EXISTING")]
    assign_number: Option<usize>,

    /// Fail when the draft has validation issues
    #[arg(long)]
    strict: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON record with totals
    Json,
    /// CSV sheet with line items and totals
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn run(args: CalcArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Calculating invoice: {}", args.input.display());

    let mut draft = InvoiceDraft::from_json(&fs::read_to_string(&args.input)?)?;

    if let Some(existing) = args.assign_number {
        draft.invoice_no = InvoiceNumbering::new(&config.invoice.number_prefix)
            .with_width(config.invoice.sequence_width)
            .number(existing, draft.invoice_date);
        debug!("Assigned invoice number {}", draft.invoice_no);
    }

    let issues = draft.validate();
    if !issues.is_empty() {
        eprintln!("{}", style("Validation issues:").yellow());
        for issue in &issues {
            eprintln!("  - {}", issue);
        }
        if args.strict {
            anyhow::bail!("Draft has {} validation issue(s)", issues.len());
        }
    }

    let calculator = TaxCalculator::new(config.tax_policy()?);
    let record = draft.into_record(&calculator);
    let output = format_record(&record, &config, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

pub fn format_record(
    record: &InvoiceRecord,
    config: &GstrConfig,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => format_csv(record, config),
        OutputFormat::Text => Ok(format_text(record, config)),
    }
}

fn format_csv(record: &InvoiceRecord, config: &GstrConfig) -> anyhow::Result<String> {
    let invoice = &record.invoice;
    let totals = &record.totals;
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(vec![]);

    // Company and invoice header
    wtr.write_record([config.company.name.as_str()])?;
    wtr.write_record([config.company.address.as_str()])?;
    wtr.write_record([
        "Invoice No:",
        invoice.invoice_no.as_str(),
        "",
        "Date:",
        invoice.invoice_date.to_string().as_str(),
    ])?;
    wtr.write_record([
        "Party:",
        invoice.counterparty.name.as_str(),
        "",
        "GSTIN:",
        invoice.counterparty.gstin.as_deref().unwrap_or_default(),
    ])?;

    // Line items
    wtr.write_record(["Description", "HSN", "Qty", "Price", "Disc%", "GST%", "Total"])?;
    for item in &invoice.items {
        wtr.write_record([
            item.name.as_str(),
            item.hsn_code.as_deref().unwrap_or_default(),
            item.quantity.to_string().as_str(),
            format_indian(item.unit_price).as_str(),
            item.discount_percent.to_string().as_str(),
            item.tax_rate_percent.to_string().as_str(),
            format_indian(item.gross_amount()).as_str(),
        ])?;
    }

    // Totals
    let rows = [
        ("Subtotal", totals.subtotal),
        ("Freight", totals.freight),
        ("CGST", totals.central_tax),
        ("SGST", totals.state_tax),
        ("IGST", totals.integrated_tax),
        ("Grand Total", totals.grand_total),
    ];
    for (label, amount) in rows {
        wtr.write_record([label, "", "", "", "", "", format_indian(amount).as_str()])?;
    }
    wtr.write_record(["Amount in Words:", amount_in_words(totals.grand_total).as_str()])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &InvoiceRecord, config: &GstrConfig) -> String {
    let invoice = &record.invoice;
    let totals = &record.totals;
    let mut output = String::new();

    output.push_str(&format!("{}\n", config.company.name));
    output.push_str(&format!("GSTIN: {}\n\n", config.company.gstin));

    output.push_str(&format!("Invoice: {}\n", invoice.invoice_no));
    output.push_str(&format!("Date: {}\n", invoice.invoice_date.format("%d-%m-%Y")));
    if let Some(po_no) = &invoice.po_no {
        output.push_str(&format!("P.O. No.: {}\n", po_no));
    }
    if let Some(po_date) = invoice.po_date {
        output.push_str(&format!("P.O. Date: {}\n", po_date.format("%d-%m-%Y")));
    }
    output.push('\n');

    output.push_str(&format!("{}:\n", capitalize(invoice.kind.counterparty_label())));
    output.push_str(&format!("  {}\n", invoice.counterparty.name));
    if let Some(gstin) = &invoice.counterparty.gstin {
        output.push_str(&format!("  GSTIN: {}\n", gstin));
    }
    output.push('\n');

    output.push_str("Items:\n");
    for item in &invoice.items {
        output.push_str(&format!(
            "  {} x {} @ {} less {}% = {}\n",
            item.quantity,
            if item.name.is_empty() { "-" } else { item.name.as_str() },
            format_inr(item.unit_price),
            item.discount_percent,
            format_inr(item.taxable_amount())
        ));
    }
    output.push('\n');

    output.push_str("Summary:\n");
    output.push_str(&format!("  Subtotal:    {}\n", format_inr(totals.subtotal)));
    output.push_str(&format!("  Freight:     {}\n", format_inr(totals.freight)));
    output.push_str(&format!("  CGST:        {}\n", format_inr(totals.central_tax)));
    output.push_str(&format!("  SGST:        {}\n", format_inr(totals.state_tax)));
    output.push_str(&format!("  IGST:        {}\n", format_inr(totals.integrated_tax)));
    output.push_str(&format!("  Grand Total: {}\n", format_inr(totals.grand_total)));
    output.push_str(&format!("\n{}\n", amount_in_words(totals.grand_total)));

    output
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
