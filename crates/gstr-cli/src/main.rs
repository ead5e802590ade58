//! CLI application for GST invoice computation.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, calc, config, gstin, profit, words};

/// GST invoice calculator - tax breakdown, totals and exports for invoice drafts
#[derive(Parser)]
#[command(name = "gstr")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute totals for a single invoice draft
    Calc(calc::CalcArgs),

    /// Compute totals for multiple invoice drafts
    Batch(batch::BatchArgs),

    /// Validate GSTINs and show their state codes
    Gstin(gstin::GstinArgs),

    /// Format an amount and spell it out in words
    Words(words::WordsArgs),

    /// Summarize a profit report
    Profit(profit::ProfitArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Calc(args) => calc::run(args, config_path),
        Commands::Batch(args) => batch::run(args, config_path),
        Commands::Gstin(args) => gstin::run(args),
        Commands::Words(args) => words::run(args),
        Commands::Profit(args) => profit::run(args),
        Commands::Config(args) => config::run(args, config_path),
    }
}
