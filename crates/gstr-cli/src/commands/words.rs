//! Words command - format an amount and spell it out.

use clap::Args;

use gstr_core::{amount_in_words, format_inr, parse_amount};

/// Arguments for the words command.
#[derive(Args)]
pub struct WordsArgs {
    /// Amount, e.g. 1234.50 or "₹1,234.50"
    #[arg(required = true, allow_hyphen_values = true)]
    amount: String,
}

pub fn run(args: WordsArgs) -> anyhow::Result<()> {
    let amount = parse_amount(&args.amount)?;

    println!("{}", format_inr(amount));
    println!("{}", amount_in_words(amount));

    Ok(())
}
