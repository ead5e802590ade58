//! GSTIN command - validate identifiers and show their state codes.

use clap::Args;
use console::style;

use gstr_core::Gstin;

/// Arguments for the gstin command.
#[derive(Args)]
pub struct GstinArgs {
    /// GSTINs to check
    #[arg(required = true)]
    ids: Vec<String>,
}

pub fn run(args: GstinArgs) -> anyhow::Result<()> {
    let mut invalid = 0;

    for id in &args.ids {
        match Gstin::parse(id) {
            Ok(gstin) => println!(
                "{} {} state {} PAN {}",
                style("✓").green(),
                gstin,
                gstin.state_code(),
                gstin.pan()
            ),
            Err(e) => {
                invalid += 1;
                println!("{} {} {}", style("✗").red(), id, e);
            }
        }
    }

    if invalid > 0 {
        anyhow::bail!("{} of {} GSTINs are invalid", invalid, args.ids.len());
    }

    Ok(())
}
