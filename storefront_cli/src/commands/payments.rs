//! The `payments` subcommand: renders the bundled demo dataset.

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::Args;
use storefront_lib::dataset::{sample_payments, PaymentStatus};

use crate::output::{print_json, print_payments_table, OutputFormat};

/// Arguments for the `payments` subcommand.
#[derive(Args)]
pub struct PaymentsArgs {
    /// Filter by status: paid, failed, or refunded
    #[arg(long)]
    status: Option<String>,

    /// Only show payments on or after this date (YYYY-MM-DD)
    #[arg(long)]
    since: Option<String>,
}

pub fn run(args: &PaymentsArgs, format: &OutputFormat) -> Result<()> {
    let mut payments = sample_payments();

    if let Some(status) = &args.status {
        let wanted = match status.as_str() {
            "paid" => PaymentStatus::Paid,
            "failed" => PaymentStatus::Failed,
            "refunded" => PaymentStatus::Refunded,
            other => bail!("unknown status {:?}; expected paid, failed, or refunded", other),
        };
        payments.retain(|p| p.status == wanted);
    }

    if let Some(since) = &args.since {
        let Ok(cutoff) = NaiveDate::parse_from_str(since, "%Y-%m-%d") else {
            bail!("invalid --since date {:?}; expected YYYY-MM-DD", since);
        };
        payments.retain(|p| p.parsed_date().is_some_and(|d| d.date() >= cutoff));
    }

    match format {
        OutputFormat::Json => print_json(&payments),
        OutputFormat::Table => print_payments_table(&payments),
    }
    Ok(())
}
