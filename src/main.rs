//! paymatch
//!
//! Matches a payment against a fixture set of outstanding invoices and prints the
//! ranked combinations.
//!
//! Use `-p` to give the payment amount
//! Use `-f` to load a fixture set by name
//! Use `-n` to only consider the first n invoices of the set
//! Use `-l` to only show the best l matches

use std::{io, time::Instant};

use anyhow::Result;
use clap::Parser;
use humanize_duration::{Truncate, prelude::DurationExt};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use paymatch::{
    amounts::parse_amount, fixtures::Fixture, invoices::ledger::PaymentMatches, report::Report,
    utils::MatchArgs,
};

/// paymatch entry point
#[expect(clippy::print_stdout, reason = "CLI output")]
pub fn main() -> Result<()> {
    let args = MatchArgs::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&args.log_level)?)
        .with_writer(io::stderr)
        .init();

    let mut fixture = Fixture::with_base_path(&args.fixtures_dir);

    fixture.load_invoices(&args.fixture)?;

    let ledger = fixture.ledger(args.invoices)?;

    info!(
        fixture = %args.fixture,
        invoices = ledger.len(),
        "loaded outstanding invoices"
    );

    let start = Instant::now();

    let matches = match parse_amount(&args.payment) {
        Ok(payment) => ledger.match_payment(payment, &args.search_options()),
        Err(error) => {
            warn!(payment = %args.payment, %error, "payment amount could not be read");

            PaymentMatches::invalid_target()
        }
    };

    let elapsed = start.elapsed();

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    Report::new(&matches)
        .with_limit(args.limit)
        .write_to(&mut handle, &ledger)?;

    println!("\nSearched in {}", elapsed.human(Truncate::Nano));

    Ok(())
}
