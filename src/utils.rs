//! Utils

use std::path::PathBuf;

use clap::Parser;

use crate::combinations::SearchOptions;

/// Arguments for the `paymatch` command
#[derive(Debug, Parser)]
#[command(
    name = "paymatch",
    about = "Find the invoices a payment settles exactly",
    long_about = None
)]
pub struct MatchArgs {
    /// Payment amount, e.g. `379.39` or `$1,250.00`
    #[arg(short, long)]
    pub payment: String,

    /// Fixture set holding the outstanding invoices
    #[arg(short, long, default_value = "daily")]
    pub fixture: String,

    /// Directory containing fixture sets
    #[arg(long, env = "PAYMATCH_FIXTURES", default_value = "./fixtures")]
    pub fixtures_dir: PathBuf,

    /// Number of invoices to take from the fixture set
    #[arg(short = 'n', long)]
    pub invoices: Option<usize>,

    /// Only show the best N matches
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Stop searching after visiting this many partial combinations
    #[arg(long)]
    pub node_limit: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,
}

impl MatchArgs {
    /// Search options requested on the command line
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            node_limit: self.node_limit,
        }
    }
}
