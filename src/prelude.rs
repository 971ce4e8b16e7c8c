//! paymatch prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    amounts::{AmountError, IndexedAmount, amount_from_f64, parse_amount, to_cents},
    combinations::{
        Combination, CombinationError, CombinationSearch, SearchOptions, SearchOutcome,
        SearchStats, find_combinations, find_combinations_with, generate,
    },
    fixtures::{Fixture, FixtureError},
    invoices::{
        Invoice,
        ledger::{Ledger, LedgerError, PaymentMatches},
    },
    ranking::{RankedCombination, compare_ranked, rank},
    report::{Report, ReportError},
};
