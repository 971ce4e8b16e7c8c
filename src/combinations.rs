//! Combinations
//!
//! Exhaustive search for the sets of amounts that add up exactly to a payment.

use rust_decimal::Decimal;
use smallvec::SmallVec;
use thiserror::Error;

use crate::amounts::IndexedAmount;

pub mod search;

pub use search::{
    CombinationSearch, SearchOptions, SearchOutcome, SearchStats, find_combinations,
    find_combinations_with,
};

/// Errors raised by the combination search.
#[derive(Debug, Error, PartialEq)]
pub enum CombinationError {
    /// The target is not strictly positive once rounded to cents.
    #[error("invalid payment amount: {target}")]
    InvalidTarget {
        /// Target as supplied
        target: Decimal,
    },
}

/// A set of amounts whose total matches the target, in ascending index order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Combination {
    entries: SmallVec<[IndexedAmount; 8]>,
}

impl Combination {
    /// Create a combination from entries already in the order they were chosen.
    pub fn new(entries: SmallVec<[IndexedAmount; 8]>) -> Self {
        Self { entries }
    }

    /// The chosen amounts with their original positions.
    pub fn entries(&self) -> &[IndexedAmount] {
        &self.entries
    }

    /// Original positions of the chosen amounts.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|entry| entry.index)
    }

    /// The chosen amounts, order preserved.
    pub fn amounts(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.entries.iter().map(|entry| entry.amount)
    }

    /// Sum of the chosen amounts.
    pub fn total(&self) -> Decimal {
        self.amounts().sum()
    }

    /// Number of amounts in the combination.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the combination has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<IndexedAmount> for Combination {
    fn from_iter<I: IntoIterator<Item = IndexedAmount>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Enumerate every combination of `amounts` that sums to `target` at cent precision.
///
/// Combinations are returned in lexicographic order of their index sequences.
///
/// # Errors
///
/// Returns [`CombinationError::InvalidTarget`] if `target` is zero or negative.
pub fn generate(
    amounts: &[Decimal],
    target: Decimal,
) -> Result<Vec<Combination>, CombinationError> {
    search::run(amounts, target, &SearchOptions::default()).map(|(combinations, _)| combinations)
}
