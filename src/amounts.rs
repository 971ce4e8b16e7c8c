//! Amounts
//!
//! Decimal money values as they enter the matcher, and the two-place normalisation
//! every sum is compared at.

use rust_decimal::{Decimal, RoundingStrategy, prelude::FromPrimitive};
use thiserror::Error;

/// Number of decimal places amounts are compared at.
pub const CENTS_DP: u32 = 2;

/// Errors that can occur while reading an amount.
#[derive(Debug, Error, PartialEq)]
pub enum AmountError {
    /// The text did not contain a decimal number once symbols were stripped.
    #[error("invalid amount: {0:?}")]
    Unparseable(String),

    /// The value was NaN or infinite.
    #[error("amount is not a finite number")]
    NonFinite,
}

/// An amount tagged with its position in the original input sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexedAmount {
    /// Monetary value
    pub amount: Decimal,

    /// Position of the amount in the input it was taken from
    pub index: usize,
}

impl IndexedAmount {
    /// Creates a new indexed amount.
    pub fn new(amount: Decimal, index: usize) -> Self {
        Self { amount, index }
    }
}

/// Tags each amount with its position.
pub fn indexed(amounts: &[Decimal]) -> impl Iterator<Item = IndexedAmount> + '_ {
    amounts
        .iter()
        .enumerate()
        .map(|(index, amount)| IndexedAmount::new(*amount, index))
}

/// Rounds an amount to whole cents, midpoints away from zero.
pub fn to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CENTS_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Parse an amount as it appears in an invoice table or a payment field,
/// e.g. `"$1,234.50"`, `" 20.99 "` or `"-5"`.
///
/// # Errors
///
/// Returns [`AmountError::Unparseable`] if nothing numeric is left after removing
/// whitespace, `$` and thousands separators.
pub fn parse_amount(s: &str) -> Result<Decimal, AmountError> {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ','))
        .collect();

    cleaned
        .trim()
        .parse::<Decimal>()
        .map_err(|_err| AmountError::Unparseable(s.to_string()))
}

/// Convert a binary float into a decimal amount.
///
/// # Errors
///
/// Returns [`AmountError::NonFinite`] for NaN and infinities, and
/// [`AmountError::Unparseable`] for finite values outside the decimal range.
pub fn amount_from_f64(value: f64) -> Result<Decimal, AmountError> {
    if !value.is_finite() {
        return Err(AmountError::NonFinite);
    }

    Decimal::from_f64(value).ok_or_else(|| AmountError::Unparseable(value.to_string()))
}
