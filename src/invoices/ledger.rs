//! Ledger
//!
//! An ordered batch of outstanding invoices in one currency. An invoice's position in
//! the ledger is the index the matcher and ranker work with.

use rust_decimal::Decimal;
use rusty_money::{Money, MoneyError, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    combinations::{SearchOptions, SearchOutcome, SearchStats, find_combinations_with},
    invoices::Invoice,
    ranking::{RankedCombination, rank},
};

/// Errors related to ledger construction or lookups.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// An invoice's currency differs from the ledger currency (index, invoice currency, ledger currency).
    #[error("Invoice {0} has currency {1}, but ledger has currency {2}")]
    CurrencyMismatch(usize, &'static str, &'static str),

    /// An invoice was not found in the ledger.
    #[error("Invoice {0} not found")]
    InvoiceNotFound(usize),

    /// Wrapped money arithmetic error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Ranked matches of a payment against a ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentMatches {
    /// Diagnostic outcome of the search
    pub outcome: SearchOutcome,

    /// Work the search performed
    pub stats: SearchStats,

    /// Matching combinations, best first
    pub ranked: Vec<RankedCombination>,
}

impl PaymentMatches {
    /// Matches for a payment amount that could not be used.
    pub fn invalid_target() -> Self {
        Self {
            outcome: SearchOutcome::InvalidTarget,
            stats: SearchStats::default(),
            ranked: Vec::new(),
        }
    }

    /// The best match, if any.
    pub fn best(&self) -> Option<&RankedCombination> {
        self.ranked.first()
    }
}

/// Ledger
#[derive(Debug)]
pub struct Ledger<'a> {
    invoices: Vec<Invoice<'a>>,
    currency: &'static Currency,
}

impl<'a> Ledger<'a> {
    /// Create a new, empty ledger.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Ledger {
            invoices: Vec::new(),
            currency,
        }
    }

    /// Create a new ledger with the given invoices.
    ///
    /// # Errors
    ///
    /// Returns a `LedgerError` if there was a currency mismatch error.
    pub fn with_invoices(
        invoices: impl Into<Vec<Invoice<'a>>>,
        currency: &'static Currency,
    ) -> Result<Self, LedgerError> {
        let invoices = invoices.into();

        invoices.iter().enumerate().try_for_each(|(i, invoice)| {
            let invoice_currency = invoice.amount().currency();

            if invoice_currency == currency {
                Ok(())
            } else {
                Err(LedgerError::CurrencyMismatch(
                    i,
                    invoice_currency.iso_alpha_code,
                    currency.iso_alpha_code,
                ))
            }
        })?;

        Ok(Ledger { invoices, currency })
    }

    /// Sum of all outstanding balances.
    ///
    /// # Errors
    ///
    /// Returns a `LedgerError` if there was a money arithmetic error.
    pub fn total(&self) -> Result<Money<'a, Currency>, LedgerError> {
        let total = self
            .invoices
            .iter()
            .try_fold(Money::from_minor(0, self.currency), |acc, invoice| {
                acc.add(*invoice.amount())
            })?;

        Ok(total)
    }

    /// Balances in ledger order, as the matcher consumes them.
    pub fn amounts(&self) -> Vec<Decimal> {
        self.invoices.iter().map(Invoice::decimal_amount).collect()
    }

    /// Get an invoice from the ledger.
    ///
    /// # Errors
    ///
    /// Returns a `LedgerError::InvoiceNotFound` if the invoice is not found.
    pub fn get_invoice(&self, invoice: usize) -> Result<&Invoice<'a>, LedgerError> {
        self.invoices
            .get(invoice)
            .ok_or(LedgerError::InvoiceNotFound(invoice))
    }

    /// Resolve a ranked match back to the invoices it covers, in match order.
    ///
    /// # Errors
    ///
    /// Returns a `LedgerError::InvoiceNotFound` if the match refers to a position
    /// outside this ledger.
    pub fn invoices_for(
        &self,
        ranked: &RankedCombination,
    ) -> Result<SmallVec<[&Invoice<'a>; 8]>, LedgerError> {
        ranked
            .indices
            .iter()
            .map(|index| self.get_invoice(*index))
            .collect()
    }

    /// Find and rank every combination of invoices settled exactly by `payment`.
    pub fn match_payment(&self, payment: Decimal, options: &SearchOptions) -> PaymentMatches {
        let search = find_combinations_with(&self.amounts(), payment, options);

        PaymentMatches {
            outcome: search.outcome,
            stats: search.stats,
            ranked: rank(&search.combinations),
        }
    }

    /// Iterate over the invoices in the ledger.
    pub fn iter(&self) -> impl Iterator<Item = &Invoice<'a>> {
        self.invoices.iter()
    }

    /// Get the number of invoices in the ledger.
    #[must_use]
    pub fn len(&self) -> usize {
        self.invoices.len()
    }

    /// Check if the ledger is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.invoices.is_empty()
    }

    /// Get the currency of the ledger.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
