//! Invoices

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

pub mod ledger;

/// An outstanding invoice.
#[derive(Clone, Debug, PartialEq)]
pub struct Invoice<'a> {
    amount: Money<'a, Currency>,
    inv_ref: String,
    pos_ref: String,
    date: String,
}

impl<'a> Invoice<'a> {
    /// Creates a new invoice with only an amount.
    #[must_use]
    pub fn new(amount: Money<'a, Currency>) -> Self {
        Self::with_refs(amount, String::new(), String::new(), String::new())
    }

    /// Creates a new invoice with its references and date.
    pub fn with_refs(
        amount: Money<'a, Currency>,
        inv_ref: impl Into<String>,
        pos_ref: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            inv_ref: inv_ref.into(),
            pos_ref: pos_ref.into(),
            date: date.into(),
        }
    }

    /// Returns the balance owed on the invoice
    pub fn amount(&self) -> &Money<'a, Currency> {
        &self.amount
    }

    /// Returns the balance owed as a plain decimal
    pub fn decimal_amount(&self) -> Decimal {
        *self.amount.amount()
    }

    /// Returns the invoice reference
    pub fn inv_ref(&self) -> &str {
        &self.inv_ref
    }

    /// Returns the point-of-sale reference (terminal/sequence)
    pub fn pos_ref(&self) -> &str {
        &self.pos_ref
    }

    /// Returns the invoice date as written on the invoice
    pub fn date(&self) -> &str {
        &self.date
    }
}
