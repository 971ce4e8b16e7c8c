//! Invoice Fixtures

use rusty_money::{
    Money,
    iso::{AUD, CAD, Currency, EUR, GBP, NZD, USD},
};
use serde::Deserialize;

use crate::{amounts::parse_amount, fixtures::FixtureError, invoices::Invoice};

/// Wrapper for an invoice batch in YAML
#[derive(Debug, Deserialize)]
pub struct InvoicesFixture {
    /// ISO currency code shared by every invoice (e.g., "AUD")
    pub currency: String,

    /// Invoices in table order
    pub invoices: Vec<InvoiceFixture>,
}

/// Invoice Fixture
#[derive(Debug, Deserialize)]
pub struct InvoiceFixture {
    /// Invoice reference
    #[serde(rename = "ref")]
    pub inv_ref: String,

    /// Point-of-sale reference
    #[serde(default)]
    pub pos: String,

    /// Invoice date
    #[serde(default)]
    pub date: String,

    /// Balance owed as shown in the table (e.g., "$1,234.50")
    pub amount: String,
}

impl InvoiceFixture {
    /// Build an invoice in the given currency.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::InvalidAmount`] if the amount cannot be parsed.
    pub fn try_into_invoice(
        self,
        currency: &'static Currency,
    ) -> Result<Invoice<'static>, FixtureError> {
        let amount = parse_amount(&self.amount).map_err(|source| FixtureError::InvalidAmount {
            invoice: self.inv_ref.clone(),
            source,
        })?;

        Ok(Invoice::with_refs(
            Money::from_decimal(amount, currency),
            self.inv_ref,
            self.pos,
            self.date,
        ))
    }
}

/// Look up a supported ISO currency code.
///
/// # Errors
///
/// Returns [`FixtureError::UnknownCurrency`] if the code is not supported.
pub fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    match code.trim() {
        "AUD" => Ok(AUD),
        "NZD" => Ok(NZD),
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        "CAD" => Ok(CAD),
        other => Err(FixtureError::UnknownCurrency(other.to_string())),
    }
}
