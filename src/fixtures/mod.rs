//! Fixtures
//!
//! Invoice batches stored as YAML under `<base>/invoices/<name>.yml`.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    amounts::AmountError,
    fixtures::invoices::InvoicesFixture,
    invoices::{
        Invoice,
        ledger::{Ledger, LedgerError},
    },
};

pub mod invoices;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid invoice amount
    #[error("Invalid amount for invoice {invoice}: {source}")]
    InvalidAmount {
        /// Reference of the invoice with the bad amount
        invoice: String,
        /// Underlying parse error
        source: AmountError,
    },

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Invoice not found
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(String),

    /// The same invoice reference appears twice
    #[error("Duplicate invoice reference: {0}")]
    DuplicateInvoice(String),

    /// Currency mismatch between invoice batches
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No invoices loaded yet
    #[error("No invoices loaded yet; currency unknown")]
    NoCurrency,

    /// No invoices loaded
    #[error("No invoices loaded; cannot create ledger")]
    NoInvoices,

    /// Not enough invoices in fixture
    #[error("Not enough invoices in fixture, available: {available}, requested: {requested}")]
    NotEnoughInvoices {
        /// Number of invoices defined in the fixture
        available: usize,
        /// Number of invoices requested
        requested: usize,
    },

    /// Ledger creation error
    #[error("Failed to create ledger: {0}")]
    Ledger(#[from] LedgerError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Invoices in load order
    invoices: Vec<Invoice<'static>>,

    /// Invoice reference -> position in `invoices`
    invoice_keys: FxHashMap<String, usize>,

    /// Currency for the fixture set
    currency: Option<&'static Currency>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            invoices: Vec::new(),
            invoice_keys: FxHashMap::default(),
            currency: None,
        }
    }

    /// Load invoices from a YAML fixture file, appending them to those already loaded
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if an amount or currency
    /// is invalid, if a reference repeats, or if the currency differs from invoices
    /// already loaded.
    pub fn load_invoices(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("invoices").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: InvoicesFixture = serde_norway::from_str(&contents)?;

        let currency = invoices::parse_currency(&fixture.currency)?;

        // Validate currency consistency
        if let Some(existing_currency) = self.currency {
            if existing_currency != currency {
                return Err(FixtureError::CurrencyMismatch(
                    existing_currency.iso_alpha_code.to_string(),
                    currency.iso_alpha_code.to_string(),
                ));
            }
        } else {
            self.currency = Some(currency);
        }

        for invoice_fixture in fixture.invoices {
            if self.invoice_keys.contains_key(&invoice_fixture.inv_ref) {
                return Err(FixtureError::DuplicateInvoice(invoice_fixture.inv_ref));
            }

            let invoice = invoice_fixture.try_into_invoice(currency)?;

            self.invoice_keys
                .insert(invoice.inv_ref().to_string(), self.invoices.len());
            self.invoices.push(invoice);
        }

        Ok(self)
    }

    /// Load a complete fixture set by name
    ///
    /// # Errors
    ///
    /// Returns an error if the invoice file cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_invoices(name)?;

        Ok(fixture)
    }

    /// Get an invoice by its reference
    ///
    /// # Errors
    ///
    /// Returns an error if the invoice is not found.
    pub fn invoice(&self, inv_ref: &str) -> Result<&Invoice<'static>, FixtureError> {
        self.invoice_keys
            .get(inv_ref)
            .and_then(|position| self.invoices.get(*position))
            .ok_or_else(|| FixtureError::InvoiceNotFound(inv_ref.to_string()))
    }

    /// Get all invoices
    pub fn invoices(&self) -> &[Invoice<'static>] {
        &self.invoices
    }

    /// Create a ledger from the loaded invoices, optionally only the first `n`
    ///
    /// # Errors
    ///
    /// Returns an error if no invoices are loaded, if more invoices are requested than
    /// were loaded, or if ledger creation fails.
    pub fn ledger(&self, n: Option<usize>) -> Result<Ledger<'static>, FixtureError> {
        let currency = self.currency.ok_or(FixtureError::NoCurrency)?;

        if self.invoices.is_empty() {
            return Err(FixtureError::NoInvoices);
        }

        if let Some(n) = n
            && n > self.invoices.len()
        {
            return Err(FixtureError::NotEnoughInvoices {
                requested: n,
                available: self.invoices.len(),
            });
        }

        let invoices: Vec<Invoice<'static>> = self
            .invoices
            .iter()
            .take(n.unwrap_or(self.invoices.len()))
            .cloned()
            .collect();

        Ok(Ledger::with_invoices(invoices, currency)?)
    }

    /// Get the currency
    ///
    /// # Errors
    ///
    /// Returns an error if no invoices have been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
