//! Report
//!
//! Renders ranked payment matches as a table, best match first.

use std::io;

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    invoices::ledger::{Ledger, LedgerError, PaymentMatches},
    ranking::RankedCombination,
};

/// Errors that can occur when writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A match refers to an invoice the ledger does not hold.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Printable view of the matches for one payment.
#[derive(Debug, Clone, Copy)]
pub struct Report<'m> {
    matches: &'m PaymentMatches,
    limit: Option<usize>,
}

impl<'m> Report<'m> {
    /// Create a report showing every match.
    #[must_use]
    pub fn new(matches: &'m PaymentMatches) -> Self {
        Self {
            matches,
            limit: None,
        }
    }

    /// Show at most `limit` matches.
    #[must_use]
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Number of matches the report will list.
    pub fn shown(&self) -> usize {
        let total = self.matches.ranked.len();

        self.limit.map_or(total, |limit| limit.min(total))
    }

    /// Writes the report.
    ///
    /// # Errors
    ///
    /// Returns an error if a match cannot be resolved against `ledger` or the
    /// output cannot be written.
    pub fn write_to(
        &self,
        mut out: impl io::Write,
        ledger: &Ledger<'_>,
    ) -> Result<(), ReportError> {
        if self.shown() > 0 {
            let mut builder = Builder::default();

            push_report_header(&mut builder);

            let shown = self.matches.ranked.iter().take(self.shown());

            for (position, ranked) in shown.enumerate() {
                push_match_row(&mut builder, position, ranked, ledger)?;
            }

            write_report_table(&mut out, builder, self.shown())?;
        }

        write_report_summary(&mut out, self)?;

        Ok(())
    }
}

fn push_report_header(builder: &mut Builder) {
    builder.push_record([
        "", "Invoices", "POS", "Amounts", "Total", "Gap", "Index Sum", "First",
    ]);
}

fn push_match_row(
    builder: &mut Builder,
    position: usize,
    ranked: &RankedCombination,
    ledger: &Ledger<'_>,
) -> Result<(), ReportError> {
    let invoices = ledger.invoices_for(ranked)?;
    let currency = ledger.currency();

    let refs: Vec<&str> = invoices.iter().map(|invoice| invoice.inv_ref()).collect();
    let pos_refs: Vec<&str> = invoices.iter().map(|invoice| invoice.pos_ref()).collect();
    let amounts: Vec<String> = ranked
        .amounts
        .iter()
        .map(|amount| format_money(*amount, currency))
        .collect();
    let total: Decimal = ranked.amounts.iter().sum();

    builder.push_record([
        format!("#{:<3}", position + 1),
        refs.join("\n"),
        pos_refs.join("\n"),
        amounts.join("\n"),
        format_money(total, currency),
        ranked.gap_score.to_string(),
        ranked.sum_indices.to_string(),
        format!("#{}", ranked.lowest_index + 1),
    ]);

    Ok(())
}

fn write_report_table(
    out: &mut impl io::Write,
    builder: Builder,
    rows: usize,
) -> Result<(), ReportError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();

    // One line under the header and one between each pair of matches.
    for row in 1..=rows {
        theme.insert_horizontal_line(row, separator);
    }

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..8), Alignment::right());
    table.modify(Columns::new(5..8), color_dark_grey());

    writeln!(out, "\n{table}")?;

    Ok(())
}

fn write_report_summary(
    out: &mut impl io::Write,
    report: &Report<'_>,
) -> Result<(), ReportError> {
    let matches = report.matches;
    let total = matches.ranked.len();

    if report.shown() < total {
        writeln!(out, " {} (showing best {})", matches.outcome, report.shown())?;
    } else {
        writeln!(out, " {}", matches.outcome)?;
    }

    if matches.stats.nodes_visited > 0 {
        writeln!(
            out,
            " searched {} partial combinations, pruned {}",
            matches.stats.nodes_visited, matches.stats.nodes_pruned
        )?;
    }

    if matches.stats.truncated {
        writeln!(out, " search stopped at the node limit; more matches may exist")?;
    }

    Ok(())
}

fn format_money(amount: Decimal, currency: &Currency) -> String {
    Money::from_decimal(amount, currency).to_string()
}

/// ANSI dark grey (ranking metrics).
fn color_dark_grey() -> Color {
    Color::new("\x1b[90m", "\x1b[0m")
}
