//! Combination Search
//!
//! Depth-first enumeration over index positions with prefix-sum pruning.

use std::fmt;

use rust_decimal::Decimal;
use smallvec::SmallVec;
use tracing::{info, warn};

use crate::{
    amounts::{IndexedAmount, indexed, to_cents},
    combinations::{Combination, CombinationError},
};

/// Options controlling how far a search may go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Maximum number of search nodes to visit before giving up, `None` for no limit.
    pub node_limit: Option<u64>,
}

impl SearchOptions {
    /// Options with a node limit.
    pub fn with_node_limit(node_limit: u64) -> Self {
        Self {
            node_limit: Some(node_limit),
        }
    }
}

/// Counters describing the work a search performed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes entered, including the empty root prefix
    pub nodes_visited: u64,

    /// Nodes abandoned because their running sum exceeded the target
    pub nodes_pruned: u64,

    /// Whether the node limit stopped the search early
    pub truncated: bool,
}

/// Diagnostic outcome of a search, suitable for showing to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The payment amount was not a positive amount.
    InvalidTarget,

    /// The search finished without finding a combination.
    NoMatches,

    /// The search found this many combinations.
    Matches(usize),
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTarget => write!(f, "invalid payment amount"),
            Self::NoMatches => write!(
                f,
                "no possible invoice combinations match the payment amount"
            ),
            Self::Matches(1) => write!(f, "1 match found"),
            Self::Matches(count) => write!(f, "{count} matches found"),
        }
    }
}

/// Combinations found for a target, with the diagnostic outcome of the search.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinationSearch {
    /// Matching combinations in emission order
    pub combinations: Vec<Combination>,

    /// What the search reported
    pub outcome: SearchOutcome,

    /// Work performed
    pub stats: SearchStats,
}

impl CombinationSearch {
    /// An empty search result for an invalid target.
    pub fn invalid_target() -> Self {
        Self {
            combinations: Vec::new(),
            outcome: SearchOutcome::InvalidTarget,
            stats: SearchStats::default(),
        }
    }
}

/// Find every combination of `amounts` summing to `target`, reporting the outcome.
///
/// An invalid target is not an error here: it produces an empty result with
/// [`SearchOutcome::InvalidTarget`].
pub fn find_combinations(amounts: &[Decimal], target: Decimal) -> CombinationSearch {
    find_combinations_with(amounts, target, &SearchOptions::default())
}

/// Like [`find_combinations`], bounded by `options`.
#[tracing::instrument(level = "debug", skip(amounts, options), fields(candidates = amounts.len()))]
pub fn find_combinations_with(
    amounts: &[Decimal],
    target: Decimal,
    options: &SearchOptions,
) -> CombinationSearch {
    let (combinations, stats) = match run(amounts, target, options) {
        Ok(found) => found,
        Err(err) => {
            warn!(%target, "{err}");

            return CombinationSearch::invalid_target();
        }
    };

    if stats.truncated {
        warn!(
            node_limit = options.node_limit,
            nodes_visited = stats.nodes_visited,
            "search stopped at node limit; results are incomplete"
        );
    }

    let outcome = if combinations.is_empty() {
        SearchOutcome::NoMatches
    } else {
        SearchOutcome::Matches(combinations.len())
    };

    info!(
        %target,
        matches = combinations.len(),
        nodes_visited = stats.nodes_visited,
        nodes_pruned = stats.nodes_pruned,
        "{outcome}"
    );

    CombinationSearch {
        combinations,
        outcome,
        stats,
    }
}

/// Validate the target and run the search.
pub(crate) fn run(
    amounts: &[Decimal],
    target: Decimal,
    options: &SearchOptions,
) -> Result<(Vec<Combination>, SearchStats), CombinationError> {
    let target_cents = to_cents(target);

    if target_cents <= Decimal::ZERO {
        return Err(CombinationError::InvalidTarget { target });
    }

    let mut search = Search {
        amounts,
        target: target_cents,
        node_limit: options.node_limit,
        prefix: SmallVec::new(),
        found: Vec::new(),
        stats: SearchStats::default(),
    };

    search.visit(0, Decimal::ZERO);

    Ok((search.found, search.stats))
}

/// Whether the search should keep going after a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

#[derive(Debug)]
struct Search<'a> {
    amounts: &'a [Decimal],
    target: Decimal,
    node_limit: Option<u64>,

    /// Chosen entries on the current branch; each call pops what it pushes.
    prefix: SmallVec<[IndexedAmount; 8]>,

    found: Vec<Combination>,
    stats: SearchStats,
}

impl Search<'_> {
    fn visit(&mut self, start: usize, running: Decimal) -> Flow {
        if self
            .node_limit
            .is_some_and(|limit| self.stats.nodes_visited >= limit)
        {
            self.stats.truncated = true;

            return Flow::Stop;
        }

        self.stats.nodes_visited += 1;

        let cents = to_cents(running);

        if cents > self.target {
            self.stats.nodes_pruned += 1;

            return Flow::Continue;
        }

        if cents == self.target {
            self.found.push(Combination::new(self.prefix.clone()));

            return Flow::Continue;
        }

        for entry in indexed(self.amounts).skip(start) {
            self.prefix.push(entry);

            let flow = self.visit(entry.index + 1, running + entry.amount);

            self.prefix.pop();

            if flow == Flow::Stop {
                return Flow::Stop;
            }
        }

        Flow::Continue
    }
}
