use std::collections::BTreeSet;

use thiserror::Error;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::history::HistoryError;
use crate::history::HistorySource;
use crate::mapping::TagMapping;

/// Re-anchors one resolved tag to a commit.
///
/// Any error is fatal to the whole run: the resolver propagates it
/// immediately, without rollback and without moving on to other tags.
pub trait TagApplier {
    type Error;

    fn apply(&mut self, tag: &str, hash: &str) -> Result<(), Self::Error>;
}

/// Bounds on how much history the resolver may scan: at most
/// `max_iterations` pages of `chunk_size` commits each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchBudget {
    chunk_size: usize,
    max_iterations: usize,
}

/// Rejected search-budget configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BudgetError {
    #[error("chunk size must be greater than 0, got: {0}")]
    ChunkSize(usize),
    #[error("iteration count must be greater than 0, got: {0}")]
    Iterations(usize),
}

impl SearchBudget {
    pub fn new(chunk_size: usize, max_iterations: usize) -> Result<Self, BudgetError> {
        if chunk_size == 0 {
            return Err(BudgetError::ChunkSize(chunk_size));
        }
        if max_iterations == 0 {
            return Err(BudgetError::Iterations(max_iterations));
        }
        Ok(Self {
            chunk_size,
            max_iterations,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }
}

/// Terminal state of a resolution run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every tag in the working set was re-anchored.
    AllResolved,
    /// The iteration budget ran out with tags still unresolved.
    BudgetExhausted,
    /// The history source failed; searching stopped early.
    SourceFailed(HistoryError),
}

/// Result of a resolution run. Unresolved tags are data, never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub outcome: Outcome,
    /// Tags whose message was never observed within budget.
    pub unresolved: BTreeSet<String>,
    /// Number of pages actually fetched.
    pub iterations: usize,
}

/// Scans history page by page, re-anchoring every tag whose recorded message
/// is observed, until the working set empties or the budget runs out.
///
/// The skip offset advances by exactly one chunk per iteration whether or not
/// anything matched, so no commit range is scanned twice and the loop
/// terminates after at most `max_iterations` page fetches. A tag whose
/// message occurs more than once in history is anchored to the first (most
/// recent) occurrence only; by the time a duplicate is seen the tag has
/// already left the working set.
pub fn resolve<S, A>(
    mapping: &TagMapping,
    source: &mut S,
    applier: &mut A,
    budget: SearchBudget,
) -> Result<Resolution, A::Error>
where
    S: HistorySource,
    A: TagApplier,
{
    let mut working: BTreeSet<String> = mapping.all_tags().clone();
    let mut iteration = 0;
    let mut skip = 0;

    while !working.is_empty() && iteration < budget.max_iterations() {
        iteration += 1;
        info!(
            "iteration {iteration}: scanning next {} commits",
            budget.chunk_size()
        );
        let page = match source.next_page(skip, budget.chunk_size()) {
            Ok(page) => page,
            Err(err) => {
                warn!("history source failed: {err}");
                return Ok(Resolution {
                    outcome: Outcome::SourceFailed(err),
                    unresolved: working,
                    iterations: iteration,
                });
            }
        };
        for record in &page {
            let Some(tags) = mapping.tags_for(&record.message) else {
                continue;
            };
            for tag in tags {
                // `remove` returning false means the tag was already
                // anchored to a more recent commit with the same message.
                if working.remove(tag) {
                    debug!("found tag '{tag}' at '{}'", record.hash);
                    applier.apply(tag, &record.hash)?;
                }
            }
            if working.is_empty() {
                break;
            }
        }
        debug!("{} tags left to find", working.len());
        skip += budget.chunk_size();
    }

    let outcome = if working.is_empty() {
        Outcome::AllResolved
    } else {
        Outcome::BudgetExhausted
    };
    Ok(Resolution {
        outcome,
        unresolved: working,
        iterations: iteration,
    })
}
