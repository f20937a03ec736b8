//! Tag-recovery engine: matches a saved tag → commit-message mapping against
//! paginated commit history and re-anchors each recovered tag.
//!
//! This crate is pure logic. Talking to an actual version-control store is
//! behind the [`HistorySource`] and [`TagApplier`] traits, implemented by
//! `retag-git-tooling`.

mod history;
mod mapping;
mod resolver;

pub use history::CommitRecord;
pub use history::HistoryError;
pub use history::HistorySource;
pub use mapping::TagMapping;
pub use resolver::BudgetError;
pub use resolver::Outcome;
pub use resolver::Resolution;
pub use resolver::SearchBudget;
pub use resolver::TagApplier;
pub use resolver::resolve;
