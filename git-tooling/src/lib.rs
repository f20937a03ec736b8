//! Git adapters for the tag-recovery engine.
//!
//! Implements `retag-core`'s [`HistorySource`](retag_core::HistorySource) and
//! [`TagApplier`](retag_core::TagApplier) traits on top of the `git` binary.
//! Every invocation goes through an argument vector, never a shell string, so
//! tag names and commit messages containing shell metacharacters are inert.

mod history;
mod run;
mod tags;

pub use history::GitHistory;
pub use run::GitError;
pub use tags::GitTagApplier;
