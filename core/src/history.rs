use thiserror::Error;

/// One commit as reported by a [`HistorySource`] page.
///
/// Ephemeral: produced per page and dropped once the page is scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    /// Opaque commit identifier, e.g. an abbreviated SHA.
    pub hash: String,
    /// Parenthesized log decoration, if any. Informational only; never used
    /// for matching.
    pub decoration: Option<String>,
    /// Trimmed first line of the commit message.
    pub message: String,
}

/// Transport-level failure while fetching a history page.
///
/// Ends the resolution loop early; remaining tags are reported as unresolved
/// data rather than raised as an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// The underlying log command exited non-zero.
    #[error(
        "history command `{command}` failed with {}: {stderr}",
        .status.map_or_else(|| "unknown status".to_string(), |code| format!("status {code}"))
    )]
    Command {
        command: String,
        status: Option<i32>,
        stderr: String,
    },

    /// The source failed before a command status was available, e.g. the
    /// binary could not be spawned or its output was not decodable.
    #[error("{0}")]
    Other(String),
}

/// Paginated, most-recent-first view of commit history.
pub trait HistorySource {
    /// Returns the page of commits at offset `skip` from the top of history,
    /// at most `size` records long. A short or empty page is not an error;
    /// it simply means history ran out.
    fn next_page(&mut self, skip: usize, size: usize) -> Result<Vec<CommitRecord>, HistoryError>;
}
