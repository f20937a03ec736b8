use std::path::Path;
use std::path::PathBuf;

use retag_core::CommitRecord;
use retag_core::HistoryError;
use retag_core::HistorySource;
use tracing::debug;
use tracing::trace;

use crate::run::run_git_for_stdout;

/// Paginated view of `git log` for one repository, most recent first.
pub struct GitHistory {
    repo: PathBuf,
}

impl GitHistory {
    pub fn new(repo: impl AsRef<Path>) -> Self {
        Self {
            repo: repo.as_ref().to_path_buf(),
        }
    }
}

impl HistorySource for GitHistory {
    fn next_page(&mut self, skip: usize, size: usize) -> Result<Vec<CommitRecord>, HistoryError> {
        let skip_arg = skip.to_string();
        let size_arg = size.to_string();
        let stdout = run_git_for_stdout(
            &self.repo,
            [
                "log",
                "--oneline",
                "--decorate",
                "--skip",
                skip_arg.as_str(),
                "-n",
                size_arg.as_str(),
            ],
        )
        .map_err(history_error)?;
        Ok(stdout.lines().filter_map(parse_log_line).collect())
    }
}

/// Keeps the command line, exit status, and stderr of a failed log
/// invocation distinct so the caller's diagnostics stay structured.
fn history_error(err: crate::GitError) -> HistoryError {
    match err {
        crate::GitError::Command {
            command,
            status,
            stderr,
        } => HistoryError::Command {
            command,
            status: status.code(),
            stderr,
        },
        other => HistoryError::Other(other.to_string()),
    }
}

/// Parses one `git log --oneline --decorate` line of the shape
/// `hash [ (decoration) ] message`.
///
/// The decoration, when present, is the parenthesized ref list git prints
/// after the hash; it is captured for diagnostics but never used for
/// matching. Lines that do not fit the shape are dropped from the page.
fn parse_log_line(line: &str) -> Option<CommitRecord> {
    let line = line.trim_end();
    if line.is_empty() {
        return None;
    }
    let Some((hash, rest)) = line.split_once(' ') else {
        debug!("dropping unparsable log line: {line}");
        return None;
    };
    if hash.is_empty() {
        debug!("dropping unparsable log line: {line}");
        return None;
    }
    let rest = rest.trim_start();
    let (decoration, message) = match rest.strip_prefix('(').and_then(|body| {
        let close = body.find(')')?;
        Some((&body[..close], &body[close + 1..]))
    }) {
        Some((decoration, tail)) => (Some(decoration.to_string()), tail.trim()),
        None => (None, rest),
    };
    let record = CommitRecord {
        hash: hash.to_string(),
        decoration,
        message: message.to_string(),
    };
    trace!("commit record: {record:?}");
    Some(record)
}
