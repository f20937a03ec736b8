use std::path::Path;
use std::path::PathBuf;

use retag_core::TagApplier;
use tracing::debug;
use tracing::info;

use crate::run::GitError;
use crate::run::run_git_for_status;
use crate::run::run_git_for_stdout;

/// Re-anchors tags in one repository via `git tag` / `git push`.
///
/// Each tag is updated with a delete-then-recreate sequence, locally and,
/// when a remote is configured, against that remote. The sequence is not a
/// transaction: any step failing aborts the whole run with the partial state
/// left in place.
pub struct GitTagApplier {
    repo: PathBuf,
    remote: Option<String>,
}

impl GitTagApplier {
    /// `remote: None` means local-only: remote steps are skipped entirely,
    /// not merely no-ops.
    pub fn new(repo: impl AsRef<Path>, remote: Option<String>) -> Self {
        Self {
            repo: repo.as_ref().to_path_buf(),
            remote,
        }
    }

    /// Deletes the local tag if it exists. A tag that is simply absent is
    /// not a failure; any other delete error is.
    fn delete_local(&self, tag: &str) -> Result<(), GitError> {
        let listed = run_git_for_stdout(&self.repo, ["tag", "-l", tag])?;
        if listed.is_empty() {
            debug!("tag '{tag}' does not exist locally, nothing to delete");
            return Ok(());
        }
        run_git_for_status(&self.repo, ["tag", "-d", tag])
    }

    /// Deletes the tag from the remote if the remote has it. A tag that was
    /// never pushed is not a failure; transport errors are.
    fn delete_remote(&self, remote: &str, tag: &str) -> Result<(), GitError> {
        let ref_name = format!("refs/tags/{tag}");
        let listed = run_git_for_stdout(
            &self.repo,
            ["ls-remote", "--tags", remote, ref_name.as_str()],
        )?;
        if listed.is_empty() {
            debug!("tag '{tag}' does not exist on '{remote}', nothing to delete");
            return Ok(());
        }
        run_git_for_status(&self.repo, ["push", "--delete", remote, "tag", tag])
    }
}

impl TagApplier for GitTagApplier {
    type Error = GitError;

    fn apply(&mut self, tag: &str, hash: &str) -> Result<(), GitError> {
        info!("updating tag '{tag}' to '{hash}'");
        self.delete_local(tag)?;
        if let Some(remote) = self.remote.as_deref() {
            self.delete_remote(remote, tag)?;
        }
        run_git_for_status(&self.repo, ["tag", tag, hash])?;
        if let Some(remote) = self.remote.as_deref() {
            run_git_for_status(&self.repo, ["push", remote, "tag", tag])?;
        }
        Ok(())
    }
}
