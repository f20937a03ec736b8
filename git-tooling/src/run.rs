use std::ffi::OsStr;
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;
use std::string::FromUtf8Error;

use thiserror::Error;
use tracing::debug;

/// Errors from invoking the `git` binary.
#[derive(Debug, Error)]
pub enum GitError {
    #[error("git command `{command}` failed with status {status}: {stderr}")]
    Command {
        command: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("git command `{command}` produced non-UTF-8 output")]
    OutputUtf8 {
        command: String,
        #[source]
        source: FromUtf8Error,
    },

    #[error("failed to spawn git: {0}")]
    Spawn(#[from] std::io::Error),
}

pub(crate) struct GitRun {
    pub(crate) command: String,
    pub(crate) output: std::process::Output,
}

/// Executes a git command in `dir` and returns its captured output.
/// A non-zero exit status is an error carrying the command line and stderr.
pub(crate) fn run_git<I, S>(dir: &Path, args: I) -> Result<GitRun, GitError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let args_vec: Vec<OsString> = args
        .into_iter()
        .map(|arg| OsString::from(arg.as_ref()))
        .collect();
    let command_string = build_command_string(&args_vec);
    debug!("{command_string}");
    let output = Command::new("git")
        .current_dir(dir)
        .args(&args_vec)
        .output()?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(GitError::Command {
            command: command_string,
            status: output.status,
            stderr,
        });
    }
    Ok(GitRun {
        command: command_string,
        output,
    })
}

/// Runs a git command when the exit status is the only concern.
pub(crate) fn run_git_for_status<I, S>(dir: &Path, args: I) -> Result<(), GitError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    run_git(dir, args)?;
    Ok(())
}

/// Runs a git command and returns trimmed standard output.
pub(crate) fn run_git_for_stdout<I, S>(dir: &Path, args: I) -> Result<String, GitError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let run = run_git(dir, args)?;
    String::from_utf8(run.output.stdout)
        .map(|value| value.trim().to_string())
        .map_err(|source| GitError::OutputUtf8 {
            command: run.command,
            source,
        })
}

/// Builds a printable git command string for diagnostics.
fn build_command_string(args: &[OsString]) -> String {
    if args.is_empty() {
        return "git".to_string();
    }
    let joined = args
        .iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ");
    format!("git {joined}")
}
