use std::path::PathBuf;

use clap::Parser;

/// Reapply version-control tags from a saved tag → commit-message mapping.
///
/// Scans repository history page by page for commits whose message matches a
/// mapping entry and re-anchors the associated tags there. Tags that are not
/// found within the search budget are reported, not silently dropped.
#[derive(Debug, Parser)]
#[clap(bin_name = "retag", version)]
pub struct Cli {
    /// File holding the tag → commit-message mapping, one
    /// `(tag: T1, tag: T2) message` record per line.
    pub mapping_file: PathBuf,

    /// How many commits to look at per history page.
    #[clap(short, long, default_value = "100")]
    pub chunk: usize,

    /// Maximum number of pages scanned. Together with --chunk this bounds
    /// how much history is searched before giving up.
    #[clap(short, long, default_value = "10")]
    pub iterations: usize,

    /// Repository to operate on. Defaults to the current directory.
    #[clap(short = 'C', long, value_name = "DIR")]
    pub cd: Option<PathBuf>,

    /// Also update tags on this remote (delete and re-push). When omitted,
    /// tags are only updated locally.
    #[clap(long, value_name = "NAME")]
    pub remote: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    /// `RUST_LOG` takes precedence when set.
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
