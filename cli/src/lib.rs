mod cli;

use std::path::PathBuf;

pub use cli::Cli;
use retag_core::Outcome;
use retag_core::SearchBudget;
use retag_core::TagMapping;
use retag_core::resolve;
use retag_git_tooling::GitHistory;
use retag_git_tooling::GitTagApplier;
use tracing_subscriber::EnvFilter;

/// All tags were resolved and reapplied.
pub const EXIT_OK: i32 = 0;
/// Invalid configuration: unreadable mapping file or non-positive bounds.
/// No history query is issued.
pub const EXIT_INVALID_CONFIG: i32 = -1;
/// The search budget ran out, or the history source failed, with tags still
/// unresolved.
pub const EXIT_UNRESOLVED: i32 = -2;
/// A tag mutation command failed; the run aborted immediately.
pub const EXIT_TAG_UPDATE_FAILED: i32 = -3;

/// Runs the tool and returns the process exit code.
pub fn run_main(cli: Cli) -> i32 {
    init_logging(cli.verbose);

    let budget = match SearchBudget::new(cli.chunk, cli.iterations) {
        Ok(budget) => budget,
        Err(err) => {
            eprintln!("error: {err}");
            return EXIT_INVALID_CONFIG;
        }
    };
    let text = match std::fs::read_to_string(&cli.mapping_file) {
        Ok(text) => text,
        Err(err) => {
            eprintln!(
                "error: {} is not readable: {err}",
                cli.mapping_file.display()
            );
            return EXIT_INVALID_CONFIG;
        }
    };

    let mapping = TagMapping::parse(&text);
    println!("{} tags to find", mapping.all_tags().len());

    let repo = cli.cd.unwrap_or_else(|| PathBuf::from("."));
    let mut source = GitHistory::new(&repo);
    let mut applier = GitTagApplier::new(&repo, cli.remote);
    let resolution = match resolve(&mapping, &mut source, &mut applier, budget) {
        Ok(resolution) => resolution,
        Err(err) => {
            eprintln!("error: {err}");
            return EXIT_TAG_UPDATE_FAILED;
        }
    };

    match &resolution.outcome {
        Outcome::AllResolved => {
            println!("all tags resolved");
            EXIT_OK
        }
        Outcome::SourceFailed(err) => {
            eprintln!("error: {err}");
            report_unresolved(&resolution);
            EXIT_UNRESOLVED
        }
        Outcome::BudgetExhausted => {
            report_unresolved(&resolution);
            EXIT_UNRESOLVED
        }
    }
}

fn report_unresolved(resolution: &retag_core::Resolution) {
    let names = resolution
        .unresolved
        .iter()
        .cloned()
        .collect::<Vec<String>>()
        .join(", ");
    println!(
        "didn't find the following {} tags: {names}",
        resolution.unresolved.len()
    );
}

/// Structured logs go to stderr so stdout stays reserved for the summary.
/// The `-v` count sets the fallback filter; `RUST_LOG` wins when present.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
