use std::path::Path;
use std::process::Command;

use pretty_assertions::assert_eq;
use retag_core::HistorySource;
use retag_core::TagApplier;
use retag_git_tooling::GitHistory;
use retag_git_tooling::GitTagApplier;

/// Runs a git command in the test repository and asserts success.
fn run_git_in(repo_path: &Path, args: &[&str]) {
    let status = Command::new("git")
        .current_dir(repo_path)
        .args(args)
        .status()
        .expect("git command");
    assert!(status.success(), "git command failed: {args:?}");
}

/// Runs a git command and returns its trimmed stdout output.
fn run_git_stdout(repo_path: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .current_dir(repo_path)
        .args(args)
        .output()
        .expect("git command");
    assert!(output.status.success(), "git command failed: {args:?}");
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Initializes a repository with consistent settings for cross-platform tests.
fn init_test_repo(repo: &Path) {
    run_git_in(repo, &["init", "--initial-branch=main"]);
    run_git_in(repo, &["config", "core.autocrlf", "false"]);
}

/// Creates an empty commit with the given message and returns its full hash.
fn commit(repo: &Path, message: &str) -> String {
    run_git_in(
        repo,
        &[
            "-c",
            "user.name=Tester",
            "-c",
            "user.email=test@example.com",
            "commit",
            "--allow-empty",
            "-m",
            message,
        ],
    );
    run_git_stdout(repo, &["rev-parse", "HEAD"])
}

#[test]
fn history_pages_are_most_recent_first() {
    let temp = tempfile::tempdir().expect("tempdir");
    let repo = temp.path();
    init_test_repo(repo);
    commit(repo, "first commit");
    commit(repo, "second commit");
    commit(repo, "third commit");

    let mut history = GitHistory::new(repo);

    let page = history.next_page(0, 2).expect("first page");
    let messages: Vec<&str> = page.iter().map(|record| record.message.as_str()).collect();
    assert_eq!(messages, vec!["third commit", "second commit"]);

    let page = history.next_page(2, 2).expect("second page");
    let messages: Vec<&str> = page.iter().map(|record| record.message.as_str()).collect();
    assert_eq!(messages, vec!["first commit"]);

    let page = history.next_page(3, 2).expect("page past the end");
    assert!(page.is_empty());
}

#[test]
fn history_reports_hashes_matching_the_repository() {
    let temp = tempfile::tempdir().expect("tempdir");
    let repo = temp.path();
    init_test_repo(repo);
    let head = commit(repo, "only commit");

    let mut history = GitHistory::new(repo);
    let page = history.next_page(0, 1).expect("page");

    assert_eq!(page.len(), 1);
    assert!(head.starts_with(&page[0].hash), "abbreviated hash mismatch");
}

#[test]
fn decoration_is_surfaced_but_kept_out_of_the_message() {
    let temp = tempfile::tempdir().expect("tempdir");
    let repo = temp.path();
    init_test_repo(repo);
    commit(repo, "tagged commit");
    run_git_in(repo, &["tag", "v1.0"]);

    let mut history = GitHistory::new(repo);
    let page = history.next_page(0, 1).expect("page");

    assert_eq!(page[0].message, "tagged commit");
    let decoration = page[0].decoration.as_deref().expect("decoration");
    assert!(decoration.contains("tag: v1.0"), "got: {decoration}");
}

#[test]
fn history_failure_keeps_command_status_and_stderr_distinct() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut history = GitHistory::new(temp.path());

    let err = history.next_page(0, 10).expect_err("not a repository");
    match err {
        retag_core::HistoryError::Command {
            command,
            status,
            stderr,
        } => {
            assert!(command.starts_with("git log"), "got: {command}");
            assert_eq!(status, Some(128));
            assert!(!stderr.is_empty());
        }
        other => panic!("expected a command failure, got: {other:?}"),
    }
}

#[test]
fn apply_moves_an_existing_tag() {
    let temp = tempfile::tempdir().expect("tempdir");
    let repo = temp.path();
    init_test_repo(repo);
    let old = commit(repo, "old release");
    commit(repo, "newer work");
    run_git_in(repo, &["tag", "v1.0"]);

    let mut applier = GitTagApplier::new(repo, None);
    applier.apply("v1.0", &old).expect("apply");

    assert_eq!(run_git_stdout(repo, &["rev-parse", "v1.0"]), old);
}

#[test]
fn apply_creates_a_tag_that_does_not_exist_yet() {
    let temp = tempfile::tempdir().expect("tempdir");
    let repo = temp.path();
    init_test_repo(repo);
    let head = commit(repo, "some work");

    // No v1.0 anywhere: the delete step must tolerate the absence.
    let mut applier = GitTagApplier::new(repo, None);
    applier.apply("v1.0", &head).expect("apply");

    assert_eq!(run_git_stdout(repo, &["rev-parse", "v1.0"]), head);
}

#[test]
fn apply_fails_on_an_unknown_hash() {
    let temp = tempfile::tempdir().expect("tempdir");
    let repo = temp.path();
    init_test_repo(repo);
    commit(repo, "some work");

    let mut applier = GitTagApplier::new(repo, None);
    let err = applier
        .apply("v1.0", "0000000000000000000000000000000000000000")
        .expect_err("bogus hash must fail");
    assert!(err.to_string().contains("git tag v1.0"), "got: {err}");
}

#[test]
fn apply_pushes_to_a_configured_remote() {
    let temp = tempfile::tempdir().expect("tempdir");
    let remote_dir = temp.path().join("remote.git");
    std::fs::create_dir(&remote_dir).expect("mkdir");
    run_git_in(&remote_dir, &["init", "--bare"]);

    let repo = temp.path().join("work");
    std::fs::create_dir(&repo).expect("mkdir");
    init_test_repo(&repo);
    let old = commit(&repo, "old release");
    commit(&repo, "newer work");
    run_git_in(
        &repo,
        &["remote", "add", "origin", &remote_dir.to_string_lossy()],
    );
    // Stale tag exists both locally and on the remote.
    run_git_in(&repo, &["tag", "v1.0"]);
    run_git_in(&repo, &["push", "origin", "tag", "v1.0"]);

    let mut applier = GitTagApplier::new(&repo, Some("origin".to_string()));
    applier.apply("v1.0", &old).expect("apply");

    assert_eq!(run_git_stdout(&repo, &["rev-parse", "v1.0"]), old);
    assert_eq!(run_git_stdout(&remote_dir, &["rev-parse", "v1.0"]), old);
}
