//! Integration tests for staged-change detection and committing.
//!
//! Runs the system `git` binary against temporary repositories.

mod common;

use common::TestRepo;
use commitmoji::error::GitError;
use commitmoji::git::{GitExecutor, SystemGit, detect_staged_changes};

// =============================================================================
// DETECTION TESTS
// =============================================================================

#[tokio::test]
async fn test_nothing_staged_returns_none() {
    let test_repo = TestRepo::new();
    test_repo.write_file("notes.txt", "unstaged\n");

    let git = SystemGit::new(test_repo.path());
    let result = detect_staged_changes(&git, &[], false).await.unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn test_staged_files_and_diff_are_detected() {
    let test_repo = TestRepo::new();
    test_repo.write_file("src/login.rs", "fn guard() {}\n");
    test_repo.write_file("README.md", "# demo\n");
    test_repo.stage(&["src/login.rs", "README.md"]);

    let git = SystemGit::new(test_repo.path());
    let change = detect_staged_changes(&git, &[], false).await.unwrap().unwrap();

    assert_eq!(change.files, vec!["README.md", "src/login.rs"]);
    assert!(change.diff.contains("+fn guard() {}"));
    assert!(change.diff.contains("+# demo"));
}

#[tokio::test]
async fn test_lock_files_are_excluded_by_default() {
    let test_repo = TestRepo::new();
    test_repo.write_file("Cargo.lock", "# lock\n");
    test_repo.write_file("package-lock.json", "{}\n");
    test_repo.stage(&["Cargo.lock", "package-lock.json"]);

    let git = SystemGit::new(test_repo.path());
    let result = detect_staged_changes(&git, &[], false).await.unwrap();

    assert!(result.is_none(), "only lock files staged, expected no changes");
}

#[tokio::test]
async fn test_user_excludes_are_applied() {
    let test_repo = TestRepo::new();
    test_repo.write_file("dist/bundle.js", "minified\n");
    test_repo.write_file("src/app.js", "console.log(1)\n");
    test_repo.stage(&["dist/bundle.js", "src/app.js"]);

    let git = SystemGit::new(test_repo.path());
    let change = detect_staged_changes(&git, &["dist/bundle.js".to_string()], false)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(change.files, vec!["src/app.js"]);
    assert!(!change.diff.contains("minified"));
}

#[tokio::test]
async fn test_stage_all_picks_up_tracked_modifications_only() {
    let test_repo = TestRepo::new();
    test_repo.write_file("tracked.txt", "v1\n");
    test_repo.stage(&["tracked.txt"]);
    test_repo.commit_index("initial");

    test_repo.write_file("tracked.txt", "v2\n");
    test_repo.write_file("untracked.txt", "new\n");

    let git = SystemGit::new(test_repo.path());
    let change = detect_staged_changes(&git, &[], true).await.unwrap().unwrap();

    assert_eq!(change.files, vec!["tracked.txt"]);
    assert!(change.diff.contains("+v2"));
}

// =============================================================================
// COMMIT TESTS
// =============================================================================

#[tokio::test]
async fn test_commit_uses_message_verbatim() {
    let test_repo = TestRepo::new();
    test_repo.write_file("src/login.rs", "fn guard() {}\n");
    test_repo.stage(&["src/login.rs"]);

    let git = SystemGit::new(test_repo.path());
    git.commit("🐛 fix: add login guard", &[]).await.unwrap();

    assert_eq!(
        test_repo.head_message().unwrap().trim_end(),
        "🐛 fix: add login guard"
    );
}

#[tokio::test]
async fn test_commit_forwards_extra_arguments() {
    let test_repo = TestRepo::new();
    test_repo.write_file("a.txt", "a\n");
    test_repo.stage(&["a.txt"]);

    let git = SystemGit::new(test_repo.path());
    git.commit("add a", &["--signoff".to_string()]).await.unwrap();

    let message = test_repo.head_message().unwrap();
    assert!(message.starts_with("add a"));
    assert!(message.contains("Signed-off-by: Test User <test@example.com>"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_rejecting_hook_reports_stderr() {
    let test_repo = TestRepo::new();
    test_repo.install_hook("pre-commit", "#!/bin/sh\necho 'lint failed' >&2\nexit 1\n");
    test_repo.write_file("a.txt", "a\n");
    test_repo.stage(&["a.txt"]);

    let git = SystemGit::new(test_repo.path());
    let result = git.commit("add a", &[]).await;

    match result {
        Err(GitError::CommandFailed { stderr, .. }) => assert!(stderr.contains("lint failed")),
        other => panic!("expected CommandFailed, got {other:?}"),
    }
    assert!(test_repo.head_message().is_none());
}
