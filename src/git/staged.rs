//! Staged-change detection.

use tracing::debug;

use crate::error::GitError;

use super::executor::GitExecutor;

/// Files left out of every diff: lock files are noise for message generation.
pub const DEFAULT_EXCLUDES: [&str; 3] = ["package-lock.json", "pnpm-lock.yaml", "*.lock"];

/// Staged files and their unified diff, captured once per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedChange {
    /// Paths in the order git reported them.
    pub files: Vec<String>,
    pub diff: String,
}

/// Build `:(exclude)` pathspecs for the default excludes plus `excludes`.
pub fn exclude_pathspecs(excludes: &[String]) -> Vec<String> {
    DEFAULT_EXCLUDES
        .iter()
        .copied()
        .chain(excludes.iter().map(String::as_str))
        .filter(|path| !path.trim().is_empty())
        .map(|path| format!(":(exclude){}", path.trim()))
        .collect()
}

/// Detect staged changes, optionally staging tracked files first.
///
/// Returns `Ok(None)` when nothing (outside the excludes) is staged.
pub async fn detect_staged_changes<G: GitExecutor + ?Sized>(
    git: &G,
    excludes: &[String],
    stage_all: bool,
) -> Result<Option<StagedChange>, GitError> {
    if stage_all {
        git.stage_tracked().await?;
    }

    let pathspecs = exclude_pathspecs(excludes);
    let files = git.staged_files(&pathspecs).await?;
    if files.is_empty() {
        debug!("No staged files after excludes");
        return Ok(None);
    }

    let diff = git.staged_diff(&pathspecs).await?;
    debug!("Staged diff: {} files, {} chars", files.len(), diff.len());

    Ok(Some(StagedChange { files, diff }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::executor::MockGitExecutor;

    #[test]
    fn test_exclude_pathspecs_includes_defaults_then_user_paths() {
        let specs = exclude_pathspecs(&["dist/bundle.js".to_string()]);
        assert_eq!(
            specs,
            vec![
                ":(exclude)package-lock.json",
                ":(exclude)pnpm-lock.yaml",
                ":(exclude)*.lock",
                ":(exclude)dist/bundle.js",
            ]
        );
    }

    #[test]
    fn test_exclude_pathspecs_skips_blank_entries() {
        let specs = exclude_pathspecs(&["  ".to_string()]);
        assert_eq!(specs.len(), DEFAULT_EXCLUDES.len());
    }

    #[tokio::test]
    async fn test_detect_returns_none_when_nothing_staged() {
        let mut git = MockGitExecutor::new();
        git.expect_stage_tracked().times(0);
        git.expect_staged_files().times(1).returning(|_| Ok(Vec::new()));
        git.expect_staged_diff().times(0);

        let result = detect_staged_changes(&git, &[], false).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_detect_stages_tracked_files_when_requested() {
        let mut git = MockGitExecutor::new();
        let mut seq = mockall::Sequence::new();
        git.expect_stage_tracked()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(()));
        git.expect_staged_files()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(vec!["src/login.rs".to_string()]));
        git.expect_staged_diff()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok("+guard\n".to_string()));

        let change = detect_staged_changes(&git, &[], true).await.unwrap().unwrap();
        assert_eq!(change.files, vec!["src/login.rs"]);
        assert_eq!(change.diff, "+guard\n");
    }

    #[tokio::test]
    async fn test_detect_passes_exclude_pathspecs_to_git() {
        let mut git = MockGitExecutor::new();
        git.expect_staged_files()
            .withf(|specs: &[String]| specs.iter().any(|s| s == ":(exclude)docs/generated.md"))
            .times(1)
            .returning(|_| Ok(vec!["b.rs".to_string(), "a.rs".to_string()]));
        git.expect_staged_diff()
            .withf(|specs: &[String]| specs.len() == DEFAULT_EXCLUDES.len() + 1)
            .times(1)
            .returning(|_| Ok("diff".to_string()));

        let change = detect_staged_changes(&git, &["docs/generated.md".to_string()], false)
            .await
            .unwrap()
            .unwrap();
        // detection order is preserved
        assert_eq!(change.files, vec!["b.rs", "a.rs"]);
    }
}
