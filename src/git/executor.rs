//! Git commands used by the commit flow.
//!
//! All operations shell out to the system `git` binary, inheriting the user's
//! git config, hooks and credential setup.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::GitError;

/// Git operations the commit flow depends on.
///
/// This abstraction allows mocking git in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GitExecutor: Send + Sync {
    /// Update the index to match the working tree for tracked files.
    async fn stage_tracked(&self) -> Result<(), GitError>;

    /// Paths of staged files, restricted by `pathspecs`.
    async fn staged_files(&self, pathspecs: &[String]) -> Result<Vec<String>, GitError>;

    /// Unified diff of staged changes, restricted by `pathspecs`.
    async fn staged_diff(&self, pathspecs: &[String]) -> Result<String, GitError>;

    /// Create a commit with `message`, forwarding `extra_args` to `git commit`.
    async fn commit(&self, message: &str, extra_args: &[String]) -> Result<(), GitError>;
}

/// Executor backed by the `git` binary, run from the repository root.
pub struct SystemGit {
    root: PathBuf,
}

impl SystemGit {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run a git command and return its stdout, or a descriptive error.
    async fn run_git(&self, args: &[&str], operation: &str) -> Result<String, GitError> {
        debug!("git {}", args.join(" "));

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| GitError::SpawnFailed {
                operation: operation.to_string(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let stderr = if stderr.is_empty() {
                String::from_utf8_lossy(&output.stdout).trim().to_string()
            } else {
                stderr
            };
            return Err(GitError::CommandFailed {
                operation: operation.to_string(),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

const DIFF_CACHED: [&str; 3] = ["diff", "--cached", "--diff-algorithm=minimal"];

#[async_trait]
impl GitExecutor for SystemGit {
    async fn stage_tracked(&self) -> Result<(), GitError> {
        self.run_git(&["add", "--update"], "add").await.map(|_| ())
    }

    async fn staged_files(&self, pathspecs: &[String]) -> Result<Vec<String>, GitError> {
        let mut args: Vec<&str> = DIFF_CACHED.to_vec();
        args.push("--name-only");
        args.push("--");
        args.extend(pathspecs.iter().map(String::as_str));

        let stdout = self.run_git(&args, "diff").await?;
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }

    async fn staged_diff(&self, pathspecs: &[String]) -> Result<String, GitError> {
        let mut args: Vec<&str> = DIFF_CACHED.to_vec();
        args.push("--");
        args.extend(pathspecs.iter().map(String::as_str));

        self.run_git(&args, "diff").await
    }

    async fn commit(&self, message: &str, extra_args: &[String]) -> Result<(), GitError> {
        let mut args = vec!["commit", "-m", message];
        args.extend(extra_args.iter().map(String::as_str));

        self.run_git(&args, "commit").await.map(|_| ())
    }
}
