//! Preconditions checked before any work begins.

use std::path::{Path, PathBuf};

use git2::Repository;
use tracing::debug;

use crate::error::{CommitError, GitError};

/// Check that the `git` binary is available on PATH.
pub fn check_git_installed() -> Result<(), GitError> {
    which::which("git").map(|_| ()).map_err(|_| GitError::NotInstalled)
}

/// Find the working-tree root of the repository containing `path`.
///
/// Bare repositories have no working tree and are rejected like a
/// missing repository.
pub fn locate_repository(path: &Path) -> Result<PathBuf, CommitError> {
    let repo = Repository::discover(path).map_err(|e| {
        debug!("Repository discovery failed: {}", e);
        CommitError::NotAGitRepo
    })?;

    let root = repo.workdir().ok_or(CommitError::NotAGitRepo)?;
    Ok(root.to_path_buf())
}
