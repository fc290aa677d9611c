//! Git access: repository discovery, staged-change detection and committing.

pub mod executor;
pub mod repo;
pub mod staged;

pub use executor::{GitExecutor, SystemGit};
pub use repo::{check_git_installed, locate_repository};
pub use staged::{DEFAULT_EXCLUDES, StagedChange, detect_staged_changes, exclude_pathspecs};
