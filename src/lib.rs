//! commitmoji - AI-written git commit messages with gitmoji prefixes.
//!
//! # Overview
//!
//! commitmoji reads the staged diff, asks for an optional background note and
//! prefix, requests candidate messages from an OpenAI-compatible chat
//! completions API, and commits the one the user picks.

pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod interrupt;
pub mod llm;
pub mod prefix;
pub mod prompt;
pub mod rerun;
pub mod ui;

// Re-export commonly used types
pub use commit::{CommitOptions, Decision, Outcome, run_commit_flow};
pub use config::{CommitType, Config, ConfigFile, ConfigKey, ConfigOverrides, resolve_config};
pub use error::{CommitError, ConfigError, GenerationError, GitError, PromptError};
pub use git::{GitExecutor, StagedChange, SystemGit};
pub use llm::{GenerationRequest, Generator, OpenAiGenerator};
pub use prefix::PrefixChoice;
pub use prompt::{ConfirmChoice, Prompter, TerminalPrompter};
