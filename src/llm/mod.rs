//! Commit message generation through a chat completions API.

pub mod openai;
pub mod prompt;

use std::time::Duration;

use async_trait::async_trait;

use crate::config::CommitType;
use crate::error::GenerationError;

pub use openai::{OpenAiGenerator, sanitize_message};
pub use prompt::{build_instruction, build_system_prompt, truncate_diff};

/// Everything one generation call needs. Built once from the resolved config.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
    pub locale: String,
    pub diff: String,
    /// Extra instruction assembled from the user's note and prefix choice.
    pub instruction: String,
    pub completions: u8,
    pub max_length: u16,
    pub commit_type: CommitType,
    pub timeout: Duration,
    pub proxy: Option<String>,
}

/// Produces candidate commit messages for a diff.
///
/// This abstraction allows mocking the remote service in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Generator: Send + Sync {
    /// Return candidate messages in generation order.
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<String>, GenerationError>;
}
