//! The end-to-end commit flow: detect, ask, generate, select, commit.

use tracing::debug;

use crate::config::Config;
use crate::error::{CommitError, GitError};
use crate::git::{GitExecutor, detect_staged_changes};
use crate::llm::{GenerationRequest, Generator, build_instruction};
use crate::prompt::{Prompter, collect_input};
use crate::ui::{Spinner, print_staged_files};

use super::controller::{Decision, select_message};

/// Command-line options that shape one run of the flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitOptions {
    /// Paths excluded from detection in addition to the lock-file defaults.
    pub excludes: Vec<String>,
    /// Stage tracked files before detection.
    pub stage_all: bool,
    /// Arguments forwarded verbatim to `git commit`.
    pub passthrough: Vec<String>,
}

/// How a run ended when no fatal error occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Committed(String),
    Cancelled,
    /// The user asked for new candidates; the caller starts a fresh process.
    Regenerate,
}

pub async fn run_commit_flow<G, M, P>(
    git: &G,
    generator: &M,
    prompter: &P,
    config: &Config,
    options: &CommitOptions,
) -> Result<Outcome, CommitError>
where
    G: GitExecutor + ?Sized,
    M: Generator + ?Sized,
    P: Prompter + ?Sized,
{
    let staged = detect_staged_changes(git, &options.excludes, options.stage_all)
        .await?
        .ok_or(CommitError::NoStagedChanges)?;
    print_staged_files(&staged.files);

    let Some(input) = collect_input(prompter)? else {
        debug!("Cancelled while collecting input");
        return Ok(Outcome::Cancelled);
    };

    let api_key = config.require_api_key()?;
    let request = GenerationRequest {
        api_key: api_key.to_string(),
        api_base: config.api_base.clone(),
        model: config.model.clone(),
        locale: config.locale.clone(),
        diff: staged.diff,
        instruction: build_instruction(&input.note, input.prefix),
        completions: config.generate,
        max_length: config.max_length,
        commit_type: config.commit_type,
        timeout: config.timeout,
        proxy: config.proxy.clone(),
    };

    let candidates = {
        let _spinner = Spinner::start("The AI is analyzing your changes");
        generator.generate(&request).await?
    };
    if candidates.is_empty() {
        return Err(CommitError::EmptyGeneration);
    }
    debug!("{} candidate(s), prefix {}", candidates.len(), input.prefix.as_str());

    let message = match select_message(prompter, &candidates, input.prefix)? {
        Decision::Confirmed(message) => message,
        Decision::Regenerate => return Ok(Outcome::Regenerate),
        Decision::Cancelled => return Ok(Outcome::Cancelled),
    };

    git.commit(&message, &options.passthrough)
        .await
        .map_err(|e| match e {
            GitError::CommandFailed { stderr, .. } => CommitError::CommitFailure(stderr),
            other => CommitError::Git(other),
        })?;

    Ok(Outcome::Committed(message))
}
