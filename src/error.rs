//! Error types for commitmoji modules using thiserror.

use thiserror::Error;

/// Errors from running the git binary.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git was not found on PATH. Install git and try again.")]
    NotInstalled,

    #[error("Failed to run git {operation}: {source}")]
    SpawnFailed {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git {operation} failed: {stderr}")]
    CommandFailed { operation: String, stderr: String },
}

/// Errors from the chat completions API.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Invalid proxy URL '{url}': {source}")]
    InvalidProxy {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error(
        "Time out error: request took over {0}ms. Try increasing the `timeout` config, or checking the OpenAI API status https://status.openai.com"
    )]
    Timeout(u64),

    #[error("OpenAI API Error: {status} - {message}{}", status_hint(.status))]
    Api { status: u16, message: String },

    #[error("Request to the OpenAI API failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("OpenAI API returned an unexpected response: {0}")]
    InvalidResponse(String),
}

fn status_hint(status: &u16) -> &'static str {
    if *status >= 500 {
        "\n\nCheck the API status: https://status.openai.com"
    } else {
        ""
    }
}

/// Errors from configuration resolution and the config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown config key: {0}")]
    UnknownKey(String),

    #[error("Invalid config value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Invalid config assignment '{0}'. Expected KEY=VALUE")]
    InvalidAssignment(String),

    #[error(
        "Please set your OpenAI API key via `commitmoji config set api_key=<your token>`, or the OPENAI_KEY environment variable"
    )]
    MissingApiKey,

    #[error("Could not determine the home directory. Set COMMITMOJI_CONFIG to a config file path.")]
    NoHomeDir,

    #[error("Failed to read config file: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseFailed(String),

    #[error("Failed to write config file: {0}")]
    WriteFailed(#[source] std::io::Error),
}

/// Errors from interactive prompts.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Terminal prompt failed: {0}")]
    Terminal(#[source] dialoguer::Error),
}

/// Errors from the commit flow. Every variant is fatal for the invocation.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("The current directory must be a Git repository!")]
    NotAGitRepo,

    #[error(
        "No staged changes found. Stage your changes manually, or automatically stage all changes with the `--all` flag."
    )]
    NoStagedChanges,

    #[error("No commit messages were generated. Try again.")]
    EmptyGeneration,

    #[error(transparent)]
    GenerationFailure(#[from] GenerationError),

    #[error("{0}")]
    CommitFailure(String),

    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Prompt(#[from] PromptError),
}
