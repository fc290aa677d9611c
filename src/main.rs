//! commitmoji - CLI entry point.

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use commitmoji::commit::{CommitOptions, Outcome, run_commit_flow};
use commitmoji::config::{ConfigFile, ConfigKey, ConfigOverrides, parse_assignment, resolve_config};
use commitmoji::git::{SystemGit, check_git_installed, locate_repository};
use commitmoji::interrupt::{cancel_and_exit, spawn_interrupt_handler};
use commitmoji::llm::OpenAiGenerator;
use commitmoji::prompt::TerminalPrompter;
use commitmoji::rerun::rerun_current_command;
use commitmoji::ui::{print_cancelled, print_error, print_success};

/// Write git commit messages with AI, prefixed with gitmoji.
#[derive(Parser, Debug)]
#[command(name = "commitmoji")]
#[command(about = "Write git commit messages with AI, prefixed with gitmoji")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Number of messages to generate (1-5)
    #[arg(short = 'g', long)]
    generate: Option<String>,

    /// Files to exclude from the diff (repeatable)
    #[arg(short = 'x', long = "exclude", value_name = "PATH")]
    exclude: Vec<String>,

    /// Stage all tracked changes before generating
    #[arg(short = 'a', long)]
    all: bool,

    /// Commit message style: plain or conventional
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    commit_type: Option<String>,

    /// OpenAI API key
    #[arg(long, value_name = "KEY")]
    api_key: Option<String>,

    /// Proxy URL for the API request
    #[arg(long, value_name = "URL")]
    proxy: Option<String>,

    /// Model name
    #[arg(long)]
    model: Option<String>,

    /// Language of the generated message
    #[arg(long)]
    locale: Option<String>,

    /// Show debug logs
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Extra arguments passed to `git commit`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "GIT_COMMIT_ARGS")]
    passthrough: Vec<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read or write the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print config values (all stored values when no key is given)
    Get { keys: Vec<String> },
    /// Store one or more KEY=VALUE pairs
    Set {
        #[arg(required = true, value_name = "KEY=VALUE")]
        assignments: Vec<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            print_error(&e.to_string());
            1
        }
    };
    std::process::exit(code);
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Run the selected command and return the process exit code.
async fn run(cli: Cli) -> Result<i32> {
    if let Some(Command::Config { action }) = cli.command {
        run_config(action)?;
        return Ok(0);
    }

    check_git_installed()?;
    let cwd = std::env::current_dir()
        .map_err(|e| anyhow!("Failed to read the current directory: {e}"))?;
    let root = locate_repository(&cwd)?;
    debug!("Repository root: {}", root.display());

    let file = ConfigFile::load(&ConfigFile::default_path()?)?;
    let overrides = ConfigOverrides {
        api_key: cli.api_key,
        proxy: cli.proxy,
        model: cli.model,
        locale: cli.locale,
        generate: cli.generate,
        commit_type: cli.commit_type,
    };
    let config = resolve_config(&overrides, &file)?;

    let options = CommitOptions {
        excludes: cli.exclude,
        stage_all: cli.all,
        passthrough: cli.passthrough,
    };

    let git = SystemGit::new(root);
    let generator = OpenAiGenerator::new();
    let prompter = TerminalPrompter::new();

    let interrupts = spawn_interrupt_handler(|| cancel_and_exit())
        .map_err(|e| anyhow!("Failed to install the Ctrl-C handler: {e}"))?;
    let outcome = run_commit_flow(&git, &generator, &prompter, &config, &options).await;
    interrupts.abort();

    match outcome? {
        Outcome::Committed(message) => {
            debug!("Committed: {}", message);
            print_success("Successfully committed");
            Ok(0)
        }
        Outcome::Cancelled => {
            print_cancelled();
            Ok(0)
        }
        Outcome::Regenerate => {
            debug!("Regenerating in a fresh process");
            rerun_current_command()
                .await
                .map_err(|e| anyhow!("Failed to restart commitmoji: {e}"))
        }
    }
}

fn run_config(action: ConfigAction) -> Result<()> {
    let mut file = ConfigFile::load(&ConfigFile::default_path()?)?;

    match action {
        ConfigAction::Get { keys } => {
            if keys.is_empty() {
                for (key, value) in file.entries() {
                    println!("{key}={value}");
                }
            } else {
                for name in keys {
                    let key: ConfigKey = name.parse()?;
                    println!("{}={}", key, file.get(key).unwrap_or_default());
                }
            }
        }
        ConfigAction::Set { assignments } => {
            for assignment in &assignments {
                let (key, value) = parse_assignment(assignment)?;
                file.set(key, &value)?;
            }
            file.save()?;
            debug!("Saved {} setting(s) to {}", assignments.len(), file.path().display());
        }
    }

    Ok(())
}
