//! `dialoguer` implementation of [`Prompter`].

use std::io;

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};

use crate::error::PromptError;
use crate::prefix::PrefixChoice;

use super::{ConfirmChoice, Prompter};

pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a prompt result, treating an interrupted read (Ctrl-C) as cancellation.
///
/// Ctrl-C only surfaces as `Interrupted` while the interrupt handler is
/// installed; see [`crate::interrupt`].
fn cancelled_or_err<T>(result: Result<T, dialoguer::Error>) -> Result<Option<T>, PromptError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(dialoguer::Error::IO(e)) if e.kind() == io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(PromptError::Terminal(e)),
    }
}

impl Prompter for TerminalPrompter {
    fn background_note(&self) -> Result<Option<String>, PromptError> {
        cancelled_or_err(
            Input::<String>::with_theme(&self.theme)
                .with_prompt("Background for this change (optional)")
                .allow_empty(true)
                .interact_text(),
        )
    }

    fn prefix_choice(&self) -> Result<Option<PrefixChoice>, PromptError> {
        let items: Vec<String> = PrefixChoice::ALL.iter().map(|c| c.to_string()).collect();
        let index = Select::with_theme(&self.theme)
            .with_prompt("Select a prefix")
            .items(&items)
            .default(0)
            .interact_opt();
        Ok(cancelled_or_err(index)?.flatten().map(|i| PrefixChoice::ALL[i]))
    }

    fn confirm_message(&self, message: &str) -> Result<Option<ConfirmChoice>, PromptError> {
        let items: Vec<&str> = ConfirmChoice::ALL.iter().map(|c| c.label()).collect();
        let index = Select::with_theme(&self.theme)
            .with_prompt(format!("Use this commit message?\n\n   {message}\n"))
            .items(&items)
            .default(0)
            .interact_opt();
        Ok(cancelled_or_err(index)?.flatten().map(|i| ConfirmChoice::ALL[i]))
    }

    fn pick_message(&self, candidates: &[String]) -> Result<Option<usize>, PromptError> {
        let index = Select::with_theme(&self.theme)
            .with_prompt("Pick a commit message to use (Esc to cancel)")
            .items(candidates)
            .interact_opt();
        Ok(cancelled_or_err(index)?.flatten())
    }
}
