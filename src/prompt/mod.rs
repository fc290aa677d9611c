//! Interactive prompts: background note, prefix choice, and message selection.

pub mod terminal;

use crate::error::PromptError;
use crate::prefix::PrefixChoice;

pub use terminal::TerminalPrompter;

/// Answer to the single-candidate confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmChoice {
    Yes,
    Regenerate,
    Cancel,
}

impl ConfirmChoice {
    pub const ALL: [ConfirmChoice; 3] = [
        ConfirmChoice::Yes,
        ConfirmChoice::Regenerate,
        ConfirmChoice::Cancel,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ConfirmChoice::Yes => "Yes",
            ConfirmChoice::Regenerate => "No, regenerate",
            ConfirmChoice::Cancel => "No, cancel",
        }
    }
}

/// User interaction behind a trait so the flow can run without a terminal.
///
/// Every method returns `Ok(None)` when the user cancels the prompt.
#[cfg_attr(test, mockall::automock)]
pub trait Prompter {
    /// Free-text context for the change. Empty input is allowed.
    fn background_note(&self) -> Result<Option<String>, PromptError>;

    fn prefix_choice(&self) -> Result<Option<PrefixChoice>, PromptError>;

    /// Confirm a single decorated message.
    fn confirm_message(&self, message: &str) -> Result<Option<ConfirmChoice>, PromptError>;

    /// Pick one of several raw candidates; returns its index.
    fn pick_message(&self, candidates: &[String]) -> Result<Option<usize>, PromptError>;
}

/// Answers gathered before generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInput {
    pub note: String,
    pub prefix: PrefixChoice,
}

/// Ask for the note, then the prefix. `None` if either prompt is cancelled.
pub fn collect_input<P: Prompter + ?Sized>(prompter: &P) -> Result<Option<UserInput>, PromptError> {
    let Some(note) = prompter.background_note()? else {
        return Ok(None);
    };
    let Some(prefix) = prompter.prefix_choice()? else {
        return Ok(None);
    };
    Ok(Some(UserInput { note, prefix }))
}
