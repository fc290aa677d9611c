//! Candidate selection, confirmation, and prefix decoration.

use tracing::debug;

use crate::error::CommitError;
use crate::prefix::PrefixChoice;
use crate::prompt::{ConfirmChoice, Prompter};

/// Terminal result of the selection step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Confirmed(String),
    Regenerate,
    Cancelled,
}

#[derive(Debug)]
enum State<'a> {
    SingleCandidate(&'a str),
    MultiCandidate(&'a [String]),
    Decorated {
        message: String,
        needs_confirmation: bool,
    },
    Done(Decision),
}

/// Drive the selection prompts until a decision is reached.
///
/// A single candidate is decorated and then confirmed, regenerated, or
/// cancelled. With several candidates the user picks one raw message, which is
/// decorated and accepted without another confirmation.
pub fn select_message<P: Prompter + ?Sized>(
    prompter: &P,
    candidates: &[String],
    prefix: PrefixChoice,
) -> Result<Decision, CommitError> {
    let mut state = match candidates {
        [] => return Err(CommitError::EmptyGeneration),
        [only] => State::SingleCandidate(only),
        many => State::MultiCandidate(many),
    };

    loop {
        debug!("Selection state: {:?}", state);
        state = match state {
            State::SingleCandidate(raw) => State::Decorated {
                message: prefix.decorate(raw),
                needs_confirmation: true,
            },
            State::MultiCandidate(all) => match prompter.pick_message(all)? {
                Some(index) => match all.get(index) {
                    Some(raw) => State::Decorated {
                        message: prefix.decorate(raw),
                        needs_confirmation: false,
                    },
                    None => State::Done(Decision::Cancelled),
                },
                None => State::Done(Decision::Cancelled),
            },
            State::Decorated {
                message,
                needs_confirmation: false,
            } => State::Done(Decision::Confirmed(message)),
            State::Decorated {
                message,
                needs_confirmation: true,
            } => match prompter.confirm_message(&message)? {
                Some(ConfirmChoice::Yes) => State::Done(Decision::Confirmed(message)),
                Some(ConfirmChoice::Regenerate) => State::Done(Decision::Regenerate),
                Some(ConfirmChoice::Cancel) | None => State::Done(Decision::Cancelled),
            },
            State::Done(decision) => return Ok(decision),
        };
    }
}
