//! Prompt construction for commit message generation.

use crate::config::CommitType;
use crate::prefix::PrefixChoice;

/// Maximum characters of diff text sent to the model.
pub const MAX_DIFF_LENGTH: usize = 30_000;

/// Directive appended when the user lets the model choose its own prefix.
const ENTRUST_DIRECTIVE: &str = "Start the message with one fitting gitmoji emoji followed by a \
conventional type and a colon, for example \"✨ feat: \" or \"🐛 fix: \". \
Pick the emoji and type that best describe the change.";

/// Build the system prompt.
pub fn build_system_prompt(
    locale: &str,
    max_length: u16,
    commit_type: CommitType,
    instruction: &str,
) -> String {
    let mut lines = vec![
        "Generate a concise git commit message written in present tense for the following code diff with the given specifications below:".to_string(),
        format!("Message language: {locale}"),
        format!("Commit message must be a maximum of {max_length} characters."),
        "Exclude anything unnecessary such as translation. Your entire response will be passed directly into git commit.".to_string(),
    ];

    if commit_type == CommitType::Conventional {
        lines.push(
            "Choose a type from: feat, fix, docs, style, refactor, perf, test, build, ci, chore, revert."
                .to_string(),
        );
        lines.push("The output response must be in format:\n<type>(<optional scope>): <commit message>".to_string());
    }

    if !instruction.trim().is_empty() {
        lines.push(instruction.trim().to_string());
    }

    lines.join("\n")
}

/// Assemble the auxiliary instruction from the background note and prefix.
pub fn build_instruction(note: &str, prefix: PrefixChoice) -> String {
    let mut parts = Vec::new();

    let note = note.trim();
    if !note.is_empty() {
        parts.push(format!("Background for this change: {note}"));
    }

    if prefix == PrefixChoice::Entrust {
        parts.push(ENTRUST_DIRECTIVE.to_string());
    }

    parts.join("\n")
}

/// Truncate diff text to `max_len` bytes on a char boundary.
pub fn truncate_diff(diff: &str, max_len: usize) -> &str {
    if diff.len() <= max_len {
        return diff;
    }
    let mut end = max_len;
    while end > 0 && !diff.is_char_boundary(end) {
        end -= 1;
    }
    &diff[..end]
}
