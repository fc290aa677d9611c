//! Commit prefix choices and the decoration rule.

use std::fmt;

/// Category prefix the user picks before generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefixChoice {
    None,
    Entrust,
    Fix,
    Chore,
    Docs,
    Style,
    Feat,
    Perf,
    Test,
    Security,
    Refactor,
}

impl PrefixChoice {
    /// Every choice, in the order it is offered to the user.
    pub const ALL: [PrefixChoice; 11] = [
        PrefixChoice::None,
        PrefixChoice::Entrust,
        PrefixChoice::Fix,
        PrefixChoice::Chore,
        PrefixChoice::Docs,
        PrefixChoice::Style,
        PrefixChoice::Feat,
        PrefixChoice::Perf,
        PrefixChoice::Test,
        PrefixChoice::Security,
        PrefixChoice::Refactor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PrefixChoice::None => "none",
            PrefixChoice::Entrust => "entrust",
            PrefixChoice::Fix => "fix",
            PrefixChoice::Chore => "chore",
            PrefixChoice::Docs => "docs",
            PrefixChoice::Style => "style",
            PrefixChoice::Feat => "feat",
            PrefixChoice::Perf => "perf",
            PrefixChoice::Test => "test",
            PrefixChoice::Security => "security",
            PrefixChoice::Refactor => "refactor",
        }
    }

    /// Decoration label prepended to the message. Empty for `None` and `Entrust`.
    pub fn label(&self) -> &'static str {
        match self {
            PrefixChoice::None | PrefixChoice::Entrust => "",
            PrefixChoice::Fix => "🐛 fix",
            PrefixChoice::Chore => "🔧 chore",
            PrefixChoice::Docs => "📝 docs",
            PrefixChoice::Style => "💄 style",
            PrefixChoice::Feat => "✨ feat",
            PrefixChoice::Perf => "⚡️ perf",
            PrefixChoice::Test => "✅ test",
            PrefixChoice::Security => "🔒️ security",
            PrefixChoice::Refactor => "♻️ refactor",
        }
    }

    /// Short human-readable description shown next to the choice.
    pub fn hint(&self) -> &'static str {
        match self {
            PrefixChoice::None => "no prefix",
            PrefixChoice::Entrust => "let the AI pick an emoji and type",
            PrefixChoice::Fix => "a bug fix",
            PrefixChoice::Chore => "tooling, config, maintenance",
            PrefixChoice::Docs => "documentation only",
            PrefixChoice::Style => "formatting, no logic change",
            PrefixChoice::Feat => "a new feature",
            PrefixChoice::Perf => "a performance improvement",
            PrefixChoice::Test => "adding or fixing tests",
            PrefixChoice::Security => "a security fix",
            PrefixChoice::Refactor => "restructuring without behavior change",
        }
    }

    /// Whether the message is used verbatim (no label applied).
    pub fn is_verbatim(&self) -> bool {
        matches!(self, PrefixChoice::None | PrefixChoice::Entrust)
    }

    /// Apply the decoration rule: `<label>: <message>`, or the message as-is
    /// for `None` and `Entrust`.
    pub fn decorate(&self, message: &str) -> String {
        if self.is_verbatim() {
            message.to_string()
        } else {
            format!("{}: {}", self.label(), message)
        }
    }
}

impl fmt::Display for PrefixChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_verbatim() {
            write!(f, "{} ({})", self.as_str(), self.hint())
        } else {
            write!(f, "{} ({})", self.label(), self.hint())
        }
    }
}
