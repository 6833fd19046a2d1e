//! Lint violations handed to fixers.

use fixsafe_syntax::Location;
use serde::Serialize;

/// A lint finding at one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintViolation {
    /// Rule that reported the finding.
    pub rule_id: String,
    /// One-based line.
    pub line: u32,
    /// One-based column.
    pub column: u32,
    /// Linter message.
    pub message: String,
}

impl LintViolation {
    /// Creates a violation with an empty message.
    #[must_use]
    pub fn new(rule_id: impl Into<String>, location: Location) -> Self {
        Self {
            rule_id: rule_id.into(),
            line: location.line,
            column: location.column,
            message: String::new(),
        }
    }

    /// Attaches the linter message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Location of the finding.
    #[must_use]
    pub const fn location(&self) -> Location {
        Location::new(self.line, self.column)
    }
}
