//! Errors raised while resolving and applying fixers.
//!
//! Each variant names the rule involved so callers can report failures
//! without inspecting message text.

use thiserror::Error;

/// Errors arising from registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixerError {
    /// No fixer is registered for the rule.
    #[error("no fixer registered for rule '{rule_id}'")]
    NotFound {
        /// Rule that was looked up.
        rule_id: String,
    },

    /// A fixer for the rule is already registered.
    #[error("a fixer for rule '{rule_id}' is already registered")]
    Duplicate {
        /// Rule of the rejected fixer.
        rule_id: String,
    },

    /// The rule's fixer is registered but disabled.
    #[error("fixer for rule '{rule_id}' is disabled")]
    Disabled {
        /// Disabled rule.
        rule_id: String,
    },

    /// The fixer does not recognise the violation at its location.
    #[error("fixer for rule '{rule_id}' cannot fix line {line}, column {column}")]
    NotApplicable {
        /// Rule of the fixer.
        rule_id: String,
        /// One-based line of the violation.
        line: u32,
        /// One-based column of the violation.
        column: u32,
    },

    /// The fix was attempted but refused by the safety checks.
    #[error("fix for rule '{rule_id}' was rejected: {message}")]
    Rejected {
        /// Rule of the fixer.
        rule_id: String,
        /// Why the fix was refused.
        message: String,
    },
}
