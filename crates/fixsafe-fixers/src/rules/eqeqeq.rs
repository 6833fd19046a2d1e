//! `eqeqeq`: use strict equality operators.

use fixsafe_syntax::{FixGuard, ReplaceFailure, ReplaceResult};

use crate::fixer::{Fixer, text_at};
use crate::violation::LintViolation;

/// Rewrites `==` to `===` and `!=` to `!==`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EqEqEqFixer;

impl EqEqEqFixer {
    fn strict_operator(rest: &str) -> Option<&'static str> {
        if rest.starts_with("===") || rest.starts_with("!==") {
            None
        } else if rest.starts_with("==") {
            Some("===")
        } else if rest.starts_with("!=") {
            Some("!==")
        } else {
            None
        }
    }
}

impl Fixer for EqEqEqFixer {
    fn rule_id(&self) -> &'static str {
        "eqeqeq"
    }

    fn description(&self) -> &'static str {
        "replace `==` and `!=` with `===` and `!==`"
    }

    fn can_fix(&self, source: &str, violation: &LintViolation) -> bool {
        text_at(source, violation)
            .and_then(Self::strict_operator)
            .is_some()
    }

    fn fix(&self, guard: &mut FixGuard, source: &str, violation: &LintViolation) -> ReplaceResult {
        match text_at(source, violation).and_then(Self::strict_operator) {
            Some(operator) => guard.safe_replace(source, violation.location(), 2, operator),
            None => ReplaceResult::rejected(
                source,
                ReplaceFailure::InvalidRange {
                    message: String::from("no loose equality operator at the location"),
                },
                Vec::new(),
            ),
        }
    }
}
