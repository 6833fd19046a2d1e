//! `no-var`: declare with `let` instead of `var`.

use fixsafe_syntax::{FixGuard, ReplaceResult};

use super::is_identifier_byte;
use crate::fixer::{Fixer, text_at};
use crate::violation::LintViolation;

const KEYWORD: &str = "var";

/// Rewrites a `var` keyword to `let`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVarFixer;

impl Fixer for NoVarFixer {
    fn rule_id(&self) -> &'static str {
        "no-var"
    }

    fn description(&self) -> &'static str {
        "replace `var` declarations with `let`"
    }

    fn can_fix(&self, source: &str, violation: &LintViolation) -> bool {
        text_at(source, violation).is_some_and(|rest| {
            rest.strip_prefix(KEYWORD)
                .is_some_and(|tail| !tail.bytes().next().is_some_and(is_identifier_byte))
        })
    }

    fn fix(&self, guard: &mut FixGuard, source: &str, violation: &LintViolation) -> ReplaceResult {
        guard.safe_replace(source, violation.location(), KEYWORD.len(), "let")
    }
}

#[cfg(test)]
mod tests {
    use fixsafe_syntax::{FixGuardOptions, Location};
    use rstest::rstest;

    use super::*;

    fn violation(line: u32, column: u32) -> LintViolation {
        LintViolation::new("no-var", Location::new(line, column))
    }

    #[rstest]
    #[case("var a = 1;", 1, 1)]
    #[case("x;\n  var b;", 2, 3)]
    fn recognises_var_keywords(#[case] source: &str, #[case] line: u32, #[case] column: u32) {
        assert!(NoVarFixer.can_fix(source, &violation(line, column)));
    }

    #[rstest]
    #[case("variable = 1;", 1)]
    #[case("let a = 1;", 1)]
    #[case("var", 9)]
    fn ignores_other_text(#[case] source: &str, #[case] column: u32) {
        assert!(!NoVarFixer.can_fix(source, &violation(1, column)));
    }

    #[test]
    fn fix_goes_through_the_guard() {
        let mut guard = FixGuard::new(FixGuardOptions::default()).expect("guard");
        let result = NoVarFixer.fix(&mut guard, "var a = 1;", &violation(1, 1));
        assert!(result.success);
        assert_eq!(result.buffer, "let a = 1;");
    }

    #[test]
    fn fix_refuses_var_inside_comments() {
        let mut guard = FixGuard::new(FixGuardOptions::default()).expect("guard");
        let source = "// var a = 1;";
        let result = NoVarFixer.fix(&mut guard, source, &violation(1, 4));
        assert!(!result.success);
        assert_eq!(result.buffer, source);
    }
}
