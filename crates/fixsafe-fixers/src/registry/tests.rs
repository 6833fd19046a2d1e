//! Unit tests for the fixer registry.

use fixsafe_syntax::{FixGuardOptions, Location, ReplaceFailure, UnsafeReason};
use rstest::{fixture, rstest};

use super::*;
use crate::rules::{EqEqEqFixer, NoVarFixer};

/// Fixer whose every attempt is refused before touching the buffer.
#[derive(Debug)]
struct RefusingFixer;

impl Fixer for RefusingFixer {
    fn rule_id(&self) -> &'static str {
        "refuse"
    }

    fn description(&self) -> &'static str {
        "always refuses"
    }

    fn can_fix(&self, _source: &str, _violation: &LintViolation) -> bool {
        true
    }

    fn fix(&self, _guard: &mut FixGuard, source: &str, _violation: &LintViolation) -> ReplaceResult {
        ReplaceResult::rejected(
            source,
            ReplaceFailure::Unsafe {
                reason: UnsafeReason::InRegex,
            },
            Vec::new(),
        )
    }
}

/// Fixer that succeeds but rejects its own output.
#[derive(Debug)]
struct DoubtfulFixer;

impl Fixer for DoubtfulFixer {
    fn rule_id(&self) -> &'static str {
        "doubtful"
    }

    fn description(&self) -> &'static str {
        "never trusts itself"
    }

    fn can_fix(&self, _source: &str, _violation: &LintViolation) -> bool {
        true
    }

    fn fix(&self, _guard: &mut FixGuard, source: &str, _violation: &LintViolation) -> ReplaceResult {
        ReplaceResult::applied(source.to_owned(), Vec::new())
    }

    fn validate(&self, _guard: &mut FixGuard, _before: &str, _after: &str) -> bool {
        false
    }
}

#[fixture]
fn guard() -> FixGuard {
    FixGuard::new(FixGuardOptions::default()).expect("guard")
}

fn violation(rule_id: &str, line: u32, column: u32) -> LintViolation {
    LintViolation::new(rule_id, Location::new(line, column))
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[test]
fn new_registry_is_empty() {
    let registry = FixerRegistry::new();
    assert!(registry.is_empty());
    assert_eq!(registry.len(), 0);
}

#[test]
fn builtin_registry_lists_rules_in_order() {
    let registry = FixerRegistry::builtin();
    assert_eq!(registry.rule_ids(), vec!["eqeqeq", "no-var"]);
    assert!(registry.is_enabled("no-var"));
    assert!(registry.is_enabled("eqeqeq"));
}

#[test]
fn register_rejects_duplicate() {
    let mut registry = FixerRegistry::new();
    registry.register(Box::new(NoVarFixer)).expect("first register");
    let err = registry
        .register(Box::new(NoVarFixer))
        .expect_err("duplicate should fail");
    assert_eq!(
        err,
        FixerError::Duplicate {
            rule_id: "no-var".into()
        }
    );
    assert_eq!(registry.len(), 1);
}

#[test]
fn get_returns_registered_fixer() {
    let mut registry = FixerRegistry::new();
    registry.register(Box::new(EqEqEqFixer)).expect("register");
    assert_eq!(
        registry.get("eqeqeq").map(|fixer| fixer.description()),
        Some("replace `==` and `!=` with `===` and `!==`")
    );
    assert!(registry.get("no-var").is_none());
}

#[test]
fn enable_and_disable_toggle_the_flag() {
    let mut registry = FixerRegistry::builtin();
    registry.disable("no-var").expect("disable");
    assert!(!registry.is_enabled("no-var"));
    registry.enable("no-var").expect("enable");
    assert!(registry.is_enabled("no-var"));
}

#[test]
fn toggling_unknown_rule_fails() {
    let mut registry = FixerRegistry::new();
    assert_eq!(
        registry.disable("missing"),
        Err(FixerError::NotFound {
            rule_id: "missing".into()
        })
    );
    assert!(!registry.is_enabled("missing"));
}

// ---------------------------------------------------------------------------
// Application
// ---------------------------------------------------------------------------

#[rstest]
fn apply_records_the_changed_line(mut guard: FixGuard) {
    let registry = FixerRegistry::builtin();
    let source = "a();\nvar total = 1;\n";
    let result = registry
        .apply(&mut guard, source, &violation("no-var", 2, 1))
        .expect("fix applies");

    assert_eq!(result.buffer, "a();\nlet total = 1;\n");
    let record = guard.history().latest().expect("recorded");
    assert_eq!(record.rule_id, "no-var");
    assert_eq!(record.original_text, "var total = 1;");
    assert_eq!(record.fixed_text, "let total = 1;");
    assert_eq!(record.location(), Location::new(2, 1));
}

#[rstest]
fn apply_unknown_rule_fails(mut guard: FixGuard) {
    let registry = FixerRegistry::builtin();
    let err = registry
        .apply(&mut guard, "x;", &violation("semi", 1, 1))
        .expect_err("unknown rule");
    assert!(matches!(err, FixerError::NotFound { .. }));
}

#[rstest]
fn apply_disabled_rule_fails(mut guard: FixGuard) {
    let mut registry = FixerRegistry::builtin();
    registry.disable("eqeqeq").expect("disable");
    let err = registry
        .apply(&mut guard, "a == b;", &violation("eqeqeq", 1, 3))
        .expect_err("disabled");
    assert!(matches!(err, FixerError::Disabled { .. }));
    assert!(guard.history().is_empty());
}

#[rstest]
fn apply_checks_can_fix(mut guard: FixGuard) {
    let registry = FixerRegistry::builtin();
    let err = registry
        .apply(&mut guard, "let a = 1;", &violation("no-var", 1, 1))
        .expect_err("not applicable");
    assert_eq!(
        err,
        FixerError::NotApplicable {
            rule_id: "no-var".into(),
            line: 1,
            column: 1,
        }
    );
}

#[rstest]
#[case(Box::new(RefusingFixer) as Box<dyn Fixer>, "refuse")]
#[case(Box::new(DoubtfulFixer) as Box<dyn Fixer>, "doubtful")]
fn apply_surfaces_rejections(
    mut guard: FixGuard,
    #[case] fixer: Box<dyn Fixer>,
    #[case] rule_id: &str,
) {
    let mut registry = FixerRegistry::new();
    registry.register(fixer).expect("register");
    let err = registry
        .apply(&mut guard, "x;", &violation(rule_id, 1, 1))
        .expect_err("rejected");
    assert!(matches!(err, FixerError::Rejected { .. }));
    assert!(guard.history().is_empty());
}
