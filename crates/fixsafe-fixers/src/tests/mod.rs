//! Crate-level tests and BDD scenarios.

use fixsafe_syntax::{FixGuard, FixGuardOptions, Location};

use crate::registry::FixerRegistry;
use crate::violation::LintViolation;


#[test]
fn builtin_fixers_repair_a_buffer_in_sequence() {
    let registry = FixerRegistry::builtin();
    let mut guard = FixGuard::new(FixGuardOptions::default()).expect("guard");
    let source = "var ok = a == b;\n";

    let first = registry
        .apply(&mut guard, source, &LintViolation::new("no-var", Location::new(1, 1)))
        .expect("no-var applies");
    let second = registry
        .apply(
            &mut guard,
            &first.buffer,
            &LintViolation::new("eqeqeq", Location::new(1, 12)),
        )
        .expect("eqeqeq applies");

    assert_eq!(second.buffer, "let ok = a === b;\n");
    let rules: Vec<&str> = guard
        .history()
        .records()
        .map(|record| record.rule_id.as_str())
        .collect();
    assert_eq!(rules, vec!["no-var", "eqeqeq"]);
}
