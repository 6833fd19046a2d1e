//! Rule-keyed fixer registry.
//!
//! The [`FixerRegistry`] stores one fixer per rule identifier together with
//! an enabled flag. Duplicate registrations are rejected. The built-in set is
//! populated from a compiled-in table rather than discovered at runtime.

use std::collections::HashMap;

use fixsafe_syntax::{FixGuard, ReplaceResult};
use tracing::{debug, info};

use crate::error::FixerError;
use crate::fixer::Fixer;
use crate::rules::BUILTIN_FIXERS;
use crate::violation::LintViolation;

#[derive(Debug)]
struct Registration {
    fixer: Box<dyn Fixer>,
    enabled: bool,
}

/// Registry of fixers keyed by rule identifier.
#[derive(Debug, Default)]
pub struct FixerRegistry {
    fixers: HashMap<&'static str, Registration>,
}

impl FixerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in fixer, all enabled.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for constructor in BUILTIN_FIXERS {
            let fixer = constructor();
            registry
                .fixers
                .entry(fixer.rule_id())
                .or_insert(Registration {
                    fixer,
                    enabled: true,
                });
        }
        registry
    }

    /// Registers an enabled fixer.
    ///
    /// # Errors
    ///
    /// Returns [`FixerError::Duplicate`] when a fixer for the same rule is
    /// already registered.
    pub fn register(&mut self, fixer: Box<dyn Fixer>) -> Result<(), FixerError> {
        let rule_id = fixer.rule_id();
        if self.fixers.contains_key(rule_id) {
            return Err(FixerError::Duplicate {
                rule_id: rule_id.to_owned(),
            });
        }
        self.fixers.insert(
            rule_id,
            Registration {
                fixer,
                enabled: true,
            },
        );
        Ok(())
    }

    /// Looks up the fixer for a rule, enabled or not.
    #[must_use]
    pub fn get(&self, rule_id: &str) -> Option<&dyn Fixer> {
        self.fixers
            .get(rule_id)
            .map(|registration| registration.fixer.as_ref())
    }

    /// Enables the rule's fixer.
    ///
    /// # Errors
    ///
    /// Returns [`FixerError::NotFound`] for an unknown rule.
    pub fn enable(&mut self, rule_id: &str) -> Result<(), FixerError> {
        self.set_enabled(rule_id, true)
    }

    /// Disables the rule's fixer.
    ///
    /// # Errors
    ///
    /// Returns [`FixerError::NotFound`] for an unknown rule.
    pub fn disable(&mut self, rule_id: &str) -> Result<(), FixerError> {
        self.set_enabled(rule_id, false)
    }

    fn set_enabled(&mut self, rule_id: &str, enabled: bool) -> Result<(), FixerError> {
        let registration = self
            .fixers
            .get_mut(rule_id)
            .ok_or_else(|| not_found(rule_id))?;
        registration.enabled = enabled;
        Ok(())
    }

    /// Returns true when the rule is registered and enabled.
    #[must_use]
    pub fn is_enabled(&self, rule_id: &str) -> bool {
        self.fixers
            .get(rule_id)
            .is_some_and(|registration| registration.enabled)
    }

    /// Registered rule identifiers in sorted order.
    #[must_use]
    pub fn rule_ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.fixers.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Returns the number of registered fixers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fixers.len()
    }

    /// Returns `true` when no fixers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fixers.is_empty()
    }

    /// Resolves the violation's fixer and applies it.
    ///
    /// A successful fix is recorded in the guard's history with the
    /// violation's line before and after the edit.
    ///
    /// # Errors
    ///
    /// Returns [`FixerError`] when the rule is unknown or disabled, the fixer
    /// does not apply at the location, or the fix fails the safety checks or
    /// the fixer's own validation.
    pub fn apply(
        &self,
        guard: &mut FixGuard,
        source: &str,
        violation: &LintViolation,
    ) -> Result<ReplaceResult, FixerError> {
        let rule_id = violation.rule_id.as_str();
        let registration = self.fixers.get(rule_id).ok_or_else(|| not_found(rule_id))?;
        if !registration.enabled {
            return Err(FixerError::Disabled {
                rule_id: rule_id.to_owned(),
            });
        }
        let fixer = registration.fixer.as_ref();
        if !fixer.can_fix(source, violation) {
            return Err(FixerError::NotApplicable {
                rule_id: rule_id.to_owned(),
                line: violation.line,
                column: violation.column,
            });
        }

        debug!(
            target: "fixsafe::fixers",
            rule_id,
            line = violation.line,
            column = violation.column,
            "applying fix"
        );
        let result = fixer.fix(guard, source, violation);
        if !result.success {
            return Err(rejected(rule_id, result.message));
        }
        if !fixer.validate(guard, source, &result.buffer) {
            return Err(rejected(rule_id, String::from("fixer validation failed")));
        }

        let original = nth_line(source, violation.line);
        let fixed = nth_line(&result.buffer, violation.line);
        guard.record_fix(rule_id, violation.location(), original, fixed);
        info!(target: "fixsafe::fixers", rule_id, line = violation.line, "fix applied");
        Ok(result)
    }
}

fn not_found(rule_id: &str) -> FixerError {
    FixerError::NotFound {
        rule_id: rule_id.to_owned(),
    }
}

fn rejected(rule_id: &str, message: String) -> FixerError {
    FixerError::Rejected {
        rule_id: rule_id.to_owned(),
        message,
    }
}

fn nth_line(source: &str, line: u32) -> &str {
    let index = usize::try_from(line.saturating_sub(1)).unwrap_or(usize::MAX);
    source.split('\n').nth(index).unwrap_or_default()
}

#[cfg(test)]
mod tests;
