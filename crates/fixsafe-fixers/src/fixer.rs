//! The interface every rule fixer implements.

use std::fmt;

use fixsafe_syntax::{FixGuard, ReplaceResult, offset_of};

use crate::violation::LintViolation;

/// A rule-specific transformation.
///
/// Fixers propose edits through [`FixGuard::safe_replace`] so that every
/// mutation passes the safe-edit gate and syntax certification.
pub trait Fixer: fmt::Debug + Send + Sync {
    /// Identifier of the rule this fixer handles.
    fn rule_id(&self) -> &'static str;

    /// One-line description shown by `fixsafe rules`.
    fn description(&self) -> &'static str;

    /// Returns true when the text at the violation is something this fixer
    /// rewrites.
    fn can_fix(&self, source: &str, violation: &LintViolation) -> bool;

    /// Attempts the fix.
    fn fix(&self, guard: &mut FixGuard, source: &str, violation: &LintViolation) -> ReplaceResult;

    /// Accepts the fixed buffer when it still validates against the
    /// original.
    fn validate(&self, guard: &mut FixGuard, before: &str, after: &str) -> bool {
        guard.validate_semantics(before, after).is_valid
    }
}

/// The buffer from the violation's location to the end, if the location is
/// inside the buffer.
pub(crate) fn text_at<'a>(source: &'a str, violation: &LintViolation) -> Option<&'a str> {
    let offset = offset_of(source, violation.location()).ok()?;
    source.get(offset..)
}
