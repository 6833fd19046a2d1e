//! Rule fixers and the registry that applies them.
//!
//! A [`Fixer`] rewrites one kind of lint violation. Every fixer edits
//! through [`fixsafe_syntax::FixGuard::safe_replace`], so no rule can touch
//! string, comment, regex or template content, or leave the buffer
//! syntactically broken.
//!
//! The [`FixerRegistry`] maps rule identifiers to fixers with an
//! enable/disable flag per rule. [`FixerRegistry::builtin`] is populated from
//! a compiled-in table holding [`NoVarFixer`] and [`EqEqEqFixer`].
//!
//! # Example
//!
//! ```ignore
//! use fixsafe_fixers::{FixerRegistry, LintViolation};
//! use fixsafe_syntax::{FixGuard, FixGuardOptions, Location};
//!
//! let registry = FixerRegistry::builtin();
//! let mut guard = FixGuard::new(FixGuardOptions::default())?;
//! let violation = LintViolation::new("no-var", Location::new(1, 1));
//! let result = registry.apply(&mut guard, "var a = 1;", &violation)?;
//! assert_eq!(result.buffer, "let a = 1;");
//! ```

pub mod error;
pub mod fixer;
pub mod registry;
pub mod rules;
pub mod violation;

#[cfg(test)]
mod tests;

pub use self::error::FixerError;
pub use self::fixer::Fixer;
pub use self::registry::FixerRegistry;
pub use self::rules::{EqEqEqFixer, NoVarFixer};
pub use self::violation::LintViolation;
