//! Compiled-in reference fixers.

mod eqeqeq;
mod no_var;

pub use eqeqeq::EqEqEqFixer;
pub use no_var::NoVarFixer;

use crate::fixer::Fixer;

/// Constructors for every built-in fixer.
pub(crate) const BUILTIN_FIXERS: &[fn() -> Box<dyn Fixer>] = &[no_var, eqeqeq];

fn no_var() -> Box<dyn Fixer> {
    Box::new(NoVarFixer)
}

fn eqeqeq() -> Box<dyn Fixer> {
    Box::new(EqEqEqFixer)
}

/// Returns true when `byte` may continue an identifier.
const fn is_identifier_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'$'
}
