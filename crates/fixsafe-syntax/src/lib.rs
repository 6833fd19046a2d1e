//! Lexical safety checks for automated fixes to JavaScript-family source.
//!
//! The crate answers two questions for a fixer about to rewrite a buffer:
//! is this offset safe to mutate, and does the mutation keep the buffer
//! syntactically sound?
//!
//! - [`classify`] reports whether an offset lies inside a string, comment,
//!   regular-expression literal, template text or template substitution,
//!   scanning from the start of the buffer without building a syntax tree.
//! - [`SafeZone`] turns a classification into an edit verdict.
//! - [`SyntaxValidator`] certifies a buffer with a bracket-balance scan and a
//!   Tree-sitter parse, and compares two versions for coarse drift.
//! - [`FixHistory`] and [`SnapshotStore`] log applied fixes and keep named
//!   copies of buffers.
//! - [`locate_function_body`] and [`find_declaration`] extract structure
//!   while skipping delimiters inside literals and comments.
//!
//! [`FixGuard`] bundles these behind one context object that owns the
//! classifier cache, the parser, the history and the snapshots.
//!
//! # Example
//!
//! ```ignore
//! use fixsafe_syntax::{FixGuard, FixGuardOptions, Location};
//!
//! let mut guard = FixGuard::new(FixGuardOptions::default())?;
//! let source = "var total = a == b;";
//! let result = guard.safe_replace(source, Location::new(1, 1), 3, "let");
//! assert!(result.success);
//! assert_eq!(result.buffer, "let total = a == b;");
//! ```

mod error;
mod extraction;
mod gate;
mod guard;
mod history;
mod language;
mod lexical;
mod parser;
mod position;
mod validator;

pub use error::{PositionError, SnapshotError, SyntaxError};
pub use extraction::{BodyExtent, Declaration, find_declaration, locate_function_body};
pub use gate::{ReplaceFailure, ReplaceResult, SafeZone, UnsafeReason, splice};
pub use guard::{FixGuard, FixGuardOptions, GuardStats};
pub use history::{
    DEFAULT_HISTORY_LIMIT, FixHistory, FixRecord, SnapshotDiff, SnapshotStore,
};
pub use language::{LanguageParseError, SupportedLanguage};
pub use lexical::{
    ClassifierCache, CommentKind, DEFAULT_CACHE_CAPACITY, Fingerprint, LexicalContext,
    LexicalScanner, QuoteKind, Step, StepKind, classify, fingerprint,
};
pub use parser::{ParseErrorKind, ParseResult, Parser, SyntaxErrorInfo};
pub use position::{LineIndex, Location, line_count, location_of, offset_of};
pub use validator::{
    BracketIssue, BracketIssueKind, DRIFT_KEYWORDS, DriftReport, KeywordDelta,
    LINE_DELTA_THRESHOLD, SyntaxValidator, ValidationDetails, ValidationKind, ValidationResult,
    check_brackets,
};

#[cfg(test)]
mod tests;
