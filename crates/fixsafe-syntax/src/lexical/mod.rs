//! Lexical context classification.
//!
//! [`classify`] answers whether a byte offset lies inside a string literal,
//! a comment, a regular-expression literal, template text or a template
//! substitution, by scanning the buffer from its start. It builds no syntax
//! tree and is a pure function of the buffer and offset.

mod cache;
mod context;
mod scanner;

pub use cache::{ClassifierCache, DEFAULT_CACHE_CAPACITY, Fingerprint, fingerprint};
pub use context::{CommentKind, LexicalContext, QuoteKind};
pub use scanner::{LexicalScanner, Step, StepKind};
pub(crate) use scanner::is_identifier_byte;

/// Classifies `offset` within `source`.
///
/// Offsets past the end of the buffer yield the default (plain code)
/// context rather than an error.
#[must_use]
pub fn classify(source: &str, offset: usize) -> LexicalContext {
    if offset > source.len() {
        return LexicalContext::default();
    }
    let mut scanner = LexicalScanner::new(source);
    scanner.advance_to(offset);
    scanner.context()
}
