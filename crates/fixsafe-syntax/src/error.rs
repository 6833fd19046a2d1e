//! Error types for fixsafe analysis operations.
//!
//! Operational failures are split by concern so callers can pattern-match on
//! the kind of failure without inspecting message text. Validation outcomes
//! (bracket imbalance, parse errors, semantic drift) are not errors; they are
//! reported through [`crate::ValidationResult`].

use thiserror::Error;

use crate::language::SupportedLanguage;

/// Errors raised while preparing or running the external parser.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyntaxError {
    /// Failed to initialise the Tree-sitter parser for a language.
    #[error("failed to initialise parser for {language}: {message}")]
    ParserInitError {
        /// The language that failed to initialise.
        language: SupportedLanguage,
        /// Description of the failure.
        message: String,
    },

    /// The parser did not produce a syntax tree at all.
    #[error("failed to parse {language}: {message}")]
    ParseError {
        /// The language that failed to parse.
        language: SupportedLanguage,
        /// Description of the failure.
        message: String,
    },
}

impl SyntaxError {
    /// Creates a parser initialisation error.
    #[must_use]
    pub fn parser_init(language: SupportedLanguage, message: impl Into<String>) -> Self {
        Self::ParserInitError {
            language,
            message: message.into(),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(language: SupportedLanguage, message: impl Into<String>) -> Self {
        Self::ParseError {
            language,
            message: message.into(),
        }
    }
}

/// A line, column or offset that does not address a position in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PositionError {
    /// The line is zero or past the last line of the buffer.
    #[error("line {line} is outside the buffer (1..={line_count})")]
    LineOutOfRange {
        /// Requested one-based line.
        line: u32,
        /// Number of lines in the buffer.
        line_count: usize,
    },

    /// The column is zero or more than one past the end of its line.
    #[error("column {column} is outside line {line} (1..={max_column})")]
    ColumnOutOfRange {
        /// Requested one-based line.
        line: u32,
        /// Requested one-based column.
        column: u32,
        /// Largest column accepted on this line.
        max_column: usize,
    },

    /// The byte offset is past the end of the buffer.
    #[error("offset {offset} is past the end of the buffer (length {length})")]
    OffsetOutOfRange {
        /// Requested byte offset.
        offset: usize,
        /// Buffer length in bytes.
        length: usize,
    },

    /// The byte offset splits a multi-byte UTF-8 sequence.
    #[error("offset {offset} is not on a character boundary")]
    NotCharBoundary {
        /// Requested byte offset.
        offset: usize,
    },
}

/// Failures of snapshot lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// No snapshot is stored under the identifier.
    #[error("snapshot '{id}' not found")]
    NotFound {
        /// Identifier that was looked up.
        id: String,
    },
}
