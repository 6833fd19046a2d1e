//! The classification record returned for a buffer offset.

use std::fmt;

use serde::Serialize;

/// Delimiter of a string literal or template literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteKind {
    /// `'…'`
    Single,
    /// `"…"`
    Double,
    /// `` `…` ``
    Backtick,
}

impl QuoteKind {
    /// The delimiter character.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Single => '\'',
            Self::Double => '"',
            Self::Backtick => '`',
        }
    }

    pub(crate) const fn as_byte(self) -> u8 {
        match self {
            Self::Single => b'\'',
            Self::Double => b'"',
            Self::Backtick => b'`',
        }
    }
}

impl fmt::Display for QuoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Style of comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentKind {
    /// `// …` through the end of the line.
    Single,
    /// `/* … */`
    Multi,
}

impl fmt::Display for CommentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Single => "single-line",
            Self::Multi => "multi-line",
        })
    }
}

/// Lexical classification of a single buffer offset.
///
/// `in_string`, `in_comment`, `in_regex` and template text are mutually
/// exclusive. `in_template` stays true inside a `${…}` substitution, where
/// `in_template_expression` is also set; substitution code may itself open a
/// string, comment or regex, in which case that flag is set as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LexicalContext {
    /// Inside a single- or double-quoted string literal.
    pub in_string: bool,
    /// Inside a line or block comment.
    pub in_comment: bool,
    /// Inside a regular-expression literal.
    pub in_regex: bool,
    /// Inside a template literal, text or substitution.
    pub in_template: bool,
    /// Inside a `${…}` substitution of the innermost template.
    pub in_template_expression: bool,
    /// Quote of the enclosing string, or the backtick for template text.
    pub string_char: Option<QuoteKind>,
    /// Kind of the enclosing comment.
    pub comment_kind: Option<CommentKind>,
}

impl LexicalContext {
    /// Returns true when the offset is inside template text rather than a
    /// substitution.
    #[must_use]
    pub const fn in_template_text(&self) -> bool {
        self.in_template && !self.in_template_expression
    }

    /// Returns true when the offset is ordinary code.
    ///
    /// Substitution bodies are code; everything inside literal or comment
    /// content is not.
    #[must_use]
    pub const fn is_code(&self) -> bool {
        !self.in_string && !self.in_comment && !self.in_regex && !self.in_template_text()
    }
}
