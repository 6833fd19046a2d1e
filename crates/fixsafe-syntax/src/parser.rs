//! Whole-buffer parse checks backed by Tree-sitter.
//!
//! Tree-sitter recovers from errors, so a parse always yields a tree; a
//! buffer is certified only when that tree holds no `ERROR` or missing nodes.

use std::ops::Range;

use serde::Serialize;

use crate::error::SyntaxError;
use crate::language::SupportedLanguage;
use crate::position::point_to_one_based;

/// Longest snippet reported for a parse error, in characters.
const SNIPPET_LIMIT: usize = 50;

/// A parsed buffer.
#[derive(Debug)]
pub struct ParseResult {
    tree: tree_sitter::Tree,
    language: SupportedLanguage,
}

impl ParseResult {
    /// The syntax tree.
    #[must_use]
    pub const fn tree(&self) -> &tree_sitter::Tree {
        &self.tree
    }

    /// Language the buffer was parsed as.
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.language
    }

    /// Returns true when the tree holds error or missing nodes.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }

    /// Every error and missing node in document order.
    #[must_use]
    pub fn errors(&self, source: &str) -> Vec<SyntaxErrorInfo> {
        let mut errors = Vec::new();
        if self.has_errors() {
            collect_errors(self.tree.root_node(), source, &mut errors);
        }
        errors
    }
}

/// Whether the parser found unexpected text or inferred absent text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorKind {
    /// Text the grammar could not place.
    Unexpected,
    /// A token the parser had to assume.
    Missing,
}

/// A parse error with its position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxErrorInfo {
    /// Unexpected or missing.
    pub kind: ParseErrorKind,
    /// Byte range of the offending node.
    pub byte_range: Range<usize>,
    /// One-based line of the node start.
    pub line: u32,
    /// One-based column of the node start.
    pub column: u32,
    /// Source text of the node, truncated.
    pub snippet: String,
    /// Parser message.
    pub message: String,
}

impl SyntaxErrorInfo {
    fn from_node(node: tree_sitter::Node<'_>, source: &str) -> Self {
        let byte_range = node.byte_range();
        let (line, column) = point_to_one_based(node.start_position());
        let snippet = source
            .get(byte_range.clone())
            .map(truncate_snippet)
            .unwrap_or_default();

        let (kind, message) = if node.is_missing() {
            (ParseErrorKind::Missing, format!("missing '{}'", node.kind()))
        } else {
            (ParseErrorKind::Unexpected, String::from("unexpected syntax"))
        };

        Self {
            kind,
            byte_range,
            line,
            column,
            snippet,
            message,
        }
    }
}

fn truncate_snippet(text: &str) -> String {
    if text.chars().count() <= SNIPPET_LIMIT {
        return text.to_owned();
    }
    let mut truncated: String = text.chars().take(SNIPPET_LIMIT - 3).collect();
    truncated.push_str("...");
    truncated
}

/// Tree-sitter parser configured for one language.
pub struct Parser {
    inner: tree_sitter::Parser,
    language: SupportedLanguage,
}

impl std::fmt::Debug for Parser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

impl Parser {
    /// Creates a parser for `language`.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::ParserInitError`] when the grammar is
    /// incompatible with the linked Tree-sitter runtime.
    pub fn new(language: SupportedLanguage) -> Result<Self, SyntaxError> {
        let mut inner = tree_sitter::Parser::new();
        inner
            .set_language(&language.tree_sitter_language())
            .map_err(|e| SyntaxError::parser_init(language, e.to_string()))?;
        Ok(Self { inner, language })
    }

    /// The configured language.
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.language
    }

    /// Parses `source`.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::ParseError`] if Tree-sitter produced no tree.
    pub fn parse(&mut self, source: &str) -> Result<ParseResult, SyntaxError> {
        let tree = self
            .inner
            .parse(source, None)
            .ok_or_else(|| SyntaxError::parse(self.language, "parser produced no tree"))?;
        Ok(ParseResult {
            tree,
            language: self.language,
        })
    }
}

fn collect_errors(node: tree_sitter::Node<'_>, source: &str, errors: &mut Vec<SyntaxErrorInfo>) {
    if node.is_error() || node.is_missing() {
        errors.push(SyntaxErrorInfo::from_node(node, source));
        return;
    }
    if !node.has_error() {
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_errors(child, source, errors);
    }
}
