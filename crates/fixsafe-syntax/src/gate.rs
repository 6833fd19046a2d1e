//! Safe-edit decisions and buffer splicing.
//!
//! A location is safe to mutate only when it is ordinary code. The vetoes are
//! applied in a fixed order (string, comment, regex, template text) and the
//! first one that matches is reported.

use std::fmt;

use serde::Serialize;

use crate::lexical::{CommentKind, LexicalContext, QuoteKind};

/// Why a location must not be edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum UnsafeReason {
    /// Inside a string literal delimited by the quote.
    InString(QuoteKind),
    /// Inside a comment of the given kind.
    InComment(CommentKind),
    /// Inside a regular-expression literal.
    InRegex,
    /// Inside template text outside any substitution.
    InTemplateText,
    /// The location does not address the buffer.
    OutOfBounds,
}

impl fmt::Display for UnsafeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InString(quote) => write!(f, "inside string literal ({quote})"),
            Self::InComment(kind) => write!(f, "inside {kind} comment"),
            Self::InRegex => f.write_str("inside regular expression literal"),
            Self::InTemplateText => f.write_str("inside template literal text"),
            Self::OutOfBounds => f.write_str("location is outside the buffer"),
        }
    }
}

/// Verdict of the safe-edit gate for one location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SafeZone {
    /// Whether an edit at the location may proceed.
    pub is_safe: bool,
    /// The first veto that applied.
    pub reason: Option<UnsafeReason>,
    /// Classification the verdict was derived from.
    pub context: LexicalContext,
}

impl SafeZone {
    /// Applies the vetoes to a classification.
    #[must_use]
    pub fn assess(context: LexicalContext) -> Self {
        let reason = if context.in_string {
            Some(UnsafeReason::InString(
                context.string_char.unwrap_or(QuoteKind::Double),
            ))
        } else if context.in_comment {
            Some(UnsafeReason::InComment(
                context.comment_kind.unwrap_or(CommentKind::Single),
            ))
        } else if context.in_regex {
            Some(UnsafeReason::InRegex)
        } else if context.in_template_text() {
            Some(UnsafeReason::InTemplateText)
        } else {
            None
        };
        Self {
            is_safe: reason.is_none(),
            reason,
            context,
        }
    }

    /// Verdict for a location that could not be mapped onto the buffer.
    #[must_use]
    pub fn out_of_bounds() -> Self {
        Self {
            is_safe: false,
            reason: Some(UnsafeReason::OutOfBounds),
            context: LexicalContext::default(),
        }
    }
}

/// Why a replacement was refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReplaceFailure {
    /// The gate vetoed the location.
    Unsafe {
        /// The veto that applied.
        reason: UnsafeReason,
    },
    /// The location or length does not describe a range of the buffer.
    InvalidRange {
        /// Description of the bad bounds.
        message: String,
    },
    /// The edited buffer failed syntax validation.
    InvalidSyntax {
        /// Summary from the validator.
        error: String,
    },
}

impl fmt::Display for ReplaceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsafe { reason } => write!(f, "unsafe to edit: {reason}"),
            Self::InvalidRange { message } => write!(f, "invalid range: {message}"),
            Self::InvalidSyntax { error } => write!(f, "edit breaks syntax: {error}"),
        }
    }
}

/// Outcome of a guarded replacement.
///
/// On failure `buffer` is the original text, unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplaceResult {
    /// Whether the replacement was applied.
    pub success: bool,
    /// The resulting buffer.
    pub buffer: String,
    /// Human-readable summary.
    pub message: String,
    /// Non-fatal diagnostics.
    pub warnings: Vec<String>,
    /// Structured failure, when `success` is false.
    pub failure: Option<ReplaceFailure>,
}

impl ReplaceResult {
    /// A successful replacement.
    #[must_use]
    pub fn applied(buffer: String, warnings: Vec<String>) -> Self {
        Self {
            success: true,
            buffer,
            message: String::from("replacement applied"),
            warnings,
            failure: None,
        }
    }

    /// A refused replacement carrying the untouched original.
    #[must_use]
    pub fn rejected(original: &str, failure: ReplaceFailure, warnings: Vec<String>) -> Self {
        Self {
            success: false,
            buffer: original.to_owned(),
            message: failure.to_string(),
            warnings,
            failure: Some(failure),
        }
    }
}

/// Replaces `length` bytes at `offset` with `replacement`.
///
/// # Errors
///
/// Returns [`ReplaceFailure::InvalidRange`] when the range runs past the end
/// of the buffer or either end splits a UTF-8 sequence.
pub fn splice(
    source: &str,
    offset: usize,
    length: usize,
    replacement: &str,
) -> Result<String, ReplaceFailure> {
    let end = offset
        .checked_add(length)
        .ok_or_else(|| range_failure(offset, length, source.len()))?;
    let before = source
        .get(..offset)
        .ok_or_else(|| range_failure(offset, length, source.len()))?;
    let after = source
        .get(end..)
        .ok_or_else(|| range_failure(offset, length, source.len()))?;

    let mut spliced = String::with_capacity(before.len() + replacement.len() + after.len());
    spliced.push_str(before);
    spliced.push_str(replacement);
    spliced.push_str(after);
    Ok(spliced)
}

fn range_failure(offset: usize, length: usize, buffer_len: usize) -> ReplaceFailure {
    ReplaceFailure::InvalidRange {
        message: format!(
            "{length} byte(s) at offset {offset} do not fit a buffer of {buffer_len} byte(s)"
        ),
    }
}
