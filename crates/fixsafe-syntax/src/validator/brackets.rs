//! Bracket balance over code brackets.
//!
//! Only brackets the lexical scanner reports as code are counted, so
//! delimiters inside strings, comments, regexes and template text are
//! ignored. Braces delimiting a template substitution are not code either.
//! The scan reuses the lexical scanner rather than counting raw bytes, so it
//! agrees with the safe-edit gate about what is code.

use std::fmt;

use serde::Serialize;

use crate::lexical::{LexicalScanner, StepKind};
use crate::position::{LineIndex, Location};

/// How a bracket failed to balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketIssueKind {
    /// A closer with no opener left to close.
    Unmatched,
    /// An opener still open at the end of the buffer.
    Unclosed,
    /// A closer that does not match the innermost opener.
    Mismatched,
}

/// One bracket-balance diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BracketIssue {
    /// Failure mode.
    pub kind: BracketIssueKind,
    /// The offending bracket.
    pub bracket: char,
    /// Where the bracket is.
    pub location: Location,
}

impl fmt::Display for BracketIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.kind {
            BracketIssueKind::Unmatched => "unmatched closing",
            BracketIssueKind::Unclosed => "unclosed",
            BracketIssueKind::Mismatched => "mismatched closing",
        };
        write!(f, "{label} '{}' at {}", self.bracket, self.location)
    }
}

const BUFFER_START: Location = Location::new(1, 1);

const fn opener_for(closer: u8) -> Option<u8> {
    match closer {
        b')' => Some(b'('),
        b']' => Some(b'['),
        b'}' => Some(b'{'),
        _ => None,
    }
}

/// Scans `source` and returns every balance issue in buffer order, with
/// unclosed openers last.
#[must_use]
pub fn check_brackets(source: &str) -> Vec<BracketIssue> {
    let index = LineIndex::new(source);
    let issue = |kind, byte: u8, offset| BracketIssue {
        kind,
        bracket: char::from(byte),
        location: index.location(offset).unwrap_or(BUFFER_START),
    };

    let mut open: Vec<(u8, usize)> = Vec::new();
    let mut issues = Vec::new();
    for step in LexicalScanner::new(source) {
        let StepKind::Code(byte) = step.kind else {
            continue;
        };
        match byte {
            b'(' | b'[' | b'{' => open.push((byte, step.start)),
            b')' | b']' | b'}' => match open.last() {
                None => issues.push(issue(BracketIssueKind::Unmatched, byte, step.start)),
                Some((opener, _)) if opener_for(byte) == Some(*opener) => {
                    open.pop();
                }
                Some(_) => {
                    open.pop();
                    issues.push(issue(BracketIssueKind::Mismatched, byte, step.start));
                }
            },
            _ => {}
        }
    }
    issues.extend(
        open.into_iter()
            .map(|(byte, offset)| issue(BracketIssueKind::Unclosed, byte, offset)),
    );
    issues
}
