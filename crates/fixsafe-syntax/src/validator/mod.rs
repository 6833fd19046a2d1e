//! Syntax certification and semantic drift detection.
//!
//! [`SyntaxValidator::validate`] runs a bracket-balance scan and a full
//! Tree-sitter parse. Both checks always run, so one call reports every
//! available diagnostic. [`SyntaxValidator::validate_semantics`] certifies
//! the edited buffer and then compares it with the original for coarse drift.

mod brackets;
mod drift;

pub use brackets::{BracketIssue, BracketIssueKind, check_brackets};
pub use drift::{DRIFT_KEYWORDS, DriftReport, KeywordDelta, LINE_DELTA_THRESHOLD};

use serde::Serialize;
use tracing::debug;

use crate::error::SyntaxError;
use crate::language::SupportedLanguage;
use crate::parser::{Parser, SyntaxErrorInfo};

/// Which check produced a [`ValidationResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationKind {
    /// Whole-buffer syntax certification.
    Syntax,
    /// Before/after drift comparison.
    Semantics,
}

/// Structured diagnostics behind a [`ValidationResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationDetails {
    /// Which check ran.
    pub kind: ValidationKind,
    /// Bracket-balance findings.
    pub bracket_issues: Vec<BracketIssue>,
    /// Parser findings.
    pub parse_errors: Vec<SyntaxErrorInfo>,
    /// Drift signals, for semantic checks that reached the comparison.
    pub drift: Option<DriftReport>,
}

/// Verdict of a validation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// Whether the buffer passed.
    pub is_valid: bool,
    /// Summary of the failure.
    pub error: Option<String>,
    /// Ordered diagnostics that do not by themselves describe the failure.
    pub warnings: Vec<String>,
    /// Structured payload.
    pub details: ValidationDetails,
}

/// Validator bound to a language's parser.
#[derive(Debug)]
pub struct SyntaxValidator {
    parser: Parser,
}

impl SyntaxValidator {
    /// Creates a validator for `language`.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::ParserInitError`] when the grammar cannot be
    /// loaded.
    pub fn new(language: SupportedLanguage) -> Result<Self, SyntaxError> {
        Ok(Self {
            parser: Parser::new(language)?,
        })
    }

    /// The language buffers are parsed as.
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.parser.language()
    }

    /// Certifies the syntax of `source`.
    pub fn validate(&mut self, source: &str) -> ValidationResult {
        let bracket_issues = check_brackets(source);
        let mut warnings: Vec<String> = bracket_issues.iter().map(ToString::to_string).collect();
        let mut summaries = Vec::new();

        let parse_errors = match self.parser.parse(source) {
            Ok(parsed) => parsed.errors(source),
            Err(error) => {
                summaries.push(error.to_string());
                Vec::new()
            }
        };
        if let Some(first) = parse_errors.first() {
            summaries.push(format!(
                "parse error: {} at line {}, column {}",
                first.message, first.line, first.column
            ));
            warnings.extend(parse_errors.iter().skip(1).map(|extra| {
                format!(
                    "parse error: {} at line {}, column {}",
                    extra.message, extra.line, extra.column
                )
            }));
        }
        if !bracket_issues.is_empty() {
            summaries.push(format!(
                "unbalanced brackets ({} issue(s))",
                bracket_issues.len()
            ));
        }

        let is_valid = summaries.is_empty();
        debug!(
            target: "fixsafe::validator",
            is_valid,
            bracket_issues = bracket_issues.len(),
            parse_errors = parse_errors.len(),
            "syntax validated"
        );
        ValidationResult {
            is_valid,
            error: (!is_valid).then(|| summaries.join("; ")),
            warnings,
            details: ValidationDetails {
                kind: ValidationKind::Syntax,
                bracket_issues,
                parse_errors,
                drift: None,
            },
        }
    }

    /// Certifies `after` and reports drift from `before`.
    ///
    /// Drift never invalidates the result; it only adds warnings.
    pub fn validate_semantics(&mut self, before: &str, after: &str) -> ValidationResult {
        let syntax = self.validate(after);
        let details = ValidationDetails {
            kind: ValidationKind::Semantics,
            ..syntax.details
        };
        if !syntax.is_valid {
            return ValidationResult {
                is_valid: false,
                error: Some(format!(
                    "modified buffer is not valid: {}",
                    syntax.error.unwrap_or_default()
                )),
                warnings: syntax.warnings,
                details,
            };
        }

        let drift = DriftReport::compare(before, after);
        ValidationResult {
            is_valid: true,
            error: None,
            warnings: drift.warnings(),
            details: ValidationDetails {
                drift: Some(drift),
                ..details
            },
        }
    }
}
