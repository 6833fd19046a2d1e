//! Subcommand execution.
//!
//! Each subcommand builds a [`FixGuard`] for the file's language, runs one
//! operation and writes a pretty-printed JSON report.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use fixsafe_config::Config;
use fixsafe_fixers::{FixerRegistry, LintViolation};
use fixsafe_syntax::{
    FixGuard, LexicalContext, Location, ReplaceResult, SupportedLanguage, offset_of,
};
use serde::Serialize;
use tracing::info;

use crate::AppError;
use crate::cli::{CliCommand, Position};

#[derive(Debug, Serialize)]
struct ClassifyReport {
    line: u32,
    column: u32,
    offset: usize,
    context: LexicalContext,
}

#[derive(Debug, Serialize)]
struct FunctionReport<'a> {
    marker: &'a str,
    text: String,
}

#[derive(Debug, Serialize)]
struct RuleReport {
    rule_id: &'static str,
    description: &'static str,
    enabled: bool,
}

pub(crate) fn execute<W: Write>(
    command: CliCommand,
    config: &Config,
    stdout: &mut W,
) -> Result<ExitCode, AppError> {
    match command {
        CliCommand::Classify { file, position } => {
            let (mut guard, source) = open(&file, config)?;
            let location = location(position);
            let offset = offset_of(&source, location)?;
            let report = ClassifyReport {
                line: location.line,
                column: location.column,
                offset,
                context: guard.classify_offset(&source, offset),
            };
            emit(stdout, &report).map(|()| ExitCode::SUCCESS)
        }
        CliCommand::Zone { file, position } => {
            let (mut guard, source) = open(&file, config)?;
            let zone = guard.find_safe_zone(&source, location(position));
            emit(stdout, &zone)?;
            Ok(verdict(zone.is_safe))
        }
        CliCommand::Replace {
            file,
            position,
            length,
            replacement,
            write,
        } => {
            let (mut guard, source) = open(&file, config)?;
            let result = guard.safe_replace(&source, location(position), length, &replacement);
            finish_edit(&file, &result, write, stdout)
        }
        CliCommand::Validate { file } => {
            let (mut guard, source) = open(&file, config)?;
            let result = guard.validate_syntax(&source);
            emit(stdout, &result)?;
            Ok(verdict(result.is_valid))
        }
        CliCommand::Drift { before, after } => {
            let (mut guard, after_source) = open(&after, config)?;
            let before_source = read_source(&before)?;
            let result = guard.validate_semantics(&before_source, &after_source);
            emit(stdout, &result)?;
            Ok(verdict(result.is_valid))
        }
        CliCommand::ExtractFunction { file, marker } => {
            let (mut guard, source) = open(&file, config)?;
            let text = guard
                .extract_function_body(&source, &marker)
                .ok_or_else(|| AppError::MarkerNotFound {
                    marker: marker.clone(),
                })?;
            let report = FunctionReport {
                marker: &marker,
                text,
            };
            emit(stdout, &report).map(|()| ExitCode::SUCCESS)
        }
        CliCommand::ExtractDeclaration { file, identifier } => {
            let (guard, source) = open(&file, config)?;
            let declaration = guard
                .extract_declaration(&source, &identifier)
                .ok_or(AppError::DeclarationNotFound { identifier })?;
            emit(stdout, &declaration).map(|()| ExitCode::SUCCESS)
        }
        CliCommand::Fix {
            file,
            rule,
            position,
            write,
        } => {
            let (mut guard, source) = open(&file, config)?;
            let registry = FixerRegistry::builtin();
            let violation = LintViolation::new(rule, location(position));
            let result = registry.apply(&mut guard, &source, &violation)?;
            finish_edit(&file, &result, write, stdout)
        }
        CliCommand::Rules => {
            let registry = FixerRegistry::builtin();
            let rules: Vec<RuleReport> = registry
                .rule_ids()
                .into_iter()
                .filter_map(|rule_id| {
                    registry.get(rule_id).map(|fixer| RuleReport {
                        rule_id,
                        description: fixer.description(),
                        enabled: registry.is_enabled(rule_id),
                    })
                })
                .collect();
            emit(stdout, &rules).map(|()| ExitCode::SUCCESS)
        }
    }
}

/// Picks the grammar from the file extension, falling back to the configured
/// language for unrecognised extensions.
pub(crate) fn language_for(path: &Path, config: &Config) -> SupportedLanguage {
    SupportedLanguage::from_path(path).unwrap_or_else(|| config.language())
}

fn open(path: &Path, config: &Config) -> Result<(FixGuard, String), AppError> {
    let source = read_source(path)?;
    let options = config.with_language(language_for(path, config)).guard_options();
    let guard = FixGuard::new(options)?;
    Ok((guard, source))
}

fn read_source(path: &Path) -> Result<String, AppError> {
    fs::read_to_string(path).map_err(|source| AppError::ReadSource {
        path: path.to_path_buf(),
        source,
    })
}

fn finish_edit<W: Write>(
    path: &Path,
    result: &ReplaceResult,
    write: bool,
    stdout: &mut W,
) -> Result<ExitCode, AppError> {
    if write && result.success {
        fs::write(path, &result.buffer).map_err(|source| AppError::WriteSource {
            path: PathBuf::from(path),
            source,
        })?;
        info!(target: "fixsafe::cli", path = %path.display(), "edited buffer written");
    }
    emit(stdout, result)?;
    Ok(verdict(result.success))
}

const fn location(position: Position) -> Location {
    Location::new(position.line, position.column)
}

fn verdict(passed: bool) -> ExitCode {
    if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn emit<W: Write, T: Serialize>(stdout: &mut W, report: &T) -> Result<(), AppError> {
    serde_json::to_writer_pretty(&mut *stdout, report).map_err(AppError::SerialiseReport)?;
    stdout.write_all(b"\n").map_err(AppError::EmitReport)?;
    stdout.flush().map_err(AppError::EmitReport)
}
