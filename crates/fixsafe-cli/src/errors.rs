//! Error types for the CLI runtime.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use fixsafe_fixers::FixerError;
use fixsafe_syntax::{PositionError, SyntaxError};
use thiserror::Error;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("failed to read {}: {source}", path.display())]
    ReadSource { path: PathBuf, source: io::Error },
    #[error("failed to write {}: {source}", path.display())]
    WriteSource { path: PathBuf, source: io::Error },
    #[error("failed to initialise parser: {0}")]
    Parser(#[from] SyntaxError),
    #[error("invalid location: {0}")]
    Location(#[from] PositionError),
    #[error("no declaration of '{identifier}' found")]
    DeclarationNotFound { identifier: String },
    #[error("marker '{marker}' not found")]
    MarkerNotFound { marker: String },
    #[error(transparent)]
    Fixer(#[from] FixerError),
    #[error("failed to serialise report: {0}")]
    SerialiseReport(serde_json::Error),
    #[error("failed to emit report: {0}")]
    EmitReport(io::Error),
}
