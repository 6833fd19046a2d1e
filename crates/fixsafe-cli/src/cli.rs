//! CLI argument definitions for `fixsafe`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Command-line interface for the `fixsafe` safe-edit tool.
#[derive(Parser, Debug)]
#[command(name = "fixsafe", disable_help_subcommand = true)]
pub(crate) struct Cli {
    /// The operation to run.
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

/// A one-based position in a source file.
#[derive(Args, Debug, Clone, Copy)]
pub(crate) struct Position {
    /// One-based line number.
    #[arg(long)]
    pub(crate) line: u32,
    /// One-based column number, in bytes.
    #[arg(long)]
    pub(crate) column: u32,
}

/// Subcommands for the `fixsafe` CLI.
#[derive(Subcommand, Debug, Clone)]
pub(crate) enum CliCommand {
    /// Reports the lexical context at a position.
    Classify {
        /// Source file to inspect.
        file: PathBuf,
        #[command(flatten)]
        position: Position,
    },
    /// Reports whether an edit at a position is safe.
    Zone {
        /// Source file to inspect.
        file: PathBuf,
        #[command(flatten)]
        position: Position,
    },
    /// Replaces bytes at a position when the edit is safe and keeps the
    /// file valid.
    Replace {
        /// Source file to edit.
        file: PathBuf,
        #[command(flatten)]
        position: Position,
        /// Number of bytes to replace.
        #[arg(long)]
        length: usize,
        /// Replacement text.
        #[arg(long = "with", value_name = "TEXT", allow_hyphen_values = true)]
        replacement: String,
        /// Writes the edited buffer back to the file.
        #[arg(long)]
        write: bool,
    },
    /// Certifies the syntax of a file.
    Validate {
        /// Source file to validate.
        file: PathBuf,
    },
    /// Certifies an edited file and reports drift from the original.
    Drift {
        /// Original source file.
        before: PathBuf,
        /// Edited source file.
        after: PathBuf,
    },
    /// Prints the function starting at a marker through its closing brace.
    ExtractFunction {
        /// Source file to search.
        file: PathBuf,
        /// Text the function starts with, for example `function main`.
        #[arg(long)]
        marker: String,
    },
    /// Prints the `var`, `let` or `const` declaration of an identifier.
    ExtractDeclaration {
        /// Source file to search.
        file: PathBuf,
        /// Declared identifier.
        #[arg(long)]
        identifier: String,
    },
    /// Applies a registered fixer to a lint violation.
    Fix {
        /// Source file to edit.
        file: PathBuf,
        /// Rule identifier, for example `no-var`.
        #[arg(long)]
        rule: String,
        #[command(flatten)]
        position: Position,
        /// Writes the edited buffer back to the file.
        #[arg(long)]
        write: bool,
    },
    /// Lists the registered fixers.
    Rules,
}
