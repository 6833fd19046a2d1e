//! CLI entrypoint for the `fixsafe` safe-edit tool.
//!
//! The binary delegates to [`fixsafe_cli::run`], which loads configuration,
//! parses the subcommand, and writes a JSON report to standard output.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    fixsafe_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
