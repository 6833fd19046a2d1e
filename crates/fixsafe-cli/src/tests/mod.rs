//! Unit and behavioural tests for the CLI runtime.

use std::ffi::OsString;
use std::process::ExitCode;

use fixsafe_config::Config;

use crate::{AppError, ConfigLoader, IoStreams, run_with_loader};


struct StaticConfigLoader {
    config: Config,
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self, _args: &[OsString]) -> Result<Config, AppError> {
        Ok(self.config.clone())
    }
}

struct CliOutcome {
    exit: ExitCode,
    stdout: String,
    stderr: String,
}

impl CliOutcome {
    fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout).expect("stdout holds a JSON report")
    }
}

fn run_cli<S: AsRef<str>>(args: &[S]) -> CliOutcome {
    let loader = StaticConfigLoader {
        config: Config::default(),
    };
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let argv = std::iter::once(OsString::from("fixsafe"))
        .chain(args.iter().map(|arg| OsString::from(arg.as_ref())));
    let exit = {
        let mut io = IoStreams::new(&mut stdout, &mut stderr);
        run_with_loader(argv, &mut io, &loader)
    };
    CliOutcome {
        exit,
        stdout: String::from_utf8(stdout).expect("stdout utf8"),
        stderr: String::from_utf8(stderr).expect("stderr utf8"),
    }
}
