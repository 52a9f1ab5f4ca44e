//! Run shell commands through a POSIX shell or PowerShell and capture what
//! they print.
//!
//! The [`Runner`] is the entry point. It picks an interpreter, either
//! explicitly or from the host platform, spawns it with the command text,
//! waits for it to exit and returns a [`ShellOutput`]:
//!
//! ```no_run
//! use gosh::{Environment, Runner};
//!
//! let output = Runner::live().shell_output("echo hello", Environment::Inherit)?;
//! assert!(output.success());
//! assert_eq!(output.stdout, b"hello\n");
//! # Ok::<(), gosh::ShellError>(())
//! ```
//!
//! Process spawning and platform detection sit behind the [`ports`] traits so
//! they can be swapped for cassette-backed adapters in tests. Print mode is
//! layered on top in [`report`].

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod ports;
pub mod report;
pub mod runner;

use std::process::ExitCode;

use clap::Parser;

pub use config::RunnerConfig;
pub use context::ServiceContext;
pub use error::ShellError;
pub use ports::{
    Completion, Environment, Interpreter, Invocation, Platform, PlatformProbe, ShellExecutor,
    ShellKind, ShellOutput,
};
pub use report::Reporter;
pub use runner::{PlatformCommand, Runner};

/// Run the CLI with the provided arguments.
///
/// `--help` and `--version` print and succeed.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command dispatch fails.
pub fn run<I, T>(args: I) -> Result<ExitCode, String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            print!("{err}");
            return Ok(ExitCode::SUCCESS);
        }
        Err(err) => return Err(err.to_string()),
    };
    commands::dispatch(&cli)
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_prints_platform() {
        let result = run(["gosh", "platform"]);
        assert!(result.is_ok());
    }

    #[test]
    fn run_errors_on_unknown_subcommand() {
        let result = run(["gosh", "unknown"]);
        assert!(result.is_err());
    }

    #[test]
    fn run_help_succeeds() {
        let result = run(["gosh", "--help"]);
        assert!(result.is_ok());
    }
}
