//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::RunnerConfig;
use crate::error::ShellError;
use crate::ports::shell::Environment;

/// Top-level CLI parser for `gosh`.
#[derive(Debug, Parser)]
#[command(name = "gosh", version, about = "Run shell and PowerShell commands")]
pub struct Cli {
    /// POSIX shell program [default: $GOSH_POSIX_SHELL or bash].
    #[arg(long, global = true, value_name = "PROGRAM")]
    pub posix_shell: Option<String>,

    /// PowerShell program [default: $GOSH_POWERSHELL or powershell.exe].
    #[arg(long, global = true, value_name = "PROGRAM")]
    pub powershell: Option<String>,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Interpreter programs from flags, falling back to `base`.
    #[must_use]
    pub fn runner_config(&self, base: RunnerConfig) -> RunnerConfig {
        let mut config = base;
        if let Some(program) = &self.posix_shell {
            config = config.with_posix_program(program);
        }
        if let Some(program) = &self.powershell {
            config = config.with_powershell_program(program);
        }
        config
    }
}

/// Environment and directory overrides shared by the run subcommands.
#[derive(Debug, Args)]
pub struct RunOptions {
    /// Set a variable for the child. Any `--env` replaces the inherited
    /// environment entirely.
    #[arg(long = "env", value_name = "KEY=VALUE")]
    pub env: Vec<String>,

    /// Start the child with an empty environment.
    #[arg(long)]
    pub clear_env: bool,

    /// Run the command in this directory.
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,
}

impl RunOptions {
    /// The environment these options describe.
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed `--env` entry.
    pub fn environment(&self) -> Result<Environment, ShellError> {
        if self.env.is_empty() && !self.clear_env {
            Ok(Environment::Inherit)
        } else {
            Environment::from_entries(&self.env)
        }
    }
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a command through the POSIX shell.
    Sh {
        /// Command text, passed verbatim.
        #[arg(allow_hyphen_values = true)]
        command: String,
        /// Overrides.
        #[command(flatten)]
        options: RunOptions,
    },
    /// Run a command through PowerShell.
    Ps {
        /// Command text, passed verbatim.
        #[arg(allow_hyphen_values = true)]
        command: String,
        /// Overrides.
        #[command(flatten)]
        options: RunOptions,
    },
    /// Run a command through the interpreter of the current platform.
    Run {
        /// Command text (used on every platform unless --windows is given).
        #[arg(allow_hyphen_values = true)]
        command: String,
        /// Separate command to use on Windows.
        #[arg(long, value_name = "COMMAND", allow_hyphen_values = true)]
        windows: Option<String>,
        /// Overrides.
        #[command(flatten)]
        options: RunOptions,
    },
    /// Run a command as `<PROGRAM> -c <COMMAND>`.
    Exec {
        /// Shell program.
        program: String,
        /// Command text, passed verbatim.
        #[arg(allow_hyphen_values = true)]
        command: String,
    },
    /// Print the detected platform (`unix` or `windows`).
    Platform,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use crate::config::RunnerConfig;
    use crate::ports::shell::Environment;
    use clap::Parser;

    #[test]
    fn parses_sh_subcommand_with_overrides() {
        let cli = Cli::parse_from(["gosh", "sh", "echo hi", "--env", "A=1", "--dir", "/tmp"]);
        let Command::Sh { command, options } = cli.command else {
            panic!("expected sh subcommand");
        };
        assert_eq!(command, "echo hi");
        assert_eq!(options.dir.as_deref(), Some(std::path::Path::new("/tmp")));
        assert_eq!(
            options.environment().unwrap(),
            Environment::ReplaceWith(vec![("A".into(), "1".into())])
        );
    }

    #[test]
    fn no_env_flags_inherit() {
        let cli = Cli::parse_from(["gosh", "ps", "Get-Date"]);
        let Command::Ps { options, .. } = cli.command else {
            panic!("expected ps subcommand");
        };
        assert!(options.environment().unwrap().is_inherit());
    }

    #[test]
    fn clear_env_gives_empty_override() {
        let cli = Cli::parse_from(["gosh", "run", "env", "--clear-env"]);
        let Command::Run { options, windows, .. } = cli.command else {
            panic!("expected run subcommand");
        };
        assert!(windows.is_none());
        assert_eq!(options.environment().unwrap(), Environment::empty());
    }

    #[test]
    fn parses_run_with_windows_variant() {
        let cli = Cli::parse_from(["gosh", "run", "ls", "--windows", "dir"]);
        assert!(matches!(cli.command, Command::Run { windows: Some(ref w), .. } if w == "dir"));
    }

    #[test]
    fn global_program_flags_override_config() {
        let cli = Cli::parse_from(["gosh", "platform", "--posix-shell", "dash"]);
        assert!(matches!(cli.command, Command::Platform));
        let config = cli.runner_config(RunnerConfig::default());
        assert_eq!(config.posix_program, "dash");
        assert_eq!(config.powershell_program, "powershell.exe");
    }
}
