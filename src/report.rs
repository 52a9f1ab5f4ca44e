//! Print mode: write captured output to sinks instead of returning it.

use std::io::{self, Stderr, Stdout, Write};

use tracing::debug;

use crate::error::ShellError;
use crate::ports::shell::{Environment, ShellOutput};
use crate::runner::{PlatformCommand, Runner};

/// Writes command results to an output sink and a diagnostics sink.
///
/// On success only stdout is written. On failure an `error: ...` marker
/// line goes to the diagnostics sink, then the captured stderr and stdout
/// are written to the output sink in that order, so a caller watching only
/// stdout still sees why the command failed. The [`ShellError`] itself is
/// consumed.
pub struct Reporter<O, E> {
    out: O,
    err: E,
}

impl Reporter<Stdout, Stderr> {
    /// Reports to the host process's own stdout and stderr.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> Reporter<O, E> {
    /// Creates a reporter writing to the given sinks.
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    /// Returns the sinks.
    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }

    /// Writes one result and returns whether the command succeeded.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to either sink fails.
    pub fn report(&mut self, result: Result<ShellOutput, ShellError>) -> io::Result<bool> {
        let output = match result {
            Ok(output) => output,
            Err(error) => {
                debug!(%error, "reporting spawn failure");
                writeln!(self.err, "error: {error}")?;
                self.err.flush()?;
                return Ok(false);
            }
        };

        let success = output.success();
        if !success {
            writeln!(self.err, "error: command {}", output.completion)?;
            self.err.flush()?;
            self.out.write_all(&output.stderr)?;
        }
        self.out.write_all(&output.stdout)?;
        self.out.flush()?;
        Ok(success)
    }

    /// Print-mode [`Runner::shell_output`].
    ///
    /// # Errors
    ///
    /// Returns an error if writing to either sink fails.
    pub fn shell_command(
        &mut self,
        runner: &Runner,
        command: &str,
        environment: Environment,
    ) -> io::Result<bool> {
        self.report(runner.shell_output(command, environment))
    }

    /// Print-mode [`Runner::powershell_output`].
    ///
    /// # Errors
    ///
    /// Returns an error if writing to either sink fails.
    pub fn powershell_command(
        &mut self,
        runner: &Runner,
        command: &str,
        environment: Environment,
    ) -> io::Result<bool> {
        self.report(runner.powershell_output(command, environment))
    }

    /// Print-mode platform dispatch of one command.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to either sink fails.
    pub fn run(
        &mut self,
        runner: &Runner,
        command: &str,
        environment: Environment,
    ) -> io::Result<bool> {
        self.report(runner.dispatch(&PlatformCommand::same(command), environment, None))
    }

    /// Print-mode platform dispatch of a command pair.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to either sink fails.
    pub fn run_multi(
        &mut self,
        runner: &Runner,
        unix: &str,
        windows: &str,
        environment: Environment,
    ) -> io::Result<bool> {
        self.report(runner.dispatch(&PlatformCommand::split(unix, windows), environment, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::shell::Completion;

    fn buffers() -> Reporter<Vec<u8>, Vec<u8>> {
        Reporter::new(Vec::new(), Vec::new())
    }

    #[test]
    fn success_writes_only_stdout() {
        let mut reporter = buffers();
        let ok = reporter
            .report(Ok(ShellOutput {
                completion: Completion::Succeeded,
                stdout: b"hello\n".to_vec(),
                stderr: b"ignored".to_vec(),
            }))
            .unwrap();
        assert!(ok);

        let (out, err) = reporter.into_inner();
        assert_eq!(out, b"hello\n");
        assert!(err.is_empty());
    }

    #[test]
    fn failure_puts_stderr_ahead_of_stdout_on_output_sink() {
        let mut reporter = buffers();
        let ok = reporter
            .report(Ok(ShellOutput {
                completion: Completion::ExitedWithCode(2),
                stdout: b"partial".to_vec(),
                stderr: b"oops\n".to_vec(),
            }))
            .unwrap();
        assert!(!ok);

        let (out, err) = reporter.into_inner();
        assert_eq!(out, b"oops\npartial");
        assert_eq!(String::from_utf8(err).unwrap(), "error: command exited with code 2\n");
    }

    #[test]
    fn spawn_failure_writes_marker_only() {
        let mut reporter = buffers();
        let ok = reporter
            .report(Err(ShellError::Spawn {
                program: "bash".into(),
                source: io::Error::new(io::ErrorKind::NotFound, "not found"),
            }))
            .unwrap();
        assert!(!ok);

        let (out, err) = reporter.into_inner();
        assert!(out.is_empty());
        assert_eq!(String::from_utf8(err).unwrap(), "error: failed to spawn `bash`: not found\n");
    }

    #[cfg(unix)]
    #[test]
    fn print_mode_over_live_runner() {
        use crate::config::RunnerConfig;
        use crate::context::ServiceContext;
        use crate::ports::Platform;

        let runner =
            Runner::new(ServiceContext::live().with_platform(Platform::Unix), RunnerConfig::default());
        let mut reporter = buffers();
        assert!(reporter.run_multi(&runner, "echo unix", "echo windows", Environment::Inherit).unwrap());
        assert!(!reporter.shell_command(&runner, "echo bad >&2; exit 1", Environment::Inherit).unwrap());

        let (out, err) = reporter.into_inner();
        assert_eq!(out, b"unix\nbad\n");
        assert_eq!(String::from_utf8(err).unwrap(), "error: command exited with code 1\n");
    }
}
