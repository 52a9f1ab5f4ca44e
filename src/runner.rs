//! Command runner: interpreter selection and output capture.
//!
//! Every operation builds an [`Invocation`] and hands it to the context's
//! [`ShellExecutor`]. Explicit-shell operations always use the named
//! interpreter; platform-dispatched operations ask the context's
//! [`PlatformProbe`](crate::ports::PlatformProbe) on every call and pick
//! PowerShell on Windows, the POSIX shell everywhere else.

use std::path::Path;

use tracing::debug;

use crate::config::RunnerConfig;
use crate::context::ServiceContext;
use crate::error::ShellError;
use crate::ports::platform::Platform;
use crate::ports::shell::{Environment, Interpreter, Invocation, ShellOutput};

/// One command per platform family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformCommand {
    /// Command for the POSIX shell.
    pub unix: String,
    /// Command for PowerShell.
    pub windows: String,
}

impl PlatformCommand {
    /// Uses the same command text on every platform.
    pub fn same(command: impl Into<String>) -> Self {
        let command = command.into();
        Self { unix: command.clone(), windows: command }
    }

    /// Uses a different command on Unix and Windows.
    pub fn split(unix: impl Into<String>, windows: impl Into<String>) -> Self {
        Self { unix: unix.into(), windows: windows.into() }
    }

    /// The command text for `platform`.
    #[must_use]
    pub fn for_platform(&self, platform: Platform) -> &str {
        match platform {
            Platform::Windows => &self.windows,
            Platform::Unix => &self.unix,
        }
    }
}

/// Runs commands through the ports of a [`ServiceContext`].
///
/// All operations block until the child exits and return its captured
/// output. A spawn failure is `Err`; a non-zero exit is `Ok` with a
/// non-success [`Completion`](crate::ports::Completion).
pub struct Runner {
    ctx: ServiceContext,
    config: RunnerConfig,
}

impl Runner {
    /// Creates a runner over the given context and interpreter programs.
    #[must_use]
    pub fn new(ctx: ServiceContext, config: RunnerConfig) -> Self {
        Self { ctx, config }
    }

    /// Creates a runner that spawns real processes with default programs.
    #[must_use]
    pub fn live() -> Self {
        Self::new(ServiceContext::live(), RunnerConfig::default())
    }

    /// Interpreter programs in use.
    #[must_use]
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Releases the underlying context, e.g. to finish a recording session.
    #[must_use]
    pub fn into_context(self) -> ServiceContext {
        self.ctx
    }

    /// The configured POSIX shell.
    #[must_use]
    pub fn posix(&self) -> Interpreter {
        Interpreter::posix(&self.config.posix_program)
    }

    /// The configured PowerShell.
    #[must_use]
    pub fn powershell(&self) -> Interpreter {
        Interpreter::powershell(&self.config.powershell_program)
    }

    /// Platform reported by the probe right now.
    #[must_use]
    pub fn platform(&self) -> Platform {
        self.ctx.platform.current()
    }

    /// Runs a fully specified invocation.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Spawn`] if the interpreter cannot be started.
    pub fn execute(&self, invocation: &Invocation) -> Result<ShellOutput, ShellError> {
        self.ctx.shell.execute(invocation)
    }

    /// Runs `command` through the POSIX shell.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Spawn`] if the shell cannot be started.
    pub fn shell_output(
        &self,
        command: &str,
        environment: Environment,
    ) -> Result<ShellOutput, ShellError> {
        self.execute(&Invocation::new(self.posix(), command).with_environment(environment))
    }

    /// Runs `command` through the POSIX shell inside `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Spawn`] if the shell cannot be started or `dir`
    /// cannot be entered.
    pub fn shell_output_in(
        &self,
        command: &str,
        dir: impl AsRef<Path>,
    ) -> Result<ShellOutput, ShellError> {
        self.execute(&Invocation::new(self.posix(), command).in_dir(dir.as_ref()))
    }

    /// Runs `command` through PowerShell.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Spawn`] if PowerShell cannot be started.
    pub fn powershell_output(
        &self,
        command: &str,
        environment: Environment,
    ) -> Result<ShellOutput, ShellError> {
        self.execute(&Invocation::new(self.powershell(), command).with_environment(environment))
    }

    /// Runs `command` through PowerShell inside `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Spawn`] if PowerShell cannot be started or `dir`
    /// cannot be entered.
    pub fn powershell_output_in(
        &self,
        command: &str,
        dir: impl AsRef<Path>,
    ) -> Result<ShellOutput, ShellError> {
        self.execute(&Invocation::new(self.powershell(), command).in_dir(dir.as_ref()))
    }

    /// Runs `command` as `<program> -c <command>` for an arbitrary shell.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Spawn`] if `program` cannot be started.
    pub fn exec(&self, program: &str, command: &str) -> Result<ShellOutput, ShellError> {
        self.execute(&Invocation::new(Interpreter::posix(program), command))
    }

    /// Runs the same command through the platform's interpreter.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Spawn`] if the interpreter cannot be started.
    pub fn run_output(&self, command: &str) -> Result<ShellOutput, ShellError> {
        self.dispatch(&PlatformCommand::same(command), Environment::Inherit, None)
    }

    /// Runs `unix` through the POSIX shell or `windows` through PowerShell,
    /// depending on the platform.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Spawn`] if the interpreter cannot be started.
    pub fn run_multi_output(&self, unix: &str, windows: &str) -> Result<ShellOutput, ShellError> {
        self.dispatch(&PlatformCommand::split(unix, windows), Environment::Inherit, None)
    }

    /// Platform-dispatched run with optional environment and directory.
    ///
    /// The platform is queried on every call.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Spawn`] if the interpreter cannot be started.
    pub fn dispatch(
        &self,
        command: &PlatformCommand,
        environment: Environment,
        dir: Option<&Path>,
    ) -> Result<ShellOutput, ShellError> {
        let platform = self.platform();
        let interpreter = platform.interpreter(&self.config);
        debug!(%platform, program = %interpreter.program, "dispatching command");

        let mut invocation = Invocation::new(interpreter, command.for_platform(platform))
            .with_environment(environment);
        invocation.working_dir = dir.map(Path::to_path_buf);
        self.execute(&invocation)
    }
}
