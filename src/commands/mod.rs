//! Command dispatch and handlers.

use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::cassette::config::CassetteConfig;
use crate::cassette::session::RecordingSession;
use crate::cli::{Cli, Command, RunOptions};
use crate::config::RunnerConfig;
use crate::context::ServiceContext;
use crate::error::ShellError;
use crate::ports::shell::{Interpreter, Invocation, ShellOutput};
use crate::report::Reporter;
use crate::runner::{PlatformCommand, Runner};

/// Records every port interaction into a session directory under this path.
pub const RECORD_VAR: &str = "GOSH_RECORD";
/// Replays a cassette file or session directory instead of spawning processes.
pub const REPLAY_VAR: &str = "GOSH_REPLAY";

/// Dispatch a parsed command to its handler.
///
/// When `GOSH_REPLAY` is set, ports are served from the cassette(s) at that
/// path. Otherwise, when `GOSH_RECORD` is set to a directory path, all port
/// interactions are recorded to per-port cassette files below it.
///
/// # Errors
///
/// Returns an error string if the context cannot be set up, the command
/// line is invalid or output cannot be written.
pub fn dispatch(cli: &Cli) -> Result<ExitCode, String> {
    let config = cli.runner_config(RunnerConfig::from_env_and_dotenv(Path::new(".env")));

    let (ctx, session) = if let Ok(path) = env::var(REPLAY_VAR) {
        (replaying_context(Path::new(&path))?, None)
    } else if let Ok(dir) = env::var(RECORD_VAR) {
        let (ctx, session) = ServiceContext::recording_at(&PathBuf::from(dir), &config)?;
        (ctx, Some(session))
    } else {
        (ServiceContext::live(), None)
    };

    let runner = Runner::new(ctx, config);
    let result = dispatch_with_runner(&cli.command, &runner);

    // Finish recording after command completes (even on error)
    if let Some(session) = session {
        // Drop the runner first to release Arc references
        drop(runner);
        finish_recording(session)?;
    }

    result
}

/// A session directory replays per port; anything else is a monolithic file.
fn replaying_context(path: &Path) -> Result<ServiceContext, String> {
    if path.is_dir() {
        ServiceContext::replaying_from(&CassetteConfig::from_session_dir(path))
    } else {
        ServiceContext::replaying(path)
    }
}

/// Dispatch a command with the given runner, printing its output.
fn dispatch_with_runner(command: &Command, runner: &Runner) -> Result<ExitCode, String> {
    let result = match command {
        Command::Sh { command, options } => {
            run_with_options(runner, runner.posix(), command, options)
        }
        Command::Ps { command, options } => {
            run_with_options(runner, runner.powershell(), command, options)
        }
        Command::Run { command, windows, options } => {
            let commands = match windows {
                Some(windows) => PlatformCommand::split(command, windows),
                None => PlatformCommand::same(command),
            };
            options
                .environment()
                .and_then(|env| runner.dispatch(&commands, env, options.dir.as_deref()))
        }
        Command::Exec { program, command } => runner.exec(program, command),
        Command::Platform => {
            println!("{}", runner.platform());
            return Ok(ExitCode::SUCCESS);
        }
    };

    let code = exit_code(&result);
    Reporter::stdio().report(result).map_err(|e| format!("Failed to write output: {e}"))?;
    Ok(code)
}

fn run_with_options(
    runner: &Runner,
    interpreter: Interpreter,
    command: &str,
    options: &RunOptions,
) -> Result<ShellOutput, ShellError> {
    let mut invocation =
        Invocation::new(interpreter, command).with_environment(options.environment()?);
    invocation.working_dir.clone_from(&options.dir);
    runner.execute(&invocation)
}

/// Mirror the child's exit status where it fits in a process exit code.
fn exit_code(result: &Result<ShellOutput, ShellError>) -> ExitCode {
    match result {
        Ok(output) if output.success() => ExitCode::SUCCESS,
        Ok(output) => output
            .completion
            .code()
            .and_then(|code| u8::try_from(code).ok())
            .filter(|&code| code != 0)
            .map_or(ExitCode::FAILURE, ExitCode::from),
        Err(_) => ExitCode::FAILURE,
    }
}

/// Finish a recording session and print the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output_dir = session.finish()?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}
