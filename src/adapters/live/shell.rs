//! Live shell executor using `std::process::Command`.

use std::path::PathBuf;
use std::process::Command;

use tracing::{debug, warn};

use crate::error::ShellError;
use crate::ports::shell::{Completion, Environment, Invocation, ShellExecutor, ShellOutput};

/// Live shell executor that spawns the interpreter as a child process.
pub struct LiveShellExecutor;

impl ShellExecutor for LiveShellExecutor {
    fn execute(&self, invocation: &Invocation) -> Result<ShellOutput, ShellError> {
        let interpreter = &invocation.interpreter;
        let program = resolve_program(&interpreter.program);

        let mut cmd = Command::new(&program);
        cmd.args(interpreter.args(&invocation.command));
        if let Environment::ReplaceWith(vars) = &invocation.environment {
            cmd.env_clear();
            cmd.envs(vars.iter().map(|(key, value)| (key, value)));
        }
        if let Some(dir) = &invocation.working_dir {
            cmd.current_dir(dir);
        }

        debug!(
            program = %program.display(),
            command = %invocation.command,
            dir = ?invocation.working_dir,
            replace_env = !invocation.environment.is_inherit(),
            "spawning interpreter"
        );
        let output = cmd.output().map_err(|source| {
            warn!(program = %interpreter.program, error = %source, "failed to spawn interpreter");
            ShellError::Spawn { program: interpreter.program.clone(), source }
        })?;

        let completion = Completion::from(output.status);
        debug!(%completion, stdout_len = output.stdout.len(), stderr_len = output.stderr.len(), "interpreter finished");
        Ok(ShellOutput { completion, stdout: output.stdout, stderr: output.stderr })
    }
}

/// Looks the program up on the caller's `PATH`, so a replaced environment
/// without `PATH` still finds the interpreter.
fn resolve_program(program: &str) -> PathBuf {
    which::which(program).unwrap_or_else(|_| PathBuf::from(program))
}
