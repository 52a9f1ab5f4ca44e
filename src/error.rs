//! Error type shared by the runner and its ports.

use std::io;

use crate::ports::shell::Completion;

/// Errors produced while running a shell command.
///
/// A command that runs and exits non-zero is not an error at the executor
/// level: it comes back as a [`ShellOutput`](crate::ports::ShellOutput) with a
/// non-success [`Completion`]. Use
/// [`ShellOutput::check`](crate::ports::ShellOutput::check) to turn that into
/// [`ShellError::Unsuccessful`].
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    /// The interpreter could not be started or waited on.
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        /// Interpreter program that was being started.
        program: String,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },

    /// An environment entry was not of the form `KEY=VALUE`.
    #[error("invalid environment entry {0:?}: expected KEY=VALUE")]
    InvalidEnvEntry(String),

    /// The command ran but did not succeed.
    #[error("command {completion}")]
    Unsuccessful {
        /// How the command finished.
        completion: Completion,
        /// Captured standard error, decoded lossily.
        stderr: String,
    },
}

impl ShellError {
    /// Returns the cause of the failure without the program prefix.
    ///
    /// For spawn failures this is the OS error text; for other variants it is
    /// the full display string.
    #[must_use]
    pub fn reason(&self) -> String {
        match self {
            Self::Spawn { source, .. } => source.to_string(),
            other => other.to_string(),
        }
    }

    /// Returns `true` when the interpreter never started.
    #[must_use]
    pub fn is_spawn_failure(&self) -> bool {
        matches!(self, Self::Spawn { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_error_names_program() {
        let err = ShellError::Spawn {
            program: "bash".into(),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "failed to spawn `bash`: not found");
        assert_eq!(err.reason(), "not found");
        assert!(err.is_spawn_failure());
    }

    #[test]
    fn unsuccessful_error_shows_exit_code() {
        let err = ShellError::Unsuccessful {
            completion: Completion::ExitedWithCode(3),
            stderr: String::new(),
        };
        assert_eq!(err.to_string(), "command exited with code 3");
        assert!(!err.is_spawn_failure());
    }
}
