//! Shell executor port for running interpreter processes.

use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;
use std::process::ExitStatus;

use serde::{Deserialize, Serialize};

use crate::error::ShellError;

/// Interpreter family used to run a command string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShellKind {
    /// Unix-family shell, invoked as `<program> -c <command>`.
    Posix,
    /// Windows PowerShell, invoked as `<program> <command>`.
    PowerShell,
}

/// An interpreter program together with the way it takes a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interpreter {
    /// How the command string is handed to the program.
    pub kind: ShellKind,
    /// Program name or path, resolved on `PATH` when spawned.
    pub program: String,
}

impl Interpreter {
    /// Creates a POSIX-style interpreter using the given program.
    pub fn posix(program: impl Into<String>) -> Self {
        Self { kind: ShellKind::Posix, program: program.into() }
    }

    /// Creates a PowerShell interpreter using the given program.
    pub fn powershell(program: impl Into<String>) -> Self {
        Self { kind: ShellKind::PowerShell, program: program.into() }
    }

    /// Arguments passed to the program for `command`. The command is never
    /// quoted or escaped.
    #[must_use]
    pub fn args<'a>(&self, command: &'a str) -> Vec<&'a str> {
        match self.kind {
            ShellKind::Posix => vec!["-c", command],
            ShellKind::PowerShell => vec![command],
        }
    }
}

/// Environment handed to the child process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// The child inherits the caller's environment.
    #[default]
    Inherit,
    /// The child sees exactly these variables and nothing else.
    ReplaceWith(Vec<(String, String)>),
}

impl Environment {
    /// An override with no variables at all.
    #[must_use]
    pub fn empty() -> Self {
        Self::ReplaceWith(Vec::new())
    }

    /// Builds a replacement environment from `KEY=VALUE` entries.
    ///
    /// The separator is the first `=` after the first character, so
    /// Windows-style hidden entries such as `=C:=C:\` keep their leading `=`.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::InvalidEnvEntry`] for an entry without a separator.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, ShellError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        entries
            .into_iter()
            .map(|entry| parse_entry(entry.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map(Self::ReplaceWith)
    }

    /// Returns `true` when no override is applied.
    #[must_use]
    pub fn is_inherit(&self) -> bool {
        matches!(self, Self::Inherit)
    }
}

fn parse_entry(entry: &str) -> Result<(String, String), ShellError> {
    let split = entry.char_indices().skip(1).find(|&(_, c)| c == '=').map(|(i, _)| i);
    match split {
        Some(i) => Ok((entry[..i].to_string(), entry[i + 1..].to_string())),
        None => Err(ShellError::InvalidEnvEntry(entry.to_string())),
    }
}

/// A single request to run a command through an interpreter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    /// Interpreter that receives the command.
    pub interpreter: Interpreter,
    /// Command text, passed through verbatim.
    pub command: String,
    /// Environment for the child.
    pub environment: Environment,
    /// Working directory; `None` keeps the caller's.
    pub working_dir: Option<PathBuf>,
}

impl Invocation {
    /// Creates an invocation that inherits environment and directory.
    pub fn new(interpreter: Interpreter, command: impl Into<String>) -> Self {
        Self {
            interpreter,
            command: command.into(),
            environment: Environment::Inherit,
            working_dir: None,
        }
    }

    /// Sets the child's environment.
    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Runs the child in `dir` instead of the caller's directory.
    #[must_use]
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

/// How a spawned interpreter finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Completion {
    /// Exit status zero.
    Succeeded,
    /// Non-zero exit status.
    ExitedWithCode(i32),
    /// Killed before it could exit (no exit code available).
    Terminated,
}

impl Completion {
    /// Returns `true` for [`Completion::Succeeded`].
    #[must_use]
    pub fn success(self) -> bool {
        self == Self::Succeeded
    }

    /// Exit code, if the process exited on its own.
    #[must_use]
    pub fn code(self) -> Option<i32> {
        match self {
            Self::Succeeded => Some(0),
            Self::ExitedWithCode(code) => Some(code),
            Self::Terminated => None,
        }
    }
}

impl From<ExitStatus> for Completion {
    fn from(status: ExitStatus) -> Self {
        match status.code() {
            _ if status.success() => Self::Succeeded,
            Some(code) => Self::ExitedWithCode(code),
            None => Self::Terminated,
        }
    }
}

impl fmt::Display for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Succeeded => f.write_str("succeeded"),
            Self::ExitedWithCode(code) => write!(f, "exited with code {code}"),
            Self::Terminated => f.write_str("was terminated by a signal"),
        }
    }
}

/// Captured result of a command that was spawned and waited on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellOutput {
    /// How the process finished.
    pub completion: Completion,
    /// Everything the process wrote to standard output.
    #[serde(with = "lossy_text")]
    pub stdout: Vec<u8>,
    /// Everything the process wrote to standard error.
    #[serde(with = "lossy_text")]
    pub stderr: Vec<u8>,
}

impl ShellOutput {
    /// Returns `true` when the command exited with status zero.
    #[must_use]
    pub fn success(&self) -> bool {
        self.completion.success()
    }

    /// Standard output decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn stdout_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }

    /// Standard error decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn stderr_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stderr)
    }

    /// Converts a non-success completion into [`ShellError::Unsuccessful`].
    ///
    /// # Errors
    ///
    /// Returns an error unless the command succeeded.
    pub fn check(self) -> Result<Self, ShellError> {
        if self.success() {
            Ok(self)
        } else {
            Err(ShellError::Unsuccessful {
                completion: self.completion,
                stderr: self.stderr_text().into_owned(),
            })
        }
    }
}

/// Cassettes store captured output as text.
mod lossy_text {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&String::from_utf8_lossy(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        String::deserialize(deserializer).map(String::into_bytes)
    }
}

/// Spawns an interpreter for an [`Invocation`] and captures its output.
///
/// Abstracting process execution allows deterministic replay by recording
/// and replaying command outputs during cassette playback.
pub trait ShellExecutor: Send + Sync {
    /// Runs the invocation to completion.
    ///
    /// A command that exits non-zero is still `Ok`; inspect
    /// [`ShellOutput::completion`].
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Spawn`] if the interpreter cannot be started.
    fn execute(&self, invocation: &Invocation) -> Result<ShellOutput, ShellError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posix_interpreter_uses_dash_c() {
        let sh = Interpreter::posix("bash");
        assert_eq!(sh.args("echo hi"), vec!["-c", "echo hi"]);
    }

    #[test]
    fn powershell_takes_command_as_single_argument() {
        let ps = Interpreter::powershell("powershell.exe");
        assert_eq!(ps.args("Write-Output 'a b'"), vec!["Write-Output 'a b'"]);
    }

    #[test]
    fn environment_entries_split_on_first_equals() {
        let env = Environment::from_entries(["A=1", "B=x=y", "EMPTY="]).unwrap();
        assert_eq!(
            env,
            Environment::ReplaceWith(vec![
                ("A".into(), "1".into()),
                ("B".into(), "x=y".into()),
                ("EMPTY".into(), String::new()),
            ])
        );
    }

    #[test]
    fn environment_keeps_leading_equals_in_key() {
        let env = Environment::from_entries(["=C:=C:\\work"]).unwrap();
        assert_eq!(env, Environment::ReplaceWith(vec![("=C:".into(), "C:\\work".into())]));
    }

    #[test]
    fn environment_rejects_entry_without_separator() {
        let err = Environment::from_entries(["PATH"]).unwrap_err();
        assert!(matches!(err, ShellError::InvalidEnvEntry(entry) if entry == "PATH"));
    }

    #[test]
    fn empty_override_is_not_inherit() {
        assert!(Environment::default().is_inherit());
        assert!(!Environment::empty().is_inherit());
        assert_eq!(Environment::from_entries(Vec::<String>::new()).unwrap(), Environment::empty());
    }

    #[test]
    fn check_turns_exit_code_into_error() {
        let output = ShellOutput {
            completion: Completion::ExitedWithCode(2),
            stdout: Vec::new(),
            stderr: b"boom\n".to_vec(),
        };
        let err = output.check().unwrap_err();
        assert!(matches!(
            err,
            ShellError::Unsuccessful { completion: Completion::ExitedWithCode(2), ref stderr }
                if stderr == "boom\n"
        ));
    }

    #[test]
    fn completion_codes() {
        assert_eq!(Completion::Succeeded.code(), Some(0));
        assert_eq!(Completion::ExitedWithCode(7).code(), Some(7));
        assert_eq!(Completion::Terminated.code(), None);
        assert_eq!(Completion::Terminated.to_string(), "was terminated by a signal");
    }

    #[test]
    fn output_serializes_bytes_as_text() {
        let output = ShellOutput {
            completion: Completion::Succeeded,
            stdout: b"hello\n".to_vec(),
            stderr: Vec::new(),
        };
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["stdout"], "hello\n");
        assert_eq!(value["completion"], "succeeded");
        let back: ShellOutput = serde_json::from_value(value).unwrap();
        assert_eq!(back, output);
    }
}
