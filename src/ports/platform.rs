//! Platform port for identifying the host operating system.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::RunnerConfig;
use crate::ports::shell::Interpreter;

/// Operating-system family that decides which interpreter to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    /// Windows hosts run commands through PowerShell.
    Windows,
    /// Every other host runs commands through a POSIX shell.
    Unix,
}

impl Platform {
    /// Classifies an OS identifier such as [`std::env::consts::OS`].
    #[must_use]
    pub fn from_os(os: &str) -> Self {
        if os == "windows" { Self::Windows } else { Self::Unix }
    }

    /// The interpreter this platform uses, with programs taken from `config`.
    #[must_use]
    pub fn interpreter(self, config: &RunnerConfig) -> Interpreter {
        match self {
            Self::Windows => Interpreter::powershell(&config.powershell_program),
            Self::Unix => Interpreter::posix(&config.posix_program),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Windows => f.write_str("windows"),
            Self::Unix => f.write_str("unix"),
        }
    }
}

/// Reports the platform commands should be dispatched for.
///
/// Abstracting the host check lets tests and cassette playback pretend to be
/// on a different operating system.
pub trait PlatformProbe: Send + Sync {
    /// Returns the platform at the time of the call.
    fn current(&self) -> Platform;
}

/// A fixed platform value is its own probe.
impl PlatformProbe for Platform {
    fn current(&self) -> Platform {
        *self
    }
}
