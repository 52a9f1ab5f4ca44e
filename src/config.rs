//! Runner configuration: which interpreter programs to spawn.

use std::collections::HashMap;
use std::env;
use std::path::Path;

use tracing::warn;

/// Environment variable overriding the POSIX shell program.
pub const POSIX_SHELL_VAR: &str = "GOSH_POSIX_SHELL";
/// Environment variable overriding the PowerShell program.
pub const POWERSHELL_VAR: &str = "GOSH_POWERSHELL";

/// Default POSIX shell program.
pub const DEFAULT_POSIX_PROGRAM: &str = "bash";
/// Default PowerShell program.
pub const DEFAULT_POWERSHELL_PROGRAM: &str = "powershell.exe";

/// Interpreter programs used by the [`Runner`](crate::runner::Runner).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Program invoked as `<program> -c <command>`.
    pub posix_program: String,
    /// Program invoked as `<program> <command>`.
    pub powershell_program: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            posix_program: DEFAULT_POSIX_PROGRAM.to_string(),
            powershell_program: DEFAULT_POWERSHELL_PROGRAM.to_string(),
        }
    }
}

impl RunnerConfig {
    /// Reads overrides from `GOSH_POSIX_SHELL` and `GOSH_POWERSHELL`.
    ///
    /// Unset or empty variables fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`RunnerConfig::from_env`], but also consults `GOSH_*` keys in the
    /// dotenv file at `path`. Process variables win over the file.
    ///
    /// The file is only read; nothing is added to the process environment,
    /// so children that inherit it never see the file's variables. A missing
    /// file is the same as an empty one.
    #[must_use]
    pub fn from_env_and_dotenv(path: &Path) -> Self {
        let file = read_dotenv_settings(path);
        Self::from_lookup(|key| env::var(key).ok().or_else(|| file.get(key).cloned()))
    }

    /// Builds a config from an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |key: &str, default: &str| {
            lookup(key).filter(|v| !v.trim().is_empty()).unwrap_or_else(|| default.to_string())
        };
        Self {
            posix_program: pick(POSIX_SHELL_VAR, DEFAULT_POSIX_PROGRAM),
            powershell_program: pick(POWERSHELL_VAR, DEFAULT_POWERSHELL_PROGRAM),
        }
    }

    /// Replaces the POSIX shell program.
    #[must_use]
    pub fn with_posix_program(mut self, program: impl Into<String>) -> Self {
        self.posix_program = program.into();
        self
    }

    /// Replaces the PowerShell program.
    #[must_use]
    pub fn with_powershell_program(mut self, program: impl Into<String>) -> Self {
        self.powershell_program = program.into();
        self
    }
}

/// Collects the `GOSH_*` entries of a dotenv file.
fn read_dotenv_settings(path: &Path) -> HashMap<String, String> {
    let Ok(entries) = dotenvy::from_path_iter(path) else {
        return HashMap::new();
    };
    entries
        .filter_map(|entry| match entry {
            Ok(pair) => Some(pair),
            Err(error) => {
                warn!(path = %path.display(), %error, "skipping unreadable dotenv entry");
                None
            }
        })
        .filter(|(key, _)| key.starts_with("GOSH_"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_programs() {
        let config = RunnerConfig::default();
        assert_eq!(config.posix_program, "bash");
        assert_eq!(config.powershell_program, "powershell.exe");
    }

    #[test]
    fn lookup_overrides_programs() {
        let config = RunnerConfig::from_lookup(|key| match key {
            POSIX_SHELL_VAR => Some("dash".into()),
            POWERSHELL_VAR => Some("pwsh".into()),
            _ => None,
        });
        assert_eq!(config.posix_program, "dash");
        assert_eq!(config.powershell_program, "pwsh");
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = RunnerConfig::from_lookup(|_| Some("  ".into()));
        assert_eq!(config, RunnerConfig::default());
    }

    #[test]
    fn dotenv_supplies_only_gosh_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "GOSH_POWERSHELL=pwsh-from-file\nUNRELATED_SECRET=1\n").unwrap();

        let settings = read_dotenv_settings(&path);
        assert_eq!(settings.get(POWERSHELL_VAR).map(String::as_str), Some("pwsh-from-file"));
        assert!(!settings.contains_key("UNRELATED_SECRET"));
        assert!(env::var_os("UNRELATED_SECRET").is_none());
    }

    #[test]
    fn missing_dotenv_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_dotenv_settings(&dir.path().join(".env")).is_empty());
    }
}
