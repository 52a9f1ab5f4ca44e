//! Service context bundling the port trait objects.

use std::path::Path;

use crate::adapters::live::{LivePlatform, LiveShellExecutor};
use crate::adapters::recording::{RecordingPlatform, RecordingShellExecutor};
use crate::adapters::replaying::{ReplayingPlatform, ReplayingShellExecutor};
use crate::cassette::config::CassetteConfig;
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::config::RunnerConfig;
use crate::error::ShellError;
use crate::ports::platform::{Platform, PlatformProbe};
use crate::ports::shell::{Interpreter, Invocation, ShellExecutor, ShellOutput};

/// Bundles the port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, replaying, recording).
pub struct ServiceContext {
    /// Shell executor for running commands.
    pub shell: Box<dyn ShellExecutor>,
    /// Probe deciding which interpreter platform-dispatched commands use.
    pub platform: Box<dyn PlatformProbe>,
}

impl ServiceContext {
    /// Creates a live context that spawns real processes on the host platform.
    #[must_use]
    pub fn live() -> Self {
        Self { shell: Box::new(LiveShellExecutor), platform: Box::new(LivePlatform) }
    }

    /// Replaces the platform probe, e.g. with a fixed [`Platform`].
    #[must_use]
    pub fn with_platform(mut self, probe: impl PlatformProbe + 'static) -> Self {
        self.platform = Box::new(probe);
        self
    }

    /// Replaces the shell executor.
    #[must_use]
    pub fn with_shell(mut self, shell: impl ShellExecutor + 'static) -> Self {
        self.shell = Box::new(shell);
        self
    }

    /// Creates a recording context over live adapters.
    ///
    /// Every interaction is captured into per-port cassettes inside a
    /// timestamped directory under `base`. The session's git commit lookup
    /// runs through `config`'s POSIX program. Drop the context before calling
    /// [`RecordingSession::finish`].
    ///
    /// # Errors
    ///
    /// Returns an error if the session directory cannot be created.
    pub fn recording_at(
        base: &Path,
        config: &RunnerConfig,
    ) -> Result<(Self, RecordingSession), String> {
        let session = RecordingSession::new_in(base, &Interpreter::posix(&config.posix_program))?;
        let ctx = Self::live().recorded_into(&session);
        Ok((ctx, session))
    }

    /// Wraps this context's adapters so their interactions go into `session`.
    #[must_use]
    pub fn recorded_into(self, session: &RecordingSession) -> Self {
        Self {
            shell: Box::new(RecordingShellExecutor::new(self.shell, session.shell.clone())),
            platform: Box::new(RecordingPlatform::new(self.platform, session.platform.clone())),
        }
    }

    /// Creates a replaying context from a monolithic cassette file.
    ///
    /// All ports are served by a single cassette — each port/method pair
    /// is dispatched to the right interaction stream automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let cassette = Cassette::load(path)?;

        // Each port gets its own replayer from the same cassette so that
        // per-port cursors are independent.
        Ok(Self {
            shell: Box::new(ReplayingShellExecutor::new(CassetteReplayer::new(&cassette))),
            platform: Box::new(ReplayingPlatform::new(CassetteReplayer::new(&cassette))),
        })
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// Ports without a configured cassette file will use a panicking adapter
    /// that fails with a clear message when called.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, String> {
        let replayers = config.load_all()?;

        Ok(Self {
            shell: match replayers.shell {
                Some(r) => Box::new(ReplayingShellExecutor::new(r)),
                None => Box::new(PanickingShellExecutor),
            },
            platform: match replayers.platform {
                Some(r) => Box::new(ReplayingPlatform::new(r)),
                None => Box::new(PanickingPlatform),
            },
        })
    }
}

// --- Panicking adapters for unspecified ports ---

struct PanickingShellExecutor;
impl ShellExecutor for PanickingShellExecutor {
    fn execute(&self, _invocation: &Invocation) -> Result<ShellOutput, ShellError> {
        panic!(
            "ShellExecutor port not configured in CassetteConfig — no cassette loaded for shell"
        );
    }
}

struct PanickingPlatform;
impl PlatformProbe for PanickingPlatform {
    fn current(&self) -> Platform {
        panic!(
            "PlatformProbe port not configured in CassetteConfig — no cassette loaded for platform"
        );
    }
}
