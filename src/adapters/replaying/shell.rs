//! Replaying adapter for the `ShellExecutor` port.

use std::sync::Mutex;

use super::{next_interaction, replay_result};
use crate::cassette::format::RecordedError;
use crate::cassette::replayer::CassetteReplayer;
use crate::error::ShellError;
use crate::ports::shell::{Invocation, ShellExecutor, ShellOutput};

/// Replays recorded shell command results from a cassette.
///
/// Each call must match the recorded invocation exactly (interpreter,
/// command, environment and directory); a divergent call panics rather than
/// being served another command's output.
pub struct ReplayingShellExecutor {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingShellExecutor {
    /// Creates a new replaying shell executor from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl ShellExecutor for ReplayingShellExecutor {
    fn execute(&self, invocation: &Invocation) -> Result<ShellOutput, ShellError> {
        let interaction = next_interaction(&self.replayer, "shell", "execute");
        let seq = interaction.seq;

        let recorded: Invocation = serde_json::from_value(interaction.input).unwrap_or_else(|e| {
            panic!("Cassette mismatch: shell::execute seq={seq} has an unreadable invocation: {e}")
        });
        assert!(
            recorded == *invocation,
            "Cassette mismatch: shell::execute seq={seq} was recorded for {recorded:?} \
             but replayed for {invocation:?}"
        );

        replay_result(interaction.output, "shell::execute").map_err(|error: RecordedError| {
            ShellError::Spawn {
                program: invocation.interpreter.program.clone(),
                source: error.into_io_error(),
            }
        })
    }
}
