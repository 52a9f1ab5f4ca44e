//! Recording adapter for the `ShellExecutor` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::format::RecordedError;
use crate::cassette::recorder::CassetteRecorder;
use crate::error::ShellError;
use crate::ports::shell::{Invocation, ShellExecutor, ShellOutput};

/// Records shell interactions while delegating to an inner implementation.
pub struct RecordingShellExecutor {
    inner: Box<dyn ShellExecutor>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingShellExecutor {
    /// Creates a new recording shell executor wrapping the given implementation.
    pub fn new(inner: Box<dyn ShellExecutor>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl ShellExecutor for RecordingShellExecutor {
    fn execute(&self, invocation: &Invocation) -> Result<ShellOutput, ShellError> {
        let result = self.inner.execute(invocation);
        let recorded = result.as_ref().map_err(RecordedError::from_error);
        record_result(&self.recorder, "shell", "execute", invocation, &recorded);
        result
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::adapters::live::shell::LiveShellExecutor;
    use crate::cassette::format::Cassette;
    use crate::ports::shell::Interpreter;

    #[test]
    fn records_execute_interaction() {
        let dir = tempfile::tempdir().unwrap();
        let cassette_path = dir.path().join("shell.cassette.yaml");

        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&cassette_path, "test", "abc")));

        // Scope the adapter so it's dropped before we try to unwrap
        {
            let shell =
                RecordingShellExecutor::new(Box::new(LiveShellExecutor), Arc::clone(&recorder));
            let ok = shell.execute(&Invocation::new(Interpreter::posix("bash"), "echo hello"));
            assert!(ok.is_ok());
            let missing =
                shell.execute(&Invocation::new(Interpreter::posix("gosh-no-such-shell"), "true"));
            assert!(missing.is_err());
        }

        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        recorder.finish().unwrap();

        let cassette = Cassette::load(&cassette_path).unwrap();
        assert_eq!(cassette.interactions.len(), 2);

        let first = &cassette.interactions[0];
        assert_eq!(first.port, "shell");
        assert_eq!(first.method, "execute");
        assert_eq!(first.input["command"], "echo hello");
        assert_eq!(first.output["Ok"]["stdout"], "hello\n");
        assert_eq!(first.output["Ok"]["completion"], "succeeded");

        let second = &cassette.interactions[1];
        assert_eq!(second.input["interpreter"]["program"], "gosh-no-such-shell");
        assert_eq!(second.output["Err"]["kind"], "NotFound");
        assert!(!second.output["Err"]["message"].as_str().unwrap().contains("failed to spawn"));
    }
}
