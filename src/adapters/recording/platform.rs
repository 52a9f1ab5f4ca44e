//! Recording adapter for the `PlatformProbe` port.

use std::sync::{Arc, Mutex};

use super::record_interaction;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::platform::{Platform, PlatformProbe};

/// Records platform lookups while delegating to an inner probe.
pub struct RecordingPlatform {
    inner: Box<dyn PlatformProbe>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingPlatform {
    /// Creates a new recording probe wrapping the given implementation.
    pub fn new(inner: Box<dyn PlatformProbe>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl PlatformProbe for RecordingPlatform {
    fn current(&self) -> Platform {
        let platform = self.inner.current();
        record_interaction(&self.recorder, "platform", "current", &serde_json::json!({}), &platform);
        platform
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Cassette;
    use serde_json::json;

    #[test]
    fn records_current_platform() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("platform.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&path, "test", "abc")));

        {
            let probe = RecordingPlatform::new(Box::new(Platform::Windows), Arc::clone(&recorder));
            assert_eq!(probe.current(), Platform::Windows);
        }

        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        recorder.finish().unwrap();

        let cassette = Cassette::load(&path).unwrap();
        assert_eq!(cassette.interactions.len(), 1);
        assert_eq!(cassette.interactions[0].method, "current");
        assert_eq!(cassette.interactions[0].output, json!("windows"));
    }
}
