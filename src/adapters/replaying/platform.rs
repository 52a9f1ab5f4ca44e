//! Replaying adapter for the `PlatformProbe` port.

use std::sync::Mutex;

use super::next_interaction;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::platform::{Platform, PlatformProbe};

/// Replays recorded platform lookups from a cassette.
pub struct ReplayingPlatform {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingPlatform {
    /// Creates a new replaying probe from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl PlatformProbe for ReplayingPlatform {
    fn current(&self) -> Platform {
        let interaction = next_interaction(&self.replayer, "platform", "current");
        serde_json::from_value(interaction.output).expect("platform::current: failed to deserialize Platform")
    }
}
