//! Live platform probe using the compile-time OS identifier.

use crate::ports::platform::{Platform, PlatformProbe};

/// Live probe reporting the platform this binary was built for.
pub struct LivePlatform;

impl PlatformProbe for LivePlatform {
    fn current(&self) -> Platform {
        Platform::from_os(std::env::consts::OS)
    }
}
