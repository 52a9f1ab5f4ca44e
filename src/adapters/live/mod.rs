//! Live adapters that talk to the host system.

pub mod platform;
pub mod shell;

pub use platform::LivePlatform;
pub use shell::LiveShellExecutor;
