//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the runner and the host system
//! (process spawning, platform detection). Implementations live in
//! `src/adapters/`.

pub mod platform;
pub mod shell;

pub use platform::{Platform, PlatformProbe};
pub use shell::{
    Completion, Environment, Interpreter, Invocation, ShellExecutor, ShellKind, ShellOutput,
};
