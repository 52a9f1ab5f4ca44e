//! Cassette data structures for recording and replaying interactions.

use std::io;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ShellError;

/// A single recorded interaction with an external port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Sequence number (assigned automatically by the recorder).
    pub seq: u64,
    /// Port name (`"shell"` or `"platform"`).
    pub port: String,
    /// Method name invoked on the port.
    pub method: String,
    /// Input data sent to the port.
    pub input: serde_json::Value,
    /// Output data returned from the port.
    pub output: serde_json::Value,
}

/// A cassette containing a sequence of recorded interactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When this cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Git commit hash at recording time.
    pub commit: String,
    /// Ordered list of interactions.
    pub interactions: Vec<Interaction>,
}

impl Cassette {
    /// Reads and parses a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid cassette.
    pub fn load(path: &std::path::Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))
    }
}

/// A shell port failure as stored in a cassette.
///
/// Replay rebuilds the error around the replayed invocation's program, so
/// only the I/O cause is kept: its [`io::ErrorKind`] by name and its message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordedError {
    /// `Debug` name of the [`io::ErrorKind`], e.g. `NotFound`.
    pub kind: String,
    /// The cause's display text.
    pub message: String,
}

impl RecordedError {
    /// Captures the cause of a shell port failure.
    #[must_use]
    pub fn from_error(error: &ShellError) -> Self {
        let kind = match error {
            ShellError::Spawn { source, .. } => source.kind(),
            _ => io::ErrorKind::Other,
        };
        Self { kind: format!("{kind:?}"), message: error.reason() }
    }

    /// Rebuilds the I/O error, keeping its kind where the name is known.
    #[must_use]
    pub fn into_io_error(self) -> io::Error {
        io::Error::new(error_kind(&self.kind), self.message)
    }
}

fn error_kind(name: &str) -> io::ErrorKind {
    use io::ErrorKind::{
        AddrInUse, AddrNotAvailable, AlreadyExists, BrokenPipe, ConnectionAborted,
        ConnectionRefused, ConnectionReset, Interrupted, InvalidData, InvalidInput, NotConnected,
        NotFound, Other, OutOfMemory, PermissionDenied, TimedOut, UnexpectedEof, Unsupported,
        WouldBlock, WriteZero,
    };
    [
        NotFound,
        PermissionDenied,
        AlreadyExists,
        InvalidInput,
        InvalidData,
        TimedOut,
        Interrupted,
        Unsupported,
        OutOfMemory,
        BrokenPipe,
        WouldBlock,
        UnexpectedEof,
        WriteZero,
        AddrInUse,
        AddrNotAvailable,
        ConnectionRefused,
        ConnectionReset,
        ConnectionAborted,
        NotConnected,
    ]
    .into_iter()
    .find(|kind| format!("{kind:?}") == name)
    .unwrap_or(Other)
}
