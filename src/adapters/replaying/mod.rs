//! Replaying adapters that replay recorded interactions.

pub mod platform;
pub mod shell;

pub use platform::ReplayingPlatform;
pub use shell::ReplayingShellExecutor;

use std::sync::Mutex;

use serde::de::DeserializeOwned;

use crate::cassette::format::Interaction;
use crate::cassette::replayer::CassetteReplayer;

/// Take the next recorded interaction for a port/method pair.
pub(crate) fn next_interaction(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> Interaction {
    let mut replayer = replayer.lock().expect("replayer lock poisoned");
    replayer.next_interaction(port, method).clone()
}

/// Decode an output written by `recording::record_result`.
///
/// `{"Err": e}` is deserialized into `E`; `{"Ok": v}` (or a bare value) is
/// deserialized into `T`.
///
/// # Panics
///
/// Panics if the recorded value does not deserialize into `T` or `E`.
pub(crate) fn replay_result<T, E>(output: serde_json::Value, context: &str) -> Result<T, E>
where
    T: DeserializeOwned,
    E: DeserializeOwned,
{
    if let Some(err) = output.get("Err") {
        return Err(serde_json::from_value(err.clone())
            .unwrap_or_else(|e| panic!("{context}: failed to deserialize recorded error: {e}")));
    }
    let value = output.get("Ok").cloned().unwrap_or(output);
    Ok(serde_json::from_value(value)
        .unwrap_or_else(|e| panic!("{context}: failed to deserialize recorded output: {e}")))
}
