//! Replaying adapters that serve recorded interactions.

pub mod clock;
pub mod filesystem;
pub mod id_gen;
pub mod imagery;

pub use clock::ReplayingClock;
pub use filesystem::ReplayingFileSystem;
pub use id_gen::ReplayingIdGenerator;
pub use imagery::ReplayingImageryService;

use std::sync::Mutex;

use serde::de::DeserializeOwned;

use crate::cassette::replayer::CassetteReplayer;

/// Takes the recorded output of the next `port::method` call.
///
/// Mirror of `recording::record_interaction`.
pub(crate) fn next_output(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> serde_json::Value {
    let mut replayer = replayer.lock().expect("replayer lock poisoned");
    replayer.next_interaction(port, method).output
}

/// Decodes an output stored with the Ok/Err convention.
///
/// Mirror of `recording::record_result`. A recorded `Err` comes back as its
/// message; a malformed output is reported the same way.
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: serde_json::Value,
    context: &str,
) -> Result<T, String> {
    if let Some(err) = output.get("Err") {
        return Err(err.as_str().unwrap_or("unknown error").to_string());
    }
    let Some(ok) = output.get("Ok") else {
        return Err(format!("{context}: recorded output has neither Ok nor Err"));
    };
    serde_json::from_value(ok.clone())
        .map_err(|e| format!("{context}: failed to deserialize: {e}"))
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::Utc;

    use crate::cassette::format::{Cassette, Interaction};
    use crate::cassette::replayer::CassetteReplayer;

    /// Builds a replayer whose interactions all belong to `port`.
    pub fn replayer(port: &str, calls: Vec<(&str, serde_json::Value)>) -> CassetteReplayer {
        let interactions = calls
            .into_iter()
            .enumerate()
            .map(|(seq, (method, output))| Interaction {
                seq: seq as u64,
                port: port.into(),
                method: method.into(),
                input: serde_json::Value::Null,
                output,
            })
            .collect();
        CassetteReplayer::new(&Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            tool_version: "test".into(),
            interactions,
        })
    }
}
