//! Cassette data structures for recording and replaying port interactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded call on a port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Sequence number within the cassette (assigned by the recorder).
    pub seq: u64,
    /// Port name (`imagery`, `fs`, `clock`, `id_gen`).
    pub port: String,
    /// Method invoked on the port.
    pub method: String,
    /// Arguments of the call.
    pub input: serde_json::Value,
    /// Returned value. Fallible calls use `{"Ok": v}` / `{"Err": msg}`.
    pub output: serde_json::Value,
}

/// An ordered set of interactions captured during one run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name.
    pub name: String,
    /// When the recording finished.
    pub recorded_at: DateTime<Utc>,
    /// Version of the tool that produced the recording.
    pub tool_version: String,
    /// Interactions in call order.
    pub interactions: Vec<Interaction>,
}
