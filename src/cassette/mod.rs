//! Cassettes: recorded port interactions replayed for deterministic runs.

pub mod config;
pub mod format;
pub mod recorder;
pub mod replayer;
pub mod session;
