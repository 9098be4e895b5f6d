//! Runtime settings read from the environment.

use std::env;
use std::path::PathBuf;

/// Default location of the service-account key.
pub const DEFAULT_KEY_FILE: &str = "ee-key.json";

/// Default Earth Engine REST endpoint.
pub const DEFAULT_API_BASE: &str = "https://earthengine.googleapis.com/v1";

/// Settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Path of the service-account JSON key (`NDVI_KEY_FILE`).
    pub key_file: PathBuf,
    /// Service-account email (`NDVI_SERVICE_ACCOUNT`); defaults to the key's `client_email`.
    pub service_account: Option<String>,
    /// Cloud project billed for requests (`NDVI_PROJECT`); defaults to the key's `project_id`.
    pub project: Option<String>,
    /// REST base URL without trailing slash (`NDVI_API_BASE`).
    pub api_base: String,
    /// Directory to record cassettes into (`NDVI_RECORD`).
    pub record_dir: Option<PathBuf>,
    /// Directory to replay cassettes from (`NDVI_REPLAY`).
    pub replay_dir: Option<PathBuf>,
}

impl Settings {
    /// Reads settings from process environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads settings through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            key_file: non_empty("NDVI_KEY_FILE")
                .map_or_else(|| PathBuf::from(DEFAULT_KEY_FILE), PathBuf::from),
            service_account: non_empty("NDVI_SERVICE_ACCOUNT"),
            project: non_empty("NDVI_PROJECT"),
            api_base: non_empty("NDVI_API_BASE").map_or_else(
                || DEFAULT_API_BASE.to_string(),
                |v| v.trim_end_matches('/').to_string(),
            ),
            record_dir: non_empty("NDVI_RECORD").map(PathBuf::from),
            replay_dir: non_empty("NDVI_REPLAY").map(PathBuf::from),
        }
    }
}
