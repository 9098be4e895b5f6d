//! Service context bundling all port trait objects.

use std::path::Path;

use crate::adapters::live::{LiveClock, LiveEarthEngine, LiveFileSystem, LiveIdGenerator};
use crate::adapters::recording::{
    RecordingClock, RecordingFileSystem, RecordingIdGenerator, RecordingImageryService,
};
use crate::adapters::replaying::{
    ReplayingClock, ReplayingFileSystem, ReplayingIdGenerator, ReplayingImageryService,
};
use crate::cassette::config::CassetteConfig;
use crate::cassette::session::RecordingSession;
use crate::config::Settings;
use crate::ports::{
    Clock, ExportRequest, ExportTicket, FileSystem, IdGenerator, ImageryFuture, ImageryService,
    MapRequest, TileSource,
};

/// Bundles all port trait objects into a single context.
///
/// Constructors wire up different adapter implementations (live, recording,
/// replaying). The workflow only ever sees the traits.
pub struct ServiceContext {
    /// Remote imagery service.
    pub imagery: Box<dyn ImageryService>,
    /// Filesystem for output pages.
    pub fs: Box<dyn FileSystem>,
    /// Clock for page timestamps.
    pub clock: Box<dyn Clock>,
    /// ID generator for export request ids.
    pub id_gen: Box<dyn IdGenerator>,
}

impl ServiceContext {
    /// Creates a live context, authenticating with the imagery service.
    ///
    /// # Errors
    ///
    /// Returns an error if credentials are missing or rejected; nothing else
    /// runs in that case.
    pub async fn live(settings: &Settings) -> Result<Self, String> {
        let imagery = LiveEarthEngine::connect(settings)
            .await
            .map_err(|e| format!("Failed to authenticate with Earth Engine: {e}"))?;

        Ok(Self {
            imagery: Box::new(imagery),
            fs: Box::new(LiveFileSystem),
            clock: Box::new(LiveClock),
            id_gen: Box::new(LiveIdGenerator),
        })
    }

    /// Wraps `inner` so every port interaction is recorded into `session`.
    #[must_use]
    pub fn recording(inner: Self, session: &RecordingSession) -> Self {
        Self {
            imagery: Box::new(RecordingImageryService::new(inner.imagery, session.imagery.clone())),
            fs: Box::new(RecordingFileSystem::new(inner.fs, session.fs.clone())),
            clock: Box::new(RecordingClock::new(inner.clock, session.clock.clone())),
            id_gen: Box::new(RecordingIdGenerator::new(inner.id_gen, session.id_gen.clone())),
        }
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// Ports without a configured cassette use an adapter that panics with a
    /// clear message when called.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, String> {
        let replayers = config.load_all()?;

        Ok(Self {
            imagery: match replayers.imagery {
                Some(r) => Box::new(ReplayingImageryService::new(r)),
                None => Box::new(PanickingImageryService),
            },
            fs: match replayers.fs {
                Some(r) => Box::new(ReplayingFileSystem::new(r)),
                None => Box::new(PanickingFileSystem),
            },
            clock: match replayers.clock {
                Some(r) => Box::new(ReplayingClock::new(r)),
                None => Box::new(PanickingClock),
            },
            id_gen: match replayers.id_gen {
                Some(r) => Box::new(ReplayingIdGenerator::new(r)),
                None => Box::new(PanickingIdGenerator),
            },
        })
    }

    /// Creates a replaying context from a recording directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory is missing or a cassette cannot be parsed.
    pub fn replaying_dir(dir: &Path) -> Result<Self, String> {
        if !dir.is_dir() {
            return Err(format!("Replay directory not found: {}", dir.display()));
        }
        Self::replaying_from(&CassetteConfig::from_dir(dir))
    }
}

// --- Panicking adapters for unspecified ports ---

struct PanickingImageryService;
impl ImageryService for PanickingImageryService {
    fn create_map(&self, _request: &MapRequest) -> ImageryFuture<'_, TileSource> {
        panic!("Imagery port not configured in CassetteConfig; no cassette loaded for imagery");
    }

    fn start_export(&self, _request: &ExportRequest) -> ImageryFuture<'_, ExportTicket> {
        panic!("Imagery port not configured in CassetteConfig; no cassette loaded for imagery");
    }
}

struct PanickingFileSystem;
impl FileSystem for PanickingFileSystem {
    fn write(
        &self,
        _path: &Path,
        _contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        panic!("FileSystem port not configured in CassetteConfig; no cassette loaded for fs");
    }
}

struct PanickingClock;
impl Clock for PanickingClock {
    fn now(&self) -> chrono::DateTime<chrono::Utc> {
        panic!("Clock port not configured in CassetteConfig; no cassette loaded for clock");
    }
}

struct PanickingIdGenerator;
impl IdGenerator for PanickingIdGenerator {
    fn generate_id(&self) -> String {
        panic!("IdGenerator port not configured in CassetteConfig; no cassette loaded for id_gen");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::recorder::CassetteRecorder;
    use serde_json::json;

    #[test]
    fn replaying_from_serves_configured_ports() {
        let dir = std::env::temp_dir().join("ndvi_context_replaying_from");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("id_gen.cassette.yaml");
        let mut recorder = CassetteRecorder::new(&path, "ids");
        recorder.record("id_gen", "generate_id", json!(null), json!("req-42"));
        recorder.finish().unwrap();

        let ctx = ServiceContext::replaying_dir(&dir).unwrap();
        assert_eq!(ctx.id_gen.generate_id(), "req-42");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    #[should_panic(expected = "Clock port not configured")]
    fn unconfigured_port_panics() {
        let ctx = ServiceContext::replaying_from(&CassetteConfig::default()).unwrap();
        let _ = ctx.clock.now();
    }

    #[test]
    fn missing_replay_directory_is_an_error() {
        let err = ServiceContext::replaying_dir(Path::new("/nonexistent/cassettes"))
            .err()
            .unwrap();
        assert!(err.contains("Replay directory not found"));
    }

    #[tokio::test]
    async fn live_context_fails_without_key_file() {
        let settings = Settings::from_lookup(|name| {
            (name == "NDVI_KEY_FILE").then(|| "/nonexistent/ee-key.json".to_string())
        });
        let err = ServiceContext::live(&settings).await.err().unwrap();
        assert!(err.contains("Failed to authenticate with Earth Engine"));
        assert!(err.contains("/nonexistent/ee-key.json"));
    }
}
