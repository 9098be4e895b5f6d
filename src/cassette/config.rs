//! Per-port cassette locations for replay.

use std::path::{Path, PathBuf};

use super::format::Cassette;
use super::replayer::CassetteReplayer;

/// File name of the cassette for `port` inside a recording directory.
#[must_use]
pub fn cassette_file_name(port: &str) -> String {
    format!("{port}.cassette.yaml")
}

/// Per-port cassette files. Ports left as `None` are served by adapters
/// that panic when called.
#[derive(Debug, Clone, Default)]
pub struct CassetteConfig {
    /// Imagery service cassette.
    pub imagery: Option<PathBuf>,
    /// Filesystem cassette.
    pub fs: Option<PathBuf>,
    /// Clock cassette.
    pub clock: Option<PathBuf>,
    /// ID generator cassette.
    pub id_gen: Option<PathBuf>,
}

/// Loaded replayers, one per configured port.
pub struct PortReplayers {
    /// Imagery service replayer.
    pub imagery: Option<CassetteReplayer>,
    /// Filesystem replayer.
    pub fs: Option<CassetteReplayer>,
    /// Clock replayer.
    pub clock: Option<CassetteReplayer>,
    /// ID generator replayer.
    pub id_gen: Option<CassetteReplayer>,
}

impl CassetteConfig {
    /// Picks up whichever `<port>.cassette.yaml` files exist in `dir`.
    #[must_use]
    pub fn from_dir(dir: &Path) -> Self {
        let existing = |port: &str| {
            let path = dir.join(cassette_file_name(port));
            path.is_file().then_some(path)
        };
        Self {
            imagery: existing("imagery"),
            fs: existing("fs"),
            clock: existing("clock"),
            id_gen: existing("id_gen"),
        }
    }

    /// Loads one cassette file into a replayer.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<CassetteReplayer, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        let cassette: Cassette = serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;
        Ok(CassetteReplayer::new(&cassette))
    }

    /// Loads every configured cassette.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette cannot be read or parsed.
    pub fn load_all(&self) -> Result<PortReplayers, String> {
        Ok(PortReplayers {
            imagery: self.imagery.as_deref().map(Self::load).transpose()?,
            fs: self.fs.as_deref().map(Self::load).transpose()?,
            clock: self.clock.as_deref().map(Self::load).transpose()?,
            id_gen: self.id_gen.as_deref().map(Self::load).transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::recorder::CassetteRecorder;
    use serde_json::json;

    #[test]
    fn from_dir_only_keeps_existing_files() {
        let dir = std::env::temp_dir().join("ndvi_cassette_config_from_dir");
        std::fs::create_dir_all(&dir).unwrap();

        let mut clock = CassetteRecorder::new(dir.join("clock.cassette.yaml"), "clock");
        clock.record("clock", "now", json!(null), json!("2024-01-01T00:00:00Z"));
        clock.finish().unwrap();

        let config = CassetteConfig::from_dir(&dir);
        assert_eq!(config.clock, Some(dir.join("clock.cassette.yaml")));
        assert!(config.imagery.is_none());
        assert!(config.fs.is_none());

        let replayers = config.load_all().unwrap();
        assert_eq!(replayers.clock.map(|r| r.remaining()), Some(1));
        assert!(replayers.imagery.is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_reports_unparseable_file() {
        let dir = std::env::temp_dir().join("ndvi_cassette_config_bad");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("imagery.cassette.yaml");
        std::fs::write(&path, "interactions: [").unwrap();

        let err = CassetteConfig {
            imagery: Some(path),
            ..CassetteConfig::default()
        }
        .load_all()
        .err()
        .unwrap();
        assert!(err.contains("Failed to parse cassette file"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
