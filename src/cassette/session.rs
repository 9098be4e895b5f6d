//! Recording session owning one recorder per port.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use super::config::cassette_file_name;
use super::recorder::CassetteRecorder;

/// Shared handle to a port's recorder.
pub type SharedRecorder = Arc<Mutex<CassetteRecorder>>;

/// Per-port recorders writing into one timestamped directory.
///
/// Recording adapters hold clones of these handles; they must be dropped
/// before [`RecordingSession::finish`].
pub struct RecordingSession {
    /// Recorder for imagery service calls.
    pub imagery: SharedRecorder,
    /// Recorder for filesystem calls.
    pub fs: SharedRecorder,
    /// Recorder for clock calls.
    pub clock: SharedRecorder,
    /// Recorder for ID generator calls.
    pub id_gen: SharedRecorder,
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Creates `<root>/<timestamp>/` and a recorder per port inside it.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory already exists or cannot be created.
    pub fn new(root: &Path) -> Result<Self, String> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let output_dir = root.join(&timestamp);

        if output_dir.exists() {
            return Err(format!(
                "Cassette directory already exists: {}",
                output_dir.display()
            ));
        }
        std::fs::create_dir_all(&output_dir)
            .map_err(|e| format!("Failed to create cassette directory: {e}"))?;

        let recorder = |port: &str| -> SharedRecorder {
            Arc::new(Mutex::new(CassetteRecorder::new(
                output_dir.join(cassette_file_name(port)),
                format!("{timestamp}-{port}"),
            )))
        };

        Ok(Self {
            imagery: recorder("imagery"),
            fs: recorder("fs"),
            clock: recorder("clock"),
            id_gen: recorder("id_gen"),
            output_dir,
        })
    }

    /// Directory the cassettes are written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes every port's cassette and returns the directory.
    ///
    /// # Errors
    ///
    /// Returns an error if an adapter still holds a recorder or a write fails.
    pub fn finish(self) -> Result<PathBuf, String> {
        fn finish_one(shared: SharedRecorder, port: &str) -> Result<(), String> {
            let recorder = Arc::try_unwrap(shared)
                .map_err(|_| format!("Recording adapter for {port} still has references"))?
                .into_inner()
                .map_err(|e| format!("Recorder lock for {port} poisoned: {e}"))?;
            recorder
                .finish()
                .map_err(|e| format!("Failed to write {port} cassette: {e}"))?;
            Ok(())
        }

        finish_one(self.imagery, "imagery")?;
        finish_one(self.fs, "fs")?;
        finish_one(self.clock, "clock")?;
        finish_one(self.id_gen, "id_gen")?;
        Ok(self.output_dir)
    }
}
