//! Recording adapter for the `FileSystem` port.

use std::path::Path;

use serde::Serialize;

use super::record_result;
use crate::cassette::session::SharedRecorder;
use crate::ports::FileSystem;

/// Records filesystem writes while delegating to an inner implementation.
pub struct RecordingFileSystem {
    inner: Box<dyn FileSystem>,
    recorder: SharedRecorder,
}

impl RecordingFileSystem {
    /// Wraps `inner`, recording into `recorder`.
    pub fn new(inner: Box<dyn FileSystem>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

/// Written pages are large; only their path and size are kept.
#[derive(Serialize)]
struct WriteInput {
    path: String,
    bytes: usize,
}

impl FileSystem for RecordingFileSystem {
    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.write(path, contents);
        let input = WriteInput {
            path: path.display().to_string(),
            bytes: contents.len(),
        };
        record_result(&self.recorder, "fs", "write", &input, &result);
        result
    }
}
