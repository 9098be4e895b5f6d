//! Filesystem port for writing output files.

use std::path::Path;

/// Writes files produced by commands.
///
/// Abstracting the filesystem lets replayed runs produce pages without
/// touching the real disk.
pub trait FileSystem: Send + Sync {
    /// Writes the given contents to a file, creating parent directories and
    /// overwriting any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
