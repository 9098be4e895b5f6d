//! ID generator port for export request ids.

/// Generates unique identifiers.
///
/// Export submissions carry a fresh id so the service can deduplicate them;
/// replayed runs substitute recorded ids.
pub trait IdGenerator: Send + Sync {
    /// Generates a new unique identifier string.
    fn generate_id(&self) -> String;
}
