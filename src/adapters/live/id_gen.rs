//! Live adapter for the `IdGenerator` port using random v4 UUIDs.

use uuid::Uuid;

use crate::ports::IdGenerator;

/// Produces a fresh random UUID per export submission.
pub struct LiveIdGenerator;

impl IdGenerator for LiveIdGenerator {
    fn generate_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
