//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the comparison workflow and an
//! external system (imagery service, filesystem, time, IDs).
//! Implementations live in `src/adapters/`.

pub mod clock;
pub mod filesystem;
pub mod id_gen;
pub mod imagery;

pub use clock::Clock;
pub use filesystem::FileSystem;
pub use id_gen::IdGenerator;
pub use imagery::{
    ExportRequest, ExportTicket, ImageryError, ImageryFuture, ImageryService, MapRequest,
    TileSource,
};
