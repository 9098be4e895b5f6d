//! Live adapters for real external interactions.

pub mod auth;
pub mod clock;
pub mod filesystem;
pub mod id_gen;
pub mod imagery;

pub use clock::LiveClock;
pub use filesystem::LiveFileSystem;
pub use id_gen::LiveIdGenerator;
pub use imagery::LiveEarthEngine;
