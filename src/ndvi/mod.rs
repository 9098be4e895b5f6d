//! NDVI composites and change layers.

pub mod change;
pub mod compositor;
pub mod region;
pub mod years;

pub use change::difference;
pub use compositor::{composite, DateRange};
pub use region::{Region, REGION_OF_INTEREST};
pub use years::YearSelection;

/// Landsat 8 Collection 2 Tier 1 surface reflectance.
pub const COLLECTION_ID: &str = "LANDSAT/LC08/C02/T1_L2";

/// Near-infrared band.
pub const NIR_BAND: &str = "SR_B5";

/// Red band.
pub const RED_BAND: &str = "SR_B4";

/// Scene property holding the cataloged cloud percentage.
pub const CLOUD_COVER_PROPERTY: &str = "CLOUD_COVER";

/// Scenes at or above this cloud percentage are dropped.
pub const MAX_CLOUD_COVER: f64 = 20.0;

/// Band name of a yearly composite.
pub const NDVI_BAND: &str = "NDVI";

/// Band name of the change layer.
pub const CHANGE_BAND: &str = "NDVI_Change";
