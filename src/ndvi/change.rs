//! Difference between two yearly composites.

use super::CHANGE_BAND;
use crate::earthengine::Image;

/// `later - earlier`, pixel-wise, as a single `NDVI_Change` band.
///
/// Positive values mean vegetation gain. No clipping is applied beyond what
/// the inputs already carry.
#[must_use]
pub fn difference(earlier: &Image, later: &Image) -> Image {
    later.clone().subtract(earlier).rename(CHANGE_BAND)
}
