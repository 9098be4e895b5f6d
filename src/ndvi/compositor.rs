//! Yearly cloud-filtered NDVI composites.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use super::region::Region;
use super::{COLLECTION_ID, CLOUD_COVER_PROPERTY, MAX_CLOUD_COVER, NDVI_BAND, NIR_BAND, RED_BAND};
use crate::earthengine::{Filter, Image, ImageCollection};

/// Acquisition window passed to the date filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    /// First day of the window.
    pub start: NaiveDate,
    /// Last day of the window.
    pub end: NaiveDate,
}

impl DateRange {
    /// January 1st to December 31st of `year`.
    ///
    /// # Errors
    ///
    /// Returns an error string if `year` is outside the representable calendar.
    pub fn calendar_year(year: i32) -> Result<Self, String> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| format!("Cannot build a start date for year {year}"))?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31)
            .ok_or_else(|| format!("Cannot build an end date for year {year}"))?;
        Ok(Self { start, end })
    }
}

/// Builds the NDVI composite for `year` over `region`.
///
/// Scenes are restricted to the year, the region bounds and a cloud cover
/// below the threshold, reduced by per-pixel median, then turned into a
/// single `NDVI` band clipped to the region.
///
/// # Errors
///
/// Returns an error string if no date range can be built for `year`.
pub fn composite(year: i32, region: &Region) -> Result<Image, String> {
    let range = DateRange::calendar_year(year)?;
    let geometry = region.geometry();

    debug!(year, start = %range.start, end = %range.end, "building NDVI composite");

    Ok(ImageCollection::load(COLLECTION_ID)
        .filter_date(range.start, range.end)
        .filter_bounds(&geometry)
        .filter(&Filter::less_than(CLOUD_COVER_PROPERTY, MAX_CLOUD_COVER))
        .median()
        .normalized_difference(NIR_BAND, RED_BAND)
        .rename(NDVI_BAND)
        .clip(&geometry))
}
