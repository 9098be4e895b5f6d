//! The fixed region every query is bounded by.

use crate::earthengine::Geometry;

/// An axis-aligned rectangle in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    /// Western longitude.
    pub west: f64,
    /// Southern latitude.
    pub south: f64,
    /// Eastern longitude.
    pub east: f64,
    /// Northern latitude.
    pub north: f64,
}

/// Study area in northern Colombia.
pub const REGION_OF_INTEREST: Region = Region {
    west: -74.7,
    south: 9.2,
    east: -74.3,
    north: 9.6,
};

impl Region {
    /// Corners as `[lon, lat]`, counter-clockwise from south-west.
    #[must_use]
    pub fn corners(&self) -> [[f64; 2]; 4] {
        [
            [self.west, self.south],
            [self.east, self.south],
            [self.east, self.north],
            [self.west, self.north],
        ]
    }

    /// Closed GeoJSON ring (first corner repeated at the end).
    #[must_use]
    pub fn ring(&self) -> Vec<[f64; 2]> {
        let corners = self.corners();
        let mut ring = corners.to_vec();
        ring.push(corners[0]);
        ring
    }

    /// Centre as `[lat, lon]`, the order map widgets expect.
    #[must_use]
    pub fn center(&self) -> [f64; 2] {
        [(self.south + self.north) / 2.0, (self.west + self.east) / 2.0]
    }

    /// Server-side rectangle for filters, clipping and exports.
    #[must_use]
    pub fn geometry(&self) -> Geometry {
        Geometry::rectangle(self.west, self.south, self.east, self.north)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_is_closed_with_five_positions() {
        let ring = REGION_OF_INTEREST.ring();
        assert_eq!(ring.len(), 5);
        assert_eq!(ring.first(), ring.last());
    }

    #[test]
    fn center_matches_study_area_midpoint() {
        let [lat, lon] = REGION_OF_INTEREST.center();
        assert!((lat - 9.4).abs() < 1e-9);
        assert!((lon + 74.5).abs() < 1e-9);
    }
}
