//! Visualization parameters for raster layers.

use serde::Serialize;

/// Linear stretch from `min..=max` across an ordered palette.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VisParams {
    /// Value mapped to the first palette color.
    pub min: f64,
    /// Value mapped to the last palette color.
    pub max: f64,
    /// CSS color names, low to high.
    pub palette: &'static [&'static str],
}

/// Yearly NDVI composites.
pub const NDVI_VIS: VisParams = VisParams {
    min: 0.0,
    max: 1.0,
    palette: &["brown", "yellow", "green"],
};

/// NDVI change layer.
pub const CHANGE_VIS: VisParams = VisParams {
    min: -0.5,
    max: 0.5,
    palette: &["red", "white", "green"],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ndvi_stretch_is_zero_to_one() {
        assert_eq!(NDVI_VIS.min, 0.0);
        assert_eq!(NDVI_VIS.max, 1.0);
        assert_eq!(NDVI_VIS.palette, ["brown", "yellow", "green"]);
    }

    #[test]
    fn change_stretch_is_symmetric() {
        assert_eq!(CHANGE_VIS.min, -CHANGE_VIS.max);
        assert_eq!(CHANGE_VIS.max, 0.5);
        assert_eq!(CHANGE_VIS.palette, ["red", "white", "green"]);
    }
}
