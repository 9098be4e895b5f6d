//! Map page model and rendering.
//!
//! A [`MapDocument`] is the complete description of what the user sees:
//! where the map is centred, which layers are stacked in which order, and
//! which legend is overlaid. [`html::render`] turns it into a standalone
//! Leaflet page.

pub mod html;
pub mod legend;
pub mod vis;

use chrono::{DateTime, Utc};
use serde::Serialize;

pub use legend::{select_legend, LegendEntry, LegendVariant};
pub use vis::{VisParams, CHANGE_VIS, NDVI_VIS};

/// Initial zoom level.
pub const DEFAULT_ZOOM: u8 = 9;

/// Map panel height in pixels.
pub const DEFAULT_HEIGHT: u32 = 600;

/// A layer drawn on the map, bottom to top in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MapLayer {
    /// Remote raster served as XYZ tiles.
    Tiles {
        /// Name shown in the layer control.
        name: String,
        /// URL with `{z}`, `{x}` and `{y}` placeholders.
        url_template: String,
        /// Stretch the tiles were rendered with.
        vis: VisParams,
    },
    /// Polygon outline drawn client-side.
    Outline {
        /// Name shown in the layer control.
        name: String,
        /// Closed ring of `[lon, lat]` positions.
        ring: Vec<[f64; 2]>,
    },
}

impl MapLayer {
    /// Name shown in the layer control.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Tiles { name, .. } | Self::Outline { name, .. } => name,
        }
    }
}

/// Everything needed to render the map page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapDocument {
    /// Page heading.
    pub title: String,
    /// Line under the heading.
    pub subtitle: String,
    /// Short description of the current selection.
    pub caption: String,
    /// Initial centre as `[lat, lon]`.
    pub center: [f64; 2],
    /// Initial zoom level.
    pub zoom: u8,
    /// Map panel height in pixels.
    pub height: u32,
    /// Layers, bottom first.
    pub layers: Vec<MapLayer>,
    /// Legend overlay.
    pub legend: LegendVariant,
    /// When the page was produced.
    pub generated_at: DateTime<Utc>,
}

impl MapDocument {
    /// Creates an empty document with the given view and legend.
    #[must_use]
    pub fn new(center: [f64; 2], legend: LegendVariant, generated_at: DateTime<Utc>) -> Self {
        Self {
            title: String::new(),
            subtitle: String::new(),
            caption: String::new(),
            center,
            zoom: DEFAULT_ZOOM,
            height: DEFAULT_HEIGHT,
            layers: Vec::new(),
            legend,
            generated_at,
        }
    }

    /// Sets the heading, subtitle and caption.
    #[must_use]
    pub fn with_text(
        mut self,
        title: impl Into<String>,
        subtitle: impl Into<String>,
        caption: impl Into<String>,
    ) -> Self {
        self.title = title.into();
        self.subtitle = subtitle.into();
        self.caption = caption.into();
        self
    }

    /// Sets the panel height in pixels.
    #[must_use]
    pub fn with_height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    /// Appends a layer on top of the existing ones.
    pub fn push_layer(&mut self, layer: MapLayer) {
        self.layers.push(layer);
    }

    /// Names of all layers, bottom first.
    #[must_use]
    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.iter().map(MapLayer::name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layers_keep_insertion_order() {
        let mut doc = MapDocument::new([0.0, 0.0], LegendVariant::Ndvi, Utc::now());
        doc.push_layer(MapLayer::Tiles {
            name: "first".into(),
            url_template: "https://tiles/{z}/{x}/{y}".into(),
            vis: NDVI_VIS,
        });
        doc.push_layer(MapLayer::Outline {
            name: "second".into(),
            ring: vec![],
        });

        assert_eq!(doc.layer_names(), vec!["first", "second"]);
    }

    #[test]
    fn defaults_match_panel_layout() {
        let doc = MapDocument::new([9.4, -74.5], LegendVariant::Change, Utc::now());
        assert_eq!(doc.zoom, 9);
        assert_eq!(doc.height, 600);
        assert_eq!(doc.with_height(420).height, 420);
    }
}
