//! Typed builders over [`ValueNode`] for the algorithms this tool uses.
//!
//! Each builder only assembles a graph; nothing is evaluated until the
//! graph is sent to the remote service.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use serde_json::json;

use super::expression::{Expression, ValueNode};

/// A server-side geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Geometry(ValueNode);

impl Geometry {
    /// Planar rectangle from its west, south, east and north edges.
    #[must_use]
    pub fn rectangle(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self(ValueNode::invoke(
            "GeometryConstructors.Rectangle",
            [
                (
                    "coordinates",
                    ValueNode::constant(json!([[west, south], [east, north]])),
                ),
                ("geodesic", ValueNode::constant(false)),
            ],
        ))
    }

    /// The underlying graph node.
    #[must_use]
    pub fn node(&self) -> &ValueNode {
        &self.0
    }
}

/// A server-side collection filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Filter(ValueNode);

impl Filter {
    /// Keeps elements whose `field` is strictly less than `value`.
    #[must_use]
    pub fn less_than(field: &str, value: f64) -> Self {
        Self(ValueNode::invoke(
            "Filter.lessThan",
            [
                ("leftField", ValueNode::constant(field)),
                ("rightValue", ValueNode::constant(value)),
            ],
        ))
    }

    /// Keeps elements acquired in `[start, end)`.
    #[must_use]
    pub fn date(start: NaiveDate, end: NaiveDate) -> Self {
        let range = ValueNode::invoke(
            "DateRange",
            [("start", date_node(start)), ("end", date_node(end))],
        );
        Self(ValueNode::invoke(
            "Filter.dateRangeContains",
            [
                ("leftValue", range),
                ("rightField", ValueNode::constant("system:time_start")),
            ],
        ))
    }

    /// Keeps elements whose footprint intersects `geometry`.
    #[must_use]
    pub fn bounds(geometry: &Geometry) -> Self {
        Self(ValueNode::invoke(
            "Filter.intersects",
            [
                ("leftField", ValueNode::constant(".all")),
                ("rightValue", geometry.node().clone()),
            ],
        ))
    }

    /// The underlying graph node.
    #[must_use]
    pub fn node(&self) -> &ValueNode {
        &self.0
    }
}

fn date_node(date: NaiveDate) -> ValueNode {
    ValueNode::invoke(
        "Date.fromYMD",
        [
            ("year", ValueNode::constant(date.year())),
            ("month", ValueNode::constant(date.month())),
            ("day", ValueNode::constant(date.day())),
        ],
    )
}

/// A server-side image collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ImageCollection(ValueNode);

impl ImageCollection {
    /// Loads a catalog collection by asset id.
    #[must_use]
    pub fn load(id: &str) -> Self {
        Self(ValueNode::invoke(
            "ImageCollection.load",
            [("id", ValueNode::constant(id))],
        ))
    }

    /// Applies a filter.
    #[must_use]
    pub fn filter(self, filter: &Filter) -> Self {
        Self(ValueNode::invoke(
            "Collection.filter",
            [("collection", self.0), ("filter", filter.node().clone())],
        ))
    }

    /// Keeps scenes acquired in `[start, end)`.
    #[must_use]
    pub fn filter_date(self, start: NaiveDate, end: NaiveDate) -> Self {
        self.filter(&Filter::date(start, end))
    }

    /// Keeps scenes intersecting `geometry`.
    #[must_use]
    pub fn filter_bounds(self, geometry: &Geometry) -> Self {
        self.filter(&Filter::bounds(geometry))
    }

    /// Per-pixel, per-band median. Band names are preserved.
    #[must_use]
    pub fn median(self) -> Image {
        Image(ValueNode::invoke("reduce.median", [("collection", self.0)]))
    }

    /// The underlying graph node.
    #[must_use]
    pub fn node(&self) -> &ValueNode {
        &self.0
    }
}

/// A server-side image.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Image(ValueNode);

impl Image {
    /// `(first - second) / (first + second)` as a single band.
    #[must_use]
    pub fn normalized_difference(self, first: &str, second: &str) -> Self {
        Self(ValueNode::invoke(
            "Image.normalizedDifference",
            [
                ("input", self.0),
                ("bandNames", ValueNode::constant(json!([first, second]))),
            ],
        ))
    }

    /// Renames the single band of this image.
    #[must_use]
    pub fn rename(self, name: &str) -> Self {
        Self(ValueNode::invoke(
            "Image.rename",
            [
                ("input", self.0),
                ("names", ValueNode::constant(json!([name]))),
            ],
        ))
    }

    /// Masks everything outside `geometry`.
    #[must_use]
    pub fn clip(self, geometry: &Geometry) -> Self {
        Self(ValueNode::invoke(
            "Image.clip",
            [("input", self.0), ("geometry", geometry.node().clone())],
        ))
    }

    /// Pixel-wise `self - other`.
    #[must_use]
    pub fn subtract(self, other: &Image) -> Self {
        Self(ValueNode::invoke(
            "Image.subtract",
            [("image1", self.0), ("image2", other.0.clone())],
        ))
    }

    /// Clips to `geometry` and resamples to `scale` meters, as exports expect.
    #[must_use]
    pub fn clip_to_bounds_and_scale(self, geometry: &Geometry, scale: f64) -> Self {
        Self(ValueNode::invoke(
            "Image.clipToBoundsAndScale",
            [
                ("input", self.0),
                ("geometry", geometry.node().clone()),
                ("scale", ValueNode::constant(scale)),
            ],
        ))
    }

    /// The underlying graph node.
    #[must_use]
    pub fn node(&self) -> &ValueNode {
        &self.0
    }

    /// Wraps this image into a request expression.
    #[must_use]
    pub fn to_expression(&self) -> Expression {
        Expression::new(self.0.clone())
    }
}
