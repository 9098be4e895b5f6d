//! Remote imagery service port.
//!
//! All raster work happens server-side. The port accepts image graphs and
//! returns handles (tile URLs, export operation names), never pixels.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::earthengine::{Expression, Geometry, Image};
use crate::map::VisParams;

/// Errors produced while talking to the imagery service.
#[derive(Error, Debug)]
pub enum ImageryError {
    /// The service-account key could not be read or parsed.
    #[error("service account key {path}: {reason}")]
    KeyFile {
        /// Path of the key file.
        path: String,
        /// What went wrong.
        reason: String,
    },

    /// Token minting or exchange failed.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Transport-level failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Earth Engine API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message from the error body, or the raw body.
        message: String,
    },

    /// A success body did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),

    /// An error captured in a cassette and served back on replay.
    #[error("{0}")]
    Replayed(String),
}

/// Boxed future type alias used by [`ImageryService`] to keep the trait dyn-compatible.
pub type ImageryFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ImageryError>> + Send + 'a>>;

/// Request for a tiled visualization of an image.
#[derive(Debug, Clone, Serialize)]
pub struct MapRequest {
    /// Image to render.
    pub image: Image,
    /// Stretch and palette.
    pub vis: VisParams,
}

impl MapRequest {
    /// The expression sent to the service.
    #[must_use]
    pub fn expression(&self) -> Expression {
        self.image.to_expression()
    }
}

/// A rendered map that can be fetched as XYZ tiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSource {
    /// Resource name assigned by the service.
    pub name: String,
    /// URL with `{z}`, `{x}` and `{y}` placeholders.
    pub url_template: String,
}

/// Parameters of a background export to Drive.
#[derive(Debug, Clone, Serialize)]
pub struct ExportRequest {
    /// Image to export.
    pub image: Image,
    /// Task name shown by the service.
    pub description: String,
    /// Destination Drive folder.
    pub folder: String,
    /// Output file name prefix.
    pub file_name_prefix: String,
    /// Export bounds.
    pub region: Geometry,
    /// Pixel size in meters.
    pub scale: f64,
    /// Upper bound on exported pixels.
    pub max_pixels: u64,
    /// Idempotency key for the submission.
    pub request_id: String,
}

impl ExportRequest {
    /// The expression sent to the service: the image clipped to the region
    /// and resampled to the export scale.
    #[must_use]
    pub fn expression(&self) -> Expression {
        self.image
            .clone()
            .clip_to_bounds_and_scale(&self.region, self.scale)
            .to_expression()
    }
}

/// Handle of a submitted export. Completion is tracked only by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportTicket {
    /// Operation name assigned by the service.
    pub operation: String,
}

/// Evaluates image graphs on a remote geospatial service.
pub trait ImageryService: Send + Sync {
    /// Registers a visualization and returns where its tiles are served.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails (network, auth, invalid graph, quota).
    fn create_map(&self, request: &MapRequest) -> ImageryFuture<'_, TileSource>;

    /// Starts a background export and returns as soon as it is accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if the submission is rejected.
    fn start_export(&self, request: &ExportRequest) -> ImageryFuture<'_, ExportTicket>;
}
