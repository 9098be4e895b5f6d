//! Replaying adapter for the `ImageryService` port.

use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{
    ExportRequest, ExportTicket, ImageryError, ImageryFuture, ImageryService, MapRequest,
    TileSource,
};

/// Serves recorded map and export responses without network access.
pub struct ReplayingImageryService {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingImageryService {
    /// Creates a replaying imagery service from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self {
            replayer: Mutex::new(replayer),
        }
    }
}

impl ImageryService for ReplayingImageryService {
    fn create_map(&self, _request: &MapRequest) -> ImageryFuture<'_, TileSource> {
        let output = next_output(&self.replayer, "imagery", "create_map");
        Box::pin(async move {
            replay_result(output, "imagery::create_map").map_err(ImageryError::Replayed)
        })
    }

    fn start_export(&self, _request: &ExportRequest) -> ImageryFuture<'_, ExportTicket> {
        let output = next_output(&self.replayer, "imagery", "start_export");
        Box::pin(async move {
            replay_result(output, "imagery::start_export").map_err(ImageryError::Replayed)
        })
    }
}
