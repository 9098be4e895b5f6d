//! Recording adapter for the `ImageryService` port.

use std::sync::Arc;

use super::record_result;
use crate::cassette::session::SharedRecorder;
use crate::ports::{
    ExportRequest, ExportTicket, ImageryFuture, ImageryService, MapRequest, TileSource,
};

/// Records imagery calls while delegating to an inner implementation.
pub struct RecordingImageryService {
    inner: Box<dyn ImageryService>,
    recorder: SharedRecorder,
}

impl RecordingImageryService {
    /// Wraps `inner`, recording into `recorder`.
    pub fn new(inner: Box<dyn ImageryService>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

impl ImageryService for RecordingImageryService {
    fn create_map(&self, request: &MapRequest) -> ImageryFuture<'_, TileSource> {
        let request = request.clone();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.create_map(&request).await;
            record_result(&recorder, "imagery", "create_map", &request, &result);
            result
        })
    }

    fn start_export(&self, request: &ExportRequest) -> ImageryFuture<'_, ExportTicket> {
        let request = request.clone();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.start_export(&request).await;
            record_result(&recorder, "imagery", "start_export", &request, &result);
            result
        })
    }
}
