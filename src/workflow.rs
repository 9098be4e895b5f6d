//! The NDVI comparison workflow.
//!
//! One user interaction builds both yearly composites and their difference,
//! then either renders them on a map or exports the difference. Every step
//! is recomputed from the selected years; nothing is cached.

use tracing::info;

use crate::context::ServiceContext;
use crate::earthengine::Image;
use crate::map::{select_legend, MapDocument, MapLayer, VisParams, CHANGE_VIS, NDVI_VIS};
use crate::ndvi::{composite, difference, Region, YearSelection, REGION_OF_INTEREST};
use crate::ports::{ExportRequest, ExportTicket, MapRequest};

/// Page heading.
pub const PAGE_TITLE: &str = "Monitoreo de Deforestación con NDVI (Landsat 8)";

/// Line under the heading.
pub const PAGE_SUBTITLE: &str =
    "Comparación de NDVI entre dos años para detectar pérdida o ganancia de vegetación.";

/// Drive folder receiving exports.
pub const EXPORT_FOLDER: &str = "EarthEngineExports";

/// Export pixel size in meters.
pub const EXPORT_SCALE: f64 = 30.0;

/// Upper bound on exported pixels (1e13).
pub const EXPORT_MAX_PIXELS: u64 = 10_000_000_000_000;

/// Message shown once an export has been accepted.
pub const EXPORT_CONFIRMATION: &str =
    "✅ Exportación iniciada a Google Drive (EarthEngineExports).";

/// Both composites and their difference for one pair of years.
#[derive(Debug, Clone)]
pub struct Comparison {
    /// Baseline year.
    pub year1: i32,
    /// Current year.
    pub year2: i32,
    /// Region every layer is bounded by.
    pub region: Region,
    /// NDVI composite of `year1`.
    pub ndvi1: Image,
    /// NDVI composite of `year2`.
    pub ndvi2: Image,
    /// `ndvi2 - ndvi1`.
    pub change: Image,
}

impl Comparison {
    /// Builds the comparison for a validated selection over the fixed region.
    ///
    /// # Errors
    ///
    /// Returns an error string if a composite cannot be built.
    pub fn build(selection: YearSelection) -> Result<Self, String> {
        Self::between(selection.year1, selection.year2, REGION_OF_INTEREST)
    }

    /// Builds the comparison for any two years, without the allow-lists.
    ///
    /// `year1` may equal or follow `year2`; the change is still
    /// `year2 - year1`.
    ///
    /// # Errors
    ///
    /// Returns an error string if a composite cannot be built.
    pub fn between(year1: i32, year2: i32, region: Region) -> Result<Self, String> {
        let ndvi1 = composite(year1, &region)?;
        let ndvi2 = composite(year2, &region)?;
        let change = difference(&ndvi1, &ndvi2);
        Ok(Self {
            year1,
            year2,
            region,
            ndvi1,
            ndvi2,
            change,
        })
    }

    /// Name shared by the export task and its output files.
    #[must_use]
    pub fn export_name(&self) -> String {
        format!("NDVI_Diff_{}_to_{}", self.year1, self.year2)
    }

    /// Raster layers in drawing order with their names and stretches.
    #[must_use]
    pub fn raster_layers(&self) -> [(String, &Image, VisParams); 3] {
        [
            (format!("NDVI {}", self.year1), &self.ndvi1, NDVI_VIS),
            (format!("NDVI {}", self.year2), &self.ndvi2, NDVI_VIS),
            (
                format!("Cambio NDVI {}→{}", self.year1, self.year2),
                &self.change,
                CHANGE_VIS,
            ),
        ]
    }

    /// Export request for the change layer.
    #[must_use]
    pub fn export_request(&self, request_id: String) -> ExportRequest {
        let name = self.export_name();
        ExportRequest {
            image: self.change.clone(),
            description: name.clone(),
            folder: EXPORT_FOLDER.to_string(),
            file_name_prefix: name,
            region: self.region.geometry(),
            scale: EXPORT_SCALE,
            max_pixels: EXPORT_MAX_PIXELS,
            request_id,
        }
    }
}

/// Requests tiles for the three rasters, one after the other, and assembles
/// the map page model with the region outline and the matching legend.
///
/// # Errors
///
/// Returns an error string if any map request fails; no partial map is produced.
pub async fn render_map(
    ctx: &ServiceContext,
    comparison: &Comparison,
    height: u32,
) -> Result<MapDocument, String> {
    let legend = select_legend(comparison.year1, comparison.year2);
    let caption = format!("Año base: {} · Año actual: {}", comparison.year1, comparison.year2);
    let mut doc = MapDocument::new(comparison.region.center(), legend, ctx.clock.now())
        .with_text(PAGE_TITLE, PAGE_SUBTITLE, caption)
        .with_height(height);

    for (name, image, vis) in comparison.raster_layers() {
        let request = MapRequest {
            image: image.clone(),
            vis,
        };
        let tiles = ctx
            .imagery
            .create_map(&request)
            .await
            .map_err(|e| format!("Failed to render layer '{name}': {e}"))?;
        info!(layer = %name, map = %tiles.name, "layer ready");
        doc.push_layer(MapLayer::Tiles {
            name,
            url_template: tiles.url_template,
            vis,
        });
    }

    doc.push_layer(MapLayer::Outline {
        name: "Región".to_string(),
        ring: comparison.region.ring(),
    });
    Ok(doc)
}

/// Submits the change layer for export and returns once it is accepted.
///
/// The job runs remotely; its completion is not tracked.
///
/// # Errors
///
/// Returns an error string if the submission is rejected.
pub async fn export_change(
    ctx: &ServiceContext,
    comparison: &Comparison,
) -> Result<ExportTicket, String> {
    let request = comparison.export_request(ctx.id_gen.generate_id());
    let ticket = ctx
        .imagery
        .start_export(&request)
        .await
        .map_err(|e| format!("Failed to start export {}: {e}", request.description))?;
    info!(
        operation = %ticket.operation,
        description = %request.description,
        "export submitted"
    );
    Ok(ticket)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::replaying::test_support::replayer;
    use crate::adapters::replaying::{
        ReplayingClock, ReplayingFileSystem, ReplayingIdGenerator, ReplayingImageryService,
    };
    use crate::map::LegendVariant;
    use serde_json::json;

    fn tiles(name: &str) -> serde_json::Value {
        let url_template = format!("https://ee.test/v1/{name}/tiles/{{z}}/{{x}}/{{y}}");
        json!({"Ok": {"name": name, "url_template": url_template}})
    }

    fn context(imagery: Vec<(&str, serde_json::Value)>) -> ServiceContext {
        ServiceContext {
            imagery: Box::new(ReplayingImageryService::new(replayer("imagery", imagery))),
            fs: Box::new(ReplayingFileSystem::new(replayer("fs", vec![]))),
            clock: Box::new(ReplayingClock::new(replayer(
                "clock",
                vec![("now", json!("2024-05-01T12:00:00Z"))],
            ))),
            id_gen: Box::new(ReplayingIdGenerator::new(replayer(
                "id_gen",
                vec![("generate_id", json!("req-001"))],
            ))),
        }
    }

    fn three_maps() -> Vec<(&'static str, serde_json::Value)> {
        vec![
            ("create_map", tiles("m1")),
            ("create_map", tiles("m2")),
            ("create_map", tiles("m3")),
        ]
    }

    #[test]
    fn export_name_follows_years() {
        let comparison = Comparison::build(YearSelection::new(2018, 2022).unwrap()).unwrap();
        assert_eq!(comparison.export_name(), "NDVI_Diff_2018_to_2022");

        let request = comparison.export_request("id".into());
        assert_eq!(request.description, "NDVI_Diff_2018_to_2022");
        assert_eq!(request.file_name_prefix, "NDVI_Diff_2018_to_2022");
        assert_eq!(request.folder, "EarthEngineExports");
        assert_eq!(request.scale, 30.0);
        assert_eq!(request.max_pixels, 10_000_000_000_000);
        assert_eq!(request.image, comparison.change);
    }

    #[test]
    fn raster_layers_use_fixed_stretches() {
        let comparison = Comparison::build(YearSelection::default()).unwrap();
        let layers = comparison.raster_layers();

        assert_eq!(layers[0].0, "NDVI 2015");
        assert_eq!(layers[1].0, "NDVI 2023");
        assert_eq!(layers[2].0, "Cambio NDVI 2015→2023");
        assert_eq!(layers[0].2, NDVI_VIS);
        assert_eq!(layers[1].2, NDVI_VIS);
        assert_eq!(layers[2].2, CHANGE_VIS);
    }

    #[tokio::test]
    async fn different_years_render_change_legend() {
        let ctx = context(three_maps());
        let comparison = Comparison::between(2015, 2023, REGION_OF_INTEREST).unwrap();
        let doc = render_map(&ctx, &comparison, 600).await.unwrap();

        assert_eq!(doc.legend, LegendVariant::Change);
        assert_eq!(
            doc.layer_names(),
            vec!["NDVI 2015", "NDVI 2023", "Cambio NDVI 2015→2023", "Región"]
        );
        assert_eq!(doc.center, REGION_OF_INTEREST.center());
        assert_eq!(doc.generated_at.to_rfc3339(), "2024-05-01T12:00:00+00:00");
        match &doc.layers[2] {
            MapLayer::Tiles { url_template, vis, .. } => {
                assert!(url_template.contains("/m3/tiles/"));
                assert_eq!(*vis, CHANGE_VIS);
            }
            other => panic!("expected tiles, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn same_year_renders_ndvi_legend() {
        let ctx = context(three_maps());
        let comparison = Comparison::between(2015, 2015, REGION_OF_INTEREST).unwrap();
        let doc = render_map(&ctx, &comparison, 600).await.unwrap();

        assert_eq!(doc.legend, LegendVariant::Ndvi);
        let labels: Vec<&str> = doc.legend.entries().iter().map(|e| e.label).collect();
        assert_eq!(labels, vec!["Bajo", "Medio", "Alto"]);
    }

    #[tokio::test]
    async fn failed_layer_aborts_the_map() {
        let ctx = context(vec![
            ("create_map", tiles("m1")),
            ("create_map", json!({"Err": "Earth Engine API error (429): quota exceeded"})),
        ]);
        let comparison = Comparison::build(YearSelection::default()).unwrap();
        let err = render_map(&ctx, &comparison, 600).await.unwrap_err();

        assert!(err.contains("Failed to render layer 'NDVI 2023'"));
        assert!(err.contains("quota exceeded"));
    }

    #[tokio::test]
    async fn export_returns_remote_operation() {
        let ctx = context(vec![(
            "start_export",
            json!({"Ok": {"operation": "projects/p/operations/OP1"}}),
        )]);
        let comparison = Comparison::build(YearSelection::new(2018, 2022).unwrap()).unwrap();
        let ticket = export_change(&ctx, &comparison).await.unwrap();

        assert_eq!(ticket.operation, "projects/p/operations/OP1");
    }

    #[tokio::test]
    async fn rejected_export_names_the_job() {
        let ctx = context(vec![("start_export", json!({"Err": "permission denied"}))]);
        let comparison = Comparison::build(YearSelection::default()).unwrap();
        let err = export_change(&ctx, &comparison).await.unwrap_err();

        assert!(err.contains("NDVI_Diff_2015_to_2023"));
        assert!(err.contains("permission denied"));
    }
}
