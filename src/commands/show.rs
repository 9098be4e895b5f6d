//! `ndvi-change show` command.

use serde_json::{json, Value};

use crate::ndvi::YearSelection;
use crate::ports::MapRequest;
use crate::workflow::Comparison;

/// Placeholder id in dry-run output; real runs use a fresh id.
const DRY_RUN_REQUEST_ID: &str = "<generated at submission>";

/// Execute the `show` command.
///
/// Prints the map and export requests for the selection as JSON. Nothing is
/// sent and no credentials are needed.
///
/// # Errors
///
/// Returns an error string if the requests cannot be built or serialized.
pub fn run(years: YearSelection) -> Result<(), String> {
    let plan = describe(&Comparison::build(years)?);
    let text = serde_json::to_string_pretty(&plan)
        .map_err(|e| format!("Failed to serialize requests: {e}"))?;
    println!("{text}");
    Ok(())
}

/// The requests a run would send for `comparison`.
#[must_use]
pub fn describe(comparison: &Comparison) -> Value {
    let layers: Vec<Value> = comparison
        .raster_layers()
        .into_iter()
        .map(|(name, image, vis)| {
            let request = MapRequest {
                image: image.clone(),
                vis,
            };
            json!({ "name": name, "vis": vis, "expression": request.expression() })
        })
        .collect();

    let export = comparison.export_request(DRY_RUN_REQUEST_ID.to_string());

    json!({
        "years": { "year1": comparison.year1, "year2": comparison.year2 },
        "layers": layers,
        "export": {
            "description": export.description,
            "folder": export.folder,
            "file_name_prefix": export.file_name_prefix,
            "scale": export.scale,
            "max_pixels": export.max_pixels,
            "request_id": export.request_id,
            "expression": export.expression(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_three_layers_and_the_export() {
        let comparison = Comparison::build(YearSelection::new(2018, 2022).unwrap()).unwrap();
        let plan = describe(&comparison);

        let names: Vec<&str> = plan["layers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            vec!["NDVI 2018", "NDVI 2022", "Cambio NDVI 2018→2022"]
        );
        assert_eq!(plan["layers"][2]["vis"]["min"], -0.5);
        assert_eq!(plan["export"]["description"], "NDVI_Diff_2018_to_2022");
        assert_eq!(plan["export"]["folder"], "EarthEngineExports");
        assert_eq!(plan["export"]["max_pixels"], 10_000_000_000_000_u64);
    }

    #[test]
    fn run_succeeds_offline() {
        assert!(run(YearSelection::default()).is_ok());
    }
}
