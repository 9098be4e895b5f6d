//! Live adapter for the `ImageryService` port using the Earth Engine REST API.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::auth::{fetch_access_token, ServiceAccountKey};
use crate::config::Settings;
use crate::earthengine::Expression;
use crate::ports::imagery::{
    ExportRequest, ExportTicket, ImageryError, ImageryFuture, ImageryService, MapRequest,
    TileSource,
};

/// Live imagery client holding an access token obtained at connect time.
pub struct LiveEarthEngine {
    client: Client,
    api_base: String,
    project: String,
    access_token: String,
}

impl LiveEarthEngine {
    /// Loads the service-account key and authenticates.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is missing or invalid, no project can be
    /// determined, or the token exchange fails.
    pub async fn connect(settings: &Settings) -> Result<Self, ImageryError> {
        let key = ServiceAccountKey::from_file(&settings.key_file)?;
        let issuer = settings
            .service_account
            .clone()
            .unwrap_or_else(|| key.client_email.clone());
        let project = settings
            .project
            .clone()
            .or_else(|| key.project_id.clone())
            .ok_or_else(|| ImageryError::Auth("no project configured; set NDVI_PROJECT".into()))?;

        let client = Client::new();
        let access_token = fetch_access_token(&client, &key, &issuer).await?;
        info!(%issuer, %project, "authenticated with Earth Engine");

        Ok(Self {
            client,
            api_base: settings.api_base.clone(),
            project,
            access_token,
        })
    }

    fn project_url(&self, suffix: &str) -> String {
        format!("{}/projects/{}/{suffix}", self.api_base, self.project)
    }

    async fn post<B, R>(&self, url: String, body: &B) -> Result<R, ImageryError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        debug!(%url, "POST");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiError>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(ImageryError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&text).map_err(|e| ImageryError::Decode(format!("{url}: {e}")))
    }
}

/// Body of `projects.maps.create`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateMapBody {
    expression: Expression,
    file_format: &'static str,
    visualization_options: VisualizationOptions,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VisualizationOptions {
    ranges: Vec<DoubleRange>,
    palette_colors: Vec<&'static str>,
}

#[derive(Serialize)]
struct DoubleRange {
    min: f64,
    max: f64,
}

impl From<&MapRequest> for CreateMapBody {
    fn from(request: &MapRequest) -> Self {
        Self {
            expression: request.expression(),
            file_format: "AUTO",
            visualization_options: VisualizationOptions {
                ranges: vec![DoubleRange {
                    min: request.vis.min,
                    max: request.vis.max,
                }],
                palette_colors: request.vis.palette.to_vec(),
            },
        }
    }
}

/// Body of `projects.image.export`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportImageBody {
    expression: Expression,
    description: String,
    file_export_options: FileExportOptions,
    /// int64 travels as a decimal string.
    max_pixels: String,
    request_id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FileExportOptions {
    file_format: &'static str,
    drive_destination: DriveDestination,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DriveDestination {
    folder: String,
    filename_prefix: String,
}

impl From<&ExportRequest> for ExportImageBody {
    fn from(request: &ExportRequest) -> Self {
        Self {
            expression: request.expression(),
            description: request.description.clone(),
            file_export_options: FileExportOptions {
                file_format: "GEO_TIFF",
                drive_destination: DriveDestination {
                    folder: request.folder.clone(),
                    filename_prefix: request.file_name_prefix.clone(),
                },
            },
            max_pixels: request.max_pixels.to_string(),
            request_id: request.request_id.clone(),
        }
    }
}

/// Resource returned by `projects.maps.create`.
#[derive(Deserialize)]
struct EarthEngineMap {
    name: String,
}

/// Long-running operation returned by `projects.image.export`.
#[derive(Deserialize)]
struct Operation {
    name: String,
}

/// Google API error envelope.
#[derive(Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl ImageryService for LiveEarthEngine {
    fn create_map(&self, request: &MapRequest) -> ImageryFuture<'_, TileSource> {
        let body = CreateMapBody::from(request);

        Box::pin(async move {
            let map: EarthEngineMap = self.post(self.project_url("maps"), &body).await?;
            let url_template =
                format!("{}/{}/tiles/{{z}}/{{x}}/{{y}}", self.api_base, map.name);
            info!(map = %map.name, "map created");
            Ok(TileSource {
                name: map.name,
                url_template,
            })
        })
    }

    fn start_export(&self, request: &ExportRequest) -> ImageryFuture<'_, ExportTicket> {
        let body = ExportImageBody::from(request);

        Box::pin(async move {
            let operation: Operation =
                self.post(self.project_url("image:export"), &body).await?;
            info!(
                operation = %operation.name,
                description = %body.description,
                "export started"
            );
            Ok(ExportTicket {
                operation: operation.name,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::earthengine::{Geometry, ImageCollection};
    use crate::map::CHANGE_VIS;
    use serde_json::json;

    #[test]
    fn map_body_carries_stretch_and_palette() {
        let request = MapRequest {
            image: ImageCollection::load("X").median(),
            vis: CHANGE_VIS,
        };
        let body = serde_json::to_value(CreateMapBody::from(&request)).unwrap();

        assert_eq!(body["fileFormat"], "AUTO");
        assert_eq!(
            body["visualizationOptions"]["ranges"],
            json!([{"min": -0.5, "max": 0.5}])
        );
        assert_eq!(
            body["visualizationOptions"]["paletteColors"],
            json!(["red", "white", "green"])
        );
        assert_eq!(body["expression"]["result"], "0");
    }

    #[test]
    fn export_body_targets_drive_folder() {
        let request = ExportRequest {
            image: ImageCollection::load("X").median(),
            description: "NDVI_Diff_2018_to_2022".into(),
            folder: "EarthEngineExports".into(),
            file_name_prefix: "NDVI_Diff_2018_to_2022".into(),
            region: Geometry::rectangle(0.0, 0.0, 1.0, 1.0),
            scale: 30.0,
            max_pixels: 10_000_000_000_000,
            request_id: "req-1".into(),
        };
        let body = serde_json::to_value(ExportImageBody::from(&request)).unwrap();

        assert_eq!(body["description"], "NDVI_Diff_2018_to_2022");
        assert_eq!(body["maxPixels"], "10000000000000");
        assert_eq!(body["requestId"], "req-1");
        assert_eq!(body["fileExportOptions"]["fileFormat"], "GEO_TIFF");
        assert_eq!(
            body["fileExportOptions"]["driveDestination"],
            json!({"folder": "EarthEngineExports", "filenamePrefix": "NDVI_Diff_2018_to_2022"})
        );
        assert_eq!(
            body["expression"]["values"]["0"]["functionInvocationValue"]["functionName"],
            "Image.clipToBoundsAndScale"
        );
    }
}
