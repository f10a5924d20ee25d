//! # Extraction Route Handlers
//!
//! The two thin callers of the core extractor: one resolves a local path or
//! annotated-path reference, the other reads an uploaded file from a
//! multipart body. Both produce the same `ExtractResponse` envelope.

use super::{AppError, AppState, ExtractResponse};
use axum::{extract::State, Json};
use axum_extra::extract::Multipart;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};
use workflow_importer::{
    extract, load_image_metadata, read_png_metadata, resolve_annotated, resolve_image_path,
    FolderType,
};

/// The request body for `POST /workflow_importer/extract`.
///
/// Either `image_path` (optionally annotated, e.g. `img.png [output]`) or
/// the `filename`/`subfolder`/`type` triple from an upload response.
#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub image_path: Option<String>,
    pub filename: Option<String>,
    #[serde(default)]
    pub subfolder: String,
    #[serde(rename = "type", default)]
    pub folder_type: FolderType,
}

/// The handler for `POST /workflow_importer/extract`.
///
/// Resolves the referenced image on local storage, reads its text metadata,
/// and runs the extractor.
pub async fn extract_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<ExtractResponse>, AppError> {
    let request: ExtractRequest = serde_json::from_value(payload)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {e}")))?;

    let path = if let Some(image_path) = request.image_path.as_deref() {
        resolve_annotated(&app_state.dirs, image_path)?
    } else if let Some(filename) = request.filename.as_deref() {
        resolve_image_path(&app_state.dirs, filename, &request.subfolder, request.folder_type)?
    } else {
        return Err(AppError::BadRequest(
            "Missing required parameter: provide 'image_path' or 'filename'".to_string(),
        ));
    };

    info!("Extracting workflow metadata from '{}'", path.display());
    let metadata = load_image_metadata(&path).await?;
    Ok(Json(extract(&metadata).into()))
}

/// The handler for `POST /workflow_importer/extract_from_data`.
///
/// Reads the raw image bytes from the `image` multipart field and runs the
/// extractor on its text metadata.
pub async fn extract_from_data_handler(
    State(_app_state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractResponse>, AppError> {
    let mut image_data: Option<Vec<u8>> = None;
    let mut source_name: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "image" => {
                source_name = field.file_name().map(str::to_string);
                image_data = Some(field.bytes().await.map_err(anyhow::Error::from)?.to_vec());
            }
            other => warn!("Ignoring unknown multipart field: {other}"),
        }
    }

    let image_data = image_data
        .ok_or_else(|| AppError::BadRequest("Missing multipart field 'image'".to_string()))?;

    info!(
        "Extracting workflow metadata from uploaded image '{}' ({} bytes)",
        source_name.as_deref().unwrap_or("unnamed"),
        image_data.len()
    );
    let metadata = read_png_metadata(&image_data)?;
    Ok(Json(extract(&metadata).into()))
}
