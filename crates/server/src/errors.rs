use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;
use workflow_importer::ExtractError;

/// A custom error type for the server application.
///
/// This enum encapsulates the different kinds of errors that can occur
/// within the server, allowing them to be converted into appropriate HTTP
/// responses.
pub enum AppError {
    /// The request was malformed or missing a required parameter.
    BadRequest(String),
    /// Errors from the `workflow-importer` I/O collaborators.
    Extract(ExtractError),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        AppError::Extract(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Extract(err) => match err {
                ExtractError::NotFound(path) => (
                    StatusCode::NOT_FOUND,
                    format!("Image file not found: {}", path.display()),
                ),
                ExtractError::InvalidPng(e) => {
                    (StatusCode::BAD_REQUEST, format!("Not a valid PNG image: {e}"))
                }
                ExtractError::InvalidPath(e) => {
                    (StatusCode::BAD_REQUEST, format!("Invalid image path: {e}"))
                }
                ExtractError::Io(e) => {
                    error!("I/O error while reading image: {e:?}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Failed to read image file: {e}"),
                    )
                }
            },
            AppError::Internal(err) => {
                error!("Internal server error: {err:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "success": false,
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}
