#![allow(dead_code)]

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::pipeline::PipelineError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Pipeline(e) => pipeline_response(e),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

/// Maps each pipeline failure to a status, stable code, and human-readable
/// message. Upstream causes are logged, not leaked to the client.
fn pipeline_response(error: &PipelineError) -> (StatusCode, &'static str, String) {
    match error {
        PipelineError::UnsupportedFormat { media_type } => (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "UNSUPPORTED_FORMAT",
            format!("Unsupported file type: {media_type}. Upload a PDF, DOCX, or plain-text CV."),
        ),
        PipelineError::ExtractionFailure { format, cause } => {
            tracing::error!("Extraction failure ({format}): {cause}");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EXTRACTION_FAILURE",
                format!("Could not read the uploaded {format} file. Check the file and try again."),
            )
        }
        PipelineError::Analysis { cause } => {
            tracing::error!("Analysis error: {cause}");
            (
                StatusCode::BAD_GATEWAY,
                "ANALYSIS_ERROR",
                "CV analysis failed. Please try again.".to_string(),
            )
        }
        PipelineError::MalformedResponse { snippet } => {
            tracing::error!("Malformed model response: {snippet}");
            (
                StatusCode::BAD_GATEWAY,
                "MALFORMED_RESPONSE",
                "The analysis service returned unusable data. Please try again.".to_string(),
            )
        }
        PipelineError::Matching { cause } => {
            tracing::error!("Matching error: {cause}");
            (
                StatusCode::BAD_GATEWAY,
                "MATCHING_ERROR",
                "Project matching failed. Please try again.".to_string(),
            )
        }
    }
}
