use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::pipeline::extract::RawDocument;
use crate::pipeline::{run_pipeline, PipelineOutput};
use crate::state::AppState;

const FILE_FIELD: &str = "file";
const DEFAULT_TOP_N: usize = 5;

#[derive(Deserialize)]
pub struct AnalyzeQuery {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

/// POST /api/v1/analyze?top_n=N
///
/// Multipart form with one `file` part carrying the CV. The part's declared
/// content type selects the extraction path; anything but PDF/DOCX/plain text
/// is rejected with a typed error before any model call.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Query(params): Query<AnalyzeQuery>,
    mut multipart: Multipart,
) -> Result<Json<PipelineOutput>, AppError> {
    if params.top_n == 0 {
        return Err(AppError::Validation(
            "top_n must be at least 1".to_string(),
        ));
    }

    let mut document: Option<RawDocument> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let declared_media_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let filename = field.file_name().unwrap_or("upload").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?;

        document = Some(RawDocument {
            bytes,
            declared_media_type,
            filename,
        });
    }

    let document = document.ok_or_else(|| {
        AppError::Validation(format!("Missing multipart field '{FILE_FIELD}'"))
    })?;

    let output = run_pipeline(
        state.llm.as_ref(),
        state.catalog.as_ref(),
        &document,
        params.top_n,
    )
    .await?;

    Ok(Json(output))
}
