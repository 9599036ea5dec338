//! Axum route handlers for generating and exporting study packs.

use axum::{
    extract::{Multipart, State},
    response::Html,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::extract::DocumentFormat;
use crate::models::StudyNotes;
use crate::render::{clipboard_digest, render_print_html};
use crate::state::AppState;

/// Upload size accepted by the upload route.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateNotesRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateNotesResponse {
    pub notes: StudyNotes,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/notes
///
/// Generates a study pack from typed text and records it in history.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateNotesRequest>,
) -> Result<Json<GenerateNotesResponse>, AppError> {
    let notes = state.workflow.submit_text(request.text).await?;
    Ok(Json(GenerateNotesResponse { notes }))
}

/// POST /api/v1/notes/upload
///
/// Multipart form with a `format` field (`text`, `pdf` or `word`) and one
/// `file` field. Text is extracted, then generated from like typed input.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<GenerateNotesResponse>, AppError> {
    let mut format: Option<DocumentFormat> = None;
    let mut file: Option<(String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid upload: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("format") => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid format field: {e}")))?;
                format = Some(raw.parse().map_err(AppError::Validation)?);
            }
            Some("file") => {
                if file.is_some() {
                    return Err(AppError::Validation(
                        "Upload one file at a time".to_string(),
                    ));
                }
                let file_name = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read file: {e}")))?;
                file = Some((file_name, data));
            }
            _ => {}
        }
    }

    let format = format.ok_or_else(|| {
        AppError::Validation("Choose an upload type: text, pdf or word".to_string())
    })?;
    let (file_name, data) =
        file.ok_or_else(|| AppError::Validation("No file was uploaded".to_string()))?;

    if !format.accepts(&file_name) {
        return Err(AppError::Validation(format!(
            "'{file_name}' is not a {format} file (expected .{})",
            format.accepted_extensions().join(" or .")
        )));
    }

    info!("Received {format} upload '{file_name}' ({} bytes)", data.len());
    let notes = state.workflow.submit_document(data, format).await?;
    Ok(Json(GenerateNotesResponse { notes }))
}

/// GET /api/v1/notes/current/print
pub async fn handle_print(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let notes = current_notes(&state).await?;
    Ok(Html(render_print_html(&notes)))
}

/// GET /api/v1/notes/current/digest
pub async fn handle_digest(State(state): State<AppState>) -> Result<String, AppError> {
    let notes = current_notes(&state).await?;
    Ok(clipboard_digest(&notes))
}

async fn current_notes(state: &AppState) -> Result<StudyNotes, AppError> {
    state
        .workflow
        .snapshot()
        .await
        .current_notes
        .ok_or_else(|| AppError::NotFound("No study pack has been generated yet".to_string()))
}
