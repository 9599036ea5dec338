use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::history::preferences::Theme;
use crate::models::NoteHistoryItem;
use crate::state::AppState;
use crate::workflow::SessionView;

#[derive(Serialize, Deserialize)]
pub struct ThemeBody {
    pub theme: Theme,
}

/// GET /api/v1/history
pub async fn handle_list_history(State(state): State<AppState>) -> Json<Vec<NoteHistoryItem>> {
    Json(state.workflow.history().await)
}

/// DELETE /api/v1/history
pub async fn handle_clear_history(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.workflow.clear_history().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/history/:id/select
pub async fn handle_select_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(state.workflow.select_history(id).await?))
}

/// GET /api/v1/preferences/theme
pub async fn handle_get_theme(State(state): State<AppState>) -> Json<ThemeBody> {
    Json(ThemeBody {
        theme: state.preferences.theme(),
    })
}

/// PUT /api/v1/preferences/theme
pub async fn handle_set_theme(
    State(state): State<AppState>,
    Json(body): Json<ThemeBody>,
) -> Result<Json<ThemeBody>, AppError> {
    state.preferences.set_theme(body.theme)?;
    Ok(Json(body))
}
