use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::history::preferences::Theme;
use crate::state::AppState;
use crate::workflow::SessionView;

#[derive(Serialize)]
pub struct SessionResponse {
    #[serde(flatten)]
    pub session: SessionView,
    pub theme: Theme,
}

#[derive(Deserialize)]
pub struct EditInputRequest {
    pub text: String,
}

/// GET /api/v1/session
pub async fn handle_get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let session = state.workflow.snapshot().await;
    Json(SessionResponse {
        session,
        theme: state.preferences.theme(),
    })
}

/// PUT /api/v1/session/input
pub async fn handle_edit_input(
    State(state): State<AppState>,
    Json(req): Json<EditInputRequest>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(state.workflow.edit_input(req.text).await?))
}

/// POST /api/v1/session/acknowledge
pub async fn handle_acknowledge(State(state): State<AppState>) -> Json<SessionView> {
    Json(state.workflow.acknowledge().await)
}
