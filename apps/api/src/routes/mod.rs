pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::generation::handlers::{self as notes, MAX_UPLOAD_BYTES};
use crate::history::handlers as history;
use crate::state::AppState;
use crate::workflow::handlers as session;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Session
        .route("/api/v1/session", get(session::handle_get_session))
        .route("/api/v1/session/input", put(session::handle_edit_input))
        .route(
            "/api/v1/session/acknowledge",
            post(session::handle_acknowledge),
        )
        // Generation and export
        .route("/api/v1/notes", post(notes::handle_generate))
        .route(
            "/api/v1/notes/upload",
            post(notes::handle_upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/api/v1/notes/current/print", get(notes::handle_print))
        .route("/api/v1/notes/current/digest", get(notes::handle_digest))
        // History and preferences
        .route(
            "/api/v1/history",
            get(history::handle_list_history).delete(history::handle_clear_history),
        )
        .route(
            "/api/v1/history/:id/select",
            post(history::handle_select_history),
        )
        .route(
            "/api/v1/preferences/theme",
            get(history::handle_get_theme).put(history::handle_set_theme),
        )
        .with_state(state)
}
