use std::sync::Arc;

use crate::history::preferences::Preferences;
use crate::workflow::Workflow;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The single session's controller: current notes, input text and history.
    pub workflow: Arc<Workflow>,
    pub preferences: Arc<Preferences>,
}
