//! Generation Workflow: owns the session state and performs the effects its
//! transitions ask for.
//!
//! Flow (typed text): Submit → generate → Succeeded → record in history.
//! Flow (upload):     BeginUpload → extract → Extracted → generate → ...
//!
//! Any failure lands in `Failed` with one user-visible message; history is
//! only ever touched by a successful generation.

pub mod handlers;
pub mod progress;
pub mod state;

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::{extract_blocking, DocumentFormat};
use crate::generation::generator::NotesGenerator;
use crate::history::HistoryStore;
use crate::models::{NoteHistoryItem, StudyNotes};

use self::progress::status_message;
use self::state::{Effect, Event, Phase, SessionState};

/// What the presentation layer renders for the session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub phase: Phase,
    pub input_text: String,
    pub current_notes: Option<StudyNotes>,
    pub error: Option<String>,
    /// Rotating progress message, present only while submitting.
    pub status_message: Option<&'static str>,
}

pub struct Workflow {
    session: Mutex<SessionState>,
    history: Mutex<HistoryStore>,
    generator: Arc<dyn NotesGenerator>,
    max_input_chars: Option<usize>,
}

impl Workflow {
    pub fn new(
        generator: Arc<dyn NotesGenerator>,
        history: HistoryStore,
        max_input_chars: Option<usize>,
    ) -> Self {
        Self {
            session: Mutex::new(SessionState::default()),
            history: Mutex::new(history),
            generator,
            max_input_chars,
        }
    }

    /// Generates a study pack from typed text.
    pub async fn submit_text(self: &Arc<Self>, text: String) -> Result<StudyNotes, AppError> {
        self.check_length(&text)?;

        let effect = self.apply(Event::Submit(text)).await?;
        let Effect::Generate(source) = effect else {
            return Err(unexpected(effect));
        };

        // Detached so a dropped caller never cancels an in-flight request.
        let this = Arc::clone(self);
        let task = tokio::spawn(async move { this.generate_and_finish(source).await });
        self.join_generation(task).await
    }

    /// Extracts text from an uploaded document, then generates from it.
    pub async fn submit_document(
        self: &Arc<Self>,
        bytes: bytes::Bytes,
        format: DocumentFormat,
    ) -> Result<StudyNotes, AppError> {
        self.apply(Event::BeginUpload).await?;

        let this = Arc::clone(self);
        let task = tokio::spawn(async move { this.extract_and_generate(bytes, format).await });
        self.join_generation(task).await
    }

    /// Puts a history entry back on screen. No network or storage calls.
    pub async fn select_history(&self, id: Uuid) -> Result<SessionView, AppError> {
        let item = self
            .history
            .lock()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("History entry {id} not found")))?;

        self.apply(Event::Restore(item)).await?;
        Ok(self.snapshot().await)
    }

    pub async fn edit_input(&self, text: String) -> Result<SessionView, AppError> {
        self.apply(Event::EditInput(text)).await?;
        Ok(self.snapshot().await)
    }

    pub async fn acknowledge(&self) -> SessionView {
        // Acknowledge is accepted in every phase.
        let _ = self.apply(Event::Acknowledge).await;
        self.snapshot().await
    }

    pub async fn snapshot(&self) -> SessionView {
        let session = self.session.lock().await;
        let status_message = session
            .submitted_at
            .filter(|_| session.is_submitting())
            .map(|started| {
                let elapsed = (Utc::now() - started).to_std().unwrap_or_default();
                status_message(elapsed)
            });

        SessionView {
            phase: session.phase,
            input_text: session.input_text.clone(),
            current_notes: session.current_notes.clone(),
            error: session.error.clone(),
            status_message,
        }
    }

    pub async fn history(&self) -> Vec<NoteHistoryItem> {
        self.history.lock().await.items().to_vec()
    }

    pub async fn clear_history(&self) -> Result<(), AppError> {
        self.history.lock().await.clear()?;
        info!("History cleared");
        Ok(())
    }

    async fn extract_and_generate(
        &self,
        bytes: bytes::Bytes,
        format: DocumentFormat,
    ) -> Result<StudyNotes, AppError> {
        let extracted = extract_blocking(bytes, format)
            .await
            .map_err(AppError::from)
            .and_then(|text| self.check_length(&text).map(|()| text));

        let text = match extracted {
            Ok(text) => text,
            Err(e) => {
                warn!("Upload rejected before generation: {e}");
                self.apply(Event::Failed(e.user_message())).await?;
                return Err(e);
            }
        };

        let effect = self.apply(Event::Extracted(text)).await?;
        let Effect::Generate(source) = effect else {
            return Err(unexpected(effect));
        };
        self.generate_and_finish(source).await
    }

    async fn generate_and_finish(&self, source: String) -> Result<StudyNotes, AppError> {
        match self.generator.generate(&source).await {
            Ok(notes) => {
                let item = NoteHistoryItem::new(source, notes.clone());
                // Lock order: session, then history. Holding the session lock
                // keeps history order equal to completion order.
                let mut session = self.session.lock().await;
                if let Effect::Record(item) = session.apply(Event::Succeeded(item), Utc::now())? {
                    let id = item.id;
                    // A failed write loses only the history entry.
                    if let Err(e) = self.history.lock().await.record(item) {
                        error!("Failed to persist history entry {id}: {e}");
                    }
                }
                Ok(notes)
            }
            Err(e) => {
                warn!("Generation failed: {e}");
                self.apply(Event::Failed(e.user_message())).await?;
                Err(e)
            }
        }
    }

    /// Awaits a detached generation. A task that died without settling the
    /// session (a panic) is reported as Failed so the next submit is accepted.
    async fn join_generation(
        &self,
        task: JoinHandle<Result<StudyNotes, AppError>>,
    ) -> Result<StudyNotes, AppError> {
        match task.await {
            Ok(result) => result,
            Err(e) => {
                error!("Generation task aborted: {e}");
                let err = AppError::Internal(anyhow::anyhow!("generation task failed: {e}"));
                if let Err(state_err) = self.apply(Event::Failed(err.user_message())).await {
                    warn!("Session already settled after aborted task: {state_err}");
                }
                Err(err)
            }
        }
    }

    async fn apply(&self, event: Event) -> Result<Effect, AppError> {
        self.session.lock().await.apply(event, Utc::now())
    }

    fn check_length(&self, text: &str) -> Result<(), AppError> {
        match self.max_input_chars {
            Some(max) if text.chars().count() > max => Err(AppError::Validation(format!(
                "Text is too long ({} characters). Please keep it under {max} characters.",
                text.chars().count()
            ))),
            _ => Ok(()),
        }
    }
}

fn unexpected(effect: Effect) -> AppError {
    AppError::Internal(anyhow::anyhow!("unexpected workflow effect: {effect:?}"))
}
