//! Session state machine. `SessionState::apply` is pure: it never touches the
//! network, the clock or storage. Side effects are returned as `Effect`s for
//! the controller to perform.
//!
//! ```text
//! Idle ──Submit/BeginUpload──▶ Submitting ──Succeeded──▶ Success
//!                                   │                       │
//!                                   └──────Failed─────▶ Failed
//! Success | Failed ──(next user event)──▶ Idle / Submitting
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::{AppError, GENERIC_FAILURE_MESSAGE};
use crate::models::{NoteHistoryItem, StudyNotes};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Submitting,
    Success,
    Failed,
}

#[derive(Debug, Clone)]
pub enum Event {
    /// The user edited the input box.
    EditInput(String),
    /// Generate from typed text.
    Submit(String),
    /// A file upload started; text arrives later via `Extracted`.
    BeginUpload,
    Extracted(String),
    Succeeded(NoteHistoryItem),
    Failed(String),
    Acknowledge,
    /// Bring a history entry back on screen.
    Restore(NoteHistoryItem),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Generate(String),
    Record(NoteHistoryItem),
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionState {
    pub phase: Phase,
    pub input_text: String,
    pub current_notes: Option<StudyNotes>,
    pub error: Option<String>,
    /// When the in-flight submission started; drives the progress messages.
    pub submitted_at: Option<DateTime<Utc>>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            input_text: String::new(),
            current_notes: None,
            error: None,
            submitted_at: None,
        }
    }
}

impl SessionState {
    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    /// Applies `event` at instant `now`, returning the side effect to perform.
    ///
    /// Rejected events leave the state untouched.
    pub fn apply(&mut self, event: Event, now: DateTime<Utc>) -> Result<Effect, AppError> {
        match event {
            Event::EditInput(text) => {
                self.reject_if_submitting()?;
                self.acknowledge();
                self.input_text = text;
                Ok(Effect::None)
            }
            Event::Submit(text) => {
                self.reject_if_submitting()?;
                if text.trim().is_empty() {
                    return Err(AppError::Validation(
                        "Enter some text to generate notes from".to_string(),
                    ));
                }
                self.begin_submitting(now);
                self.input_text = text.clone();
                Ok(Effect::Generate(text))
            }
            Event::BeginUpload => {
                self.reject_if_submitting()?;
                self.begin_submitting(now);
                Ok(Effect::None)
            }
            Event::Extracted(text) => {
                self.require_submitting("extracted text")?;
                self.input_text = text.clone();
                Ok(Effect::Generate(text))
            }
            Event::Succeeded(item) => {
                self.require_submitting("a generation result")?;
                self.phase = Phase::Success;
                self.submitted_at = None;
                self.current_notes = Some(item.notes.clone());
                Ok(Effect::Record(item))
            }
            Event::Failed(message) => {
                self.require_submitting("a generation failure")?;
                self.phase = Phase::Failed;
                self.submitted_at = None;
                self.error = Some(if message.trim().is_empty() {
                    GENERIC_FAILURE_MESSAGE.to_string()
                } else {
                    message
                });
                Ok(Effect::None)
            }
            Event::Acknowledge => {
                self.acknowledge();
                Ok(Effect::None)
            }
            Event::Restore(item) => {
                self.reject_if_submitting()?;
                self.acknowledge();
                self.input_text = item.original_text;
                self.current_notes = Some(item.notes);
                Ok(Effect::None)
            }
        }
    }

    fn begin_submitting(&mut self, now: DateTime<Utc>) {
        self.phase = Phase::Submitting;
        self.error = None;
        self.submitted_at = Some(now);
    }

    /// Leaves Success/Failed for Idle; the result or error stays on screen
    /// until the next submission replaces it.
    fn acknowledge(&mut self) {
        if matches!(self.phase, Phase::Success | Phase::Failed) {
            self.phase = Phase::Idle;
        }
    }

    fn reject_if_submitting(&self) -> Result<(), AppError> {
        if self.is_submitting() {
            return Err(AppError::Busy);
        }
        Ok(())
    }

    fn require_submitting(&self, what: &str) -> Result<(), AppError> {
        if !self.is_submitting() {
            return Err(AppError::Internal(anyhow::anyhow!(
                "received {what} while {:?}",
                self.phase
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::notes::fixtures::sample_notes;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    fn item(topic: &str, text: &str) -> NoteHistoryItem {
        NoteHistoryItem::new(text.to_string(), sample_notes(topic))
    }

    #[test]
    fn test_submit_moves_to_submitting_and_requests_generation() {
        let mut state = SessionState::default();
        let effect = state.apply(Event::Submit("Cells divide.".into()), now()).unwrap();

        assert_eq!(effect, Effect::Generate("Cells divide.".into()));
        assert_eq!(state.phase, Phase::Submitting);
        assert_eq!(state.input_text, "Cells divide.");
        assert!(state.submitted_at.is_some());
    }

    #[test]
    fn test_blank_submit_is_rejected_without_state_change() {
        let mut state = SessionState::default();
        let err = state.apply(Event::Submit("  \n ".into()), now()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(state.phase, Phase::Idle);
    }

    #[test]
    fn test_second_submit_while_in_flight_is_busy() {
        let mut state = SessionState::default();
        state.apply(Event::Submit("one".into()), now()).unwrap();
        let err = state.apply(Event::Submit("two".into()), now()).unwrap_err();
        assert!(matches!(err, AppError::Busy));
        assert_eq!(state.input_text, "one");

        assert!(matches!(
            state.apply(Event::BeginUpload, now()),
            Err(AppError::Busy)
        ));
    }

    #[test]
    fn test_success_sets_current_notes_and_records() {
        let mut state = SessionState::default();
        state.apply(Event::Submit("text".into()), now()).unwrap();
        let done = item("Photosynthesis", "text");
        let effect = state.apply(Event::Succeeded(done.clone()), now()).unwrap();

        assert_eq!(effect, Effect::Record(done));
        assert_eq!(state.phase, Phase::Success);
        assert_eq!(
            state.current_notes.as_ref().unwrap().topic_overview,
            "Photosynthesis"
        );
        assert!(state.submitted_at.is_none());
    }

    #[test]
    fn test_failure_surfaces_message_and_records_nothing() {
        let mut state = SessionState::default();
        state.apply(Event::Submit("text".into()), now()).unwrap();
        let effect = state.apply(Event::Failed("quota exceeded".into()), now()).unwrap();

        assert_eq!(effect, Effect::None);
        assert_eq!(state.phase, Phase::Failed);
        assert_eq!(state.error.as_deref(), Some("quota exceeded"));
    }

    #[test]
    fn test_blank_failure_message_uses_generic_fallback() {
        let mut state = SessionState::default();
        state.apply(Event::Submit("text".into()), now()).unwrap();
        state.apply(Event::Failed(String::new()), now()).unwrap();
        assert_eq!(state.error.as_deref(), Some(GENERIC_FAILURE_MESSAGE));
    }

    #[test]
    fn test_upload_flow_generates_after_extraction() {
        let mut state = SessionState::default();
        assert_eq!(state.apply(Event::BeginUpload, now()).unwrap(), Effect::None);
        assert_eq!(state.phase, Phase::Submitting);

        let effect = state.apply(Event::Extracted("from pdf".into()), now()).unwrap();
        assert_eq!(effect, Effect::Generate("from pdf".into()));
        assert_eq!(state.input_text, "from pdf");
    }

    #[test]
    fn test_results_outside_submitting_are_rejected() {
        let mut state = SessionState::default();
        assert!(state
            .apply(Event::Succeeded(item("x", "y")), now())
            .is_err());
        assert!(state.apply(Event::Extracted("x".into()), now()).is_err());
        assert!(state.current_notes.is_none());
    }

    #[test]
    fn test_acknowledge_returns_to_idle_keeping_result() {
        let mut state = SessionState::default();
        state.apply(Event::Submit("text".into()), now()).unwrap();
        state.apply(Event::Succeeded(item("Topic", "text")), now()).unwrap();
        state.apply(Event::Acknowledge, now()).unwrap();

        assert_eq!(state.phase, Phase::Idle);
        assert!(state.current_notes.is_some());
    }

    #[test]
    fn test_next_submit_clears_previous_error() {
        let mut state = SessionState::default();
        state.apply(Event::Submit("a".into()), now()).unwrap();
        state.apply(Event::Failed("boom".into()), now()).unwrap();
        state.apply(Event::Submit("b".into()), now()).unwrap();

        assert_eq!(state.phase, Phase::Submitting);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_restore_overwrites_notes_and_input() {
        let mut state = SessionState::default();
        let saved = item("Saved topic", "saved source");

        state.apply(Event::Restore(saved.clone()), now()).unwrap();
        let first = (state.input_text.clone(), state.current_notes.clone());
        state.apply(Event::Restore(saved), now()).unwrap();

        assert_eq!(state.input_text, "saved source");
        assert_eq!(
            state.current_notes.as_ref().unwrap().topic_overview,
            "Saved topic"
        );
        assert_eq!((state.input_text.clone(), state.current_notes.clone()), first);
    }

    #[test]
    fn test_edit_input_while_submitting_is_busy() {
        let mut state = SessionState::default();
        state.apply(Event::Submit("a".into()), now()).unwrap();
        assert!(matches!(
            state.apply(Event::EditInput("b".into()), now()),
            Err(AppError::Busy)
        ));
    }
}
