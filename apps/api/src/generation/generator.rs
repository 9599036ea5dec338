//! Notes Generator: turns submitted text into a `StudyNotes` value.
//!
//! Pluggable, trait-based: `AppState` carries an `Arc<dyn NotesGenerator>`.
//! Default: `LlmNotesGenerator` (one Gemini call per generation).
//!
//! Failure translation happens in exactly one place: anything that cannot be
//! decoded into `StudyNotes` becomes `AppError::ResponseMalformed`. Transport,
//! auth and quota failures keep the transport's own message.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::prompts::study_notes_system;
use crate::generation::schema::study_notes_schema;
use crate::llm_client::{parse_json_text, LlmClient, LlmError};
use crate::models::StudyNotes;

/// Question-set sizes the system instruction asks for.
const EXPECTED_MCQS: usize = 3;
const EXPECTED_SHORT_ANSWERS: usize = 3;

/// The notes generator trait. Implement this to swap backends without touching
/// the workflow or the routes.
#[async_trait]
pub trait NotesGenerator: Send + Sync {
    async fn generate(&self, source_text: &str) -> Result<StudyNotes, AppError>;
}

/// Gemini-backed generator with the fixed system instruction and response schema.
pub struct LlmNotesGenerator {
    llm: LlmClient,
    system: String,
}

impl LlmNotesGenerator {
    pub fn new(llm: LlmClient) -> Self {
        Self {
            llm,
            system: study_notes_system(),
        }
    }
}

#[async_trait]
impl NotesGenerator for LlmNotesGenerator {
    async fn generate(&self, source_text: &str) -> Result<StudyNotes, AppError> {
        info!("Requesting study notes for {} chars of input", source_text.chars().count());

        let response = self
            .llm
            .call(source_text, &self.system, study_notes_schema())
            .await?;
        let Some(text) = response.text() else {
            warn!(
                "Model returned no text (finish_reason={:?})",
                response.finish_reason()
            );
            return Err(LlmError::EmptyContent.into());
        };
        let notes = decode_notes(&text)?;

        check_question_counts(&notes);
        info!("Generated study notes: topic={:?}", notes.topic_overview);
        Ok(notes)
    }
}

/// Decodes model output into `StudyNotes`, failing closed on any shape mismatch.
pub fn decode_notes(text: &str) -> Result<StudyNotes, AppError> {
    parse_json_text::<StudyNotes>(text).map_err(|e| {
        warn!("Study notes response could not be decoded: {e}");
        AppError::ResponseMalformed
    })
}

/// Counts are a prompt-level contract; a deviation is logged, not rejected.
fn check_question_counts(notes: &StudyNotes) {
    let questions = &notes.study_questions;
    if questions.mcqs.len() != EXPECTED_MCQS {
        warn!(
            "Model returned {} MCQs (expected {EXPECTED_MCQS})",
            questions.mcqs.len()
        );
    }
    if questions.short_answers.len() != EXPECTED_SHORT_ANSWERS {
        warn!(
            "Model returned {} short-answer questions (expected {EXPECTED_SHORT_ANSWERS})",
            questions.short_answers.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::notes::fixtures::sample_notes_json;

    #[test]
    fn test_decode_well_formed_response() {
        let text = sample_notes_json("Photosynthesis").to_string();
        let notes = decode_notes(&text).unwrap();
        assert_eq!(notes.topic_overview, "Photosynthesis");
        assert_eq!(notes.study_questions.mcqs[0].answer, "B");
    }

    #[test]
    fn test_decode_fenced_response() {
        let text = format!("```json\n{}\n```", sample_notes_json("Mitosis"));
        assert_eq!(decode_notes(&text).unwrap().topic_overview, "Mitosis");
    }

    #[test]
    fn test_invalid_json_is_response_malformed() {
        let err = decode_notes("{\"topicOverview\": \"Photosynthesis\", ").unwrap_err();
        assert!(matches!(err, AppError::ResponseMalformed));
        assert!(err.user_message().contains("shorter"));
    }

    #[test]
    fn test_missing_top_level_key_is_response_malformed() {
        let mut value = sample_notes_json("Mitosis");
        value.as_object_mut().unwrap().remove("examTips");
        let err = decode_notes(&value.to_string()).unwrap_err();
        assert!(matches!(err, AppError::ResponseMalformed));
    }

    #[test]
    fn test_unexpected_counts_still_decode() {
        let mut value = sample_notes_json("Mitosis");
        value["studyQuestions"]["mcqs"] = serde_json::json!([]);
        let notes = decode_notes(&value.to_string()).unwrap();
        check_question_counts(&notes);
        assert!(notes.study_questions.mcqs.is_empty());
    }
}
