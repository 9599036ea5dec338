use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Paragraph delimiter inside `StudyNotes::detailed_explanation`.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// One generated study pack. Every field is required on decode, so a response
/// missing any of them is rejected rather than half-rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyNotes {
    pub topic_overview: String,
    pub detailed_explanation: String,
    pub key_points: Vec<String>,
    pub examples: Vec<String>,
    pub common_mistakes: Vec<String>,
    pub exam_tips: Vec<String>,
    pub study_questions: StudyQuestions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyQuestions {
    pub mcqs: Vec<MultipleChoiceQuestion>,
    pub short_answers: Vec<ShortAnswerQuestion>,
    pub exam_style: ExamStyleQuestion,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultipleChoiceQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortAnswerQuestion {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamStyleQuestion {
    pub question: String,
    pub model_answer: String,
}

impl StudyNotes {
    /// Explanation paragraphs, blank ones dropped.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.detailed_explanation
            .split(PARAGRAPH_SEPARATOR)
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

/// A persisted generation: the submitted text paired with its study pack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteHistoryItem {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub original_text: String,
    pub notes: StudyNotes,
}

impl NoteHistoryItem {
    pub fn new(original_text: String, notes: StudyNotes) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            original_text,
            notes,
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn sample_notes(topic: &str) -> StudyNotes {
        StudyNotes {
            topic_overview: topic.to_string(),
            detailed_explanation: format!(
                "{topic} is the first idea.\n\nIt builds on the second idea."
            ),
            key_points: vec!["Point one".to_string(), "Point two".to_string()],
            examples: vec!["A worked example".to_string()],
            common_mistakes: vec!["Confusing cause and effect; check the order".to_string()],
            exam_tips: vec!["Define every term you use".to_string()],
            study_questions: StudyQuestions {
                mcqs: vec![MultipleChoiceQuestion {
                    question: "Which is correct?".to_string(),
                    options: vec!["A".to_string(), "B".to_string(), "C".to_string()],
                    answer: "B".to_string(),
                }],
                short_answers: vec![ShortAnswerQuestion {
                    question: "Why?".to_string(),
                    answer: "Because.".to_string(),
                }],
                exam_style: ExamStyleQuestion {
                    question: "Discuss.".to_string(),
                    model_answer: "A full discussion.".to_string(),
                },
            },
        }
    }

    pub fn sample_notes_json(topic: &str) -> serde_json::Value {
        serde_json::to_value(sample_notes(topic)).unwrap()
    }
}
