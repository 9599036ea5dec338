//! Structured-output schema sent with every generation request.
//!
//! Mirrors `models::notes::StudyNotes` field for field, using the OpenAPI
//! subset the Gemini API accepts. Every key is required at every level.

use std::sync::OnceLock;

use serde_json::{json, Value};

fn string() -> Value {
    json!({ "type": "STRING" })
}

fn string_list() -> Value {
    json!({ "type": "ARRAY", "items": string() })
}

/// The response schema, built once.
pub fn study_notes_schema() -> &'static Value {
    static SCHEMA: OnceLock<Value> = OnceLock::new();
    SCHEMA.get_or_init(build_schema)
}

fn build_schema() -> Value {
    let mcq = json!({
        "type": "OBJECT",
        "properties": {
            "question": string(),
            "options": string_list(),
            "answer": string(),
        },
        "required": ["question", "options", "answer"],
    });

    let short_answer = json!({
        "type": "OBJECT",
        "properties": {
            "question": string(),
            "answer": string(),
        },
        "required": ["question", "answer"],
    });

    let exam_style = json!({
        "type": "OBJECT",
        "properties": {
            "question": string(),
            "modelAnswer": string(),
        },
        "required": ["question", "modelAnswer"],
    });

    json!({
        "type": "OBJECT",
        "properties": {
            "topicOverview": string(),
            "detailedExplanation": string(),
            "keyPoints": string_list(),
            "examples": string_list(),
            "commonMistakes": string_list(),
            "examTips": string_list(),
            "studyQuestions": {
                "type": "OBJECT",
                "properties": {
                    "mcqs": { "type": "ARRAY", "items": mcq },
                    "shortAnswers": { "type": "ARRAY", "items": short_answer },
                    "examStyle": exam_style,
                },
                "required": ["mcqs", "shortAnswers", "examStyle"],
            },
        },
        "required": [
            "topicOverview",
            "detailedExplanation",
            "keyPoints",
            "examples",
            "commonMistakes",
            "examTips",
            "studyQuestions",
        ],
    })
}
