use crate::models::StudyNotes;

/// Plain-text digest for the clipboard: overview, explanation and key points.
pub fn clipboard_digest(notes: &StudyNotes) -> String {
    let key_points = notes
        .key_points
        .iter()
        .map(|point| format!("- {point}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Topic Overview\n{}\n\nDetailed Explanation\n{}\n\nKey Points\n{}",
        notes.topic_overview.trim(),
        notes.detailed_explanation.trim(),
        key_points
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::notes::fixtures::sample_notes;

    #[test]
    fn test_digest_contains_overview_explanation_and_points() {
        let notes = sample_notes("Photosynthesis");
        let digest = clipboard_digest(&notes);

        assert!(digest.starts_with("Topic Overview\nPhotosynthesis\n\n"));
        assert!(digest.contains("Detailed Explanation\nPhotosynthesis is the first idea."));
        assert!(digest.ends_with("Key Points\n- Point one\n- Point two"));
    }

    #[test]
    fn test_digest_leaves_out_questions_and_tips() {
        let digest = clipboard_digest(&sample_notes("Cells"));
        assert!(!digest.contains("Which is correct?"));
        assert!(!digest.contains("Define every term"));
    }
}
