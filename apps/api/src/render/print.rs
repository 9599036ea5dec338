//! Print-oriented HTML rendering of a study pack.

use std::fmt::Write;

use crate::models::StudyNotes;

const PRINT_STYLES: &str = "\
body{font-family:Georgia,serif;max-width:46rem;margin:2rem auto;line-height:1.5;color:#111}\
h1{font-size:1.6rem;border-bottom:2px solid #111;padding-bottom:.3rem}\
h2{font-size:1.2rem;margin-top:1.8rem}\
section{page-break-inside:avoid}\
ol.options{list-style-type:upper-alpha}\
.answer{font-style:italic}\
@media print{body{margin:0}a{color:inherit}}";

/// Renders `notes` as a standalone HTML document ready for print-to-PDF.
pub fn render_print_html(notes: &StudyNotes) -> String {
    let mut html = String::new();
    let title = escape(&notes.topic_overview);

    // Writing into a String never fails.
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Study Pack: {title}</title>\n<style>{PRINT_STYLES}</style>\n</head>\n<body>\n\
         <h1>Study Pack</h1>\n"
    );

    section(&mut html, "Topic Overview", |out| {
        let _ = writeln!(out, "<p>{title}</p>");
    });

    section(&mut html, "Detailed Explanation", |out| {
        for paragraph in notes.paragraphs() {
            let _ = writeln!(out, "<p>{}</p>", escape(paragraph));
        }
    });

    list_section(&mut html, "Key Points", &notes.key_points);
    list_section(&mut html, "Examples", &notes.examples);
    list_section(&mut html, "Common Mistakes", &notes.common_mistakes);
    list_section(&mut html, "Exam Tips", &notes.exam_tips);

    let questions = &notes.study_questions;
    section(&mut html, "Practice Questions", |out| {
        out.push_str("<h3>Multiple Choice</h3>\n<ol>\n");
        for mcq in &questions.mcqs {
            let _ = write!(out, "<li><p>{}</p>\n<ol class=\"options\">\n", escape(&mcq.question));
            for option in &mcq.options {
                let _ = writeln!(out, "<li>{}</li>", escape(option));
            }
            let _ = writeln!(
                out,
                "</ol>\n<p class=\"answer\">Answer: {}</p></li>",
                escape(&answer_label(&mcq.options, &mcq.answer))
            );
        }
        out.push_str("</ol>\n<h3>Short Answer</h3>\n<ol>\n");
        for short in &questions.short_answers {
            let _ = writeln!(
                out,
                "<li><p>{}</p>\n<p class=\"answer\">{}</p></li>",
                escape(&short.question),
                escape(&short.answer)
            );
        }
        out.push_str("</ol>\n<h3>Exam-Style Question</h3>\n");
        let _ = writeln!(
            out,
            "<p>{}</p>\n<h4>Model Answer</h4>\n<p class=\"answer\">{}</p>",
            escape(&questions.exam_style.question),
            escape(&questions.exam_style.model_answer)
        );
    });

    html.push_str("</body>\n</html>\n");
    html
}

fn section(html: &mut String, heading: &str, body: impl FnOnce(&mut String)) {
    let _ = writeln!(html, "<section>\n<h2>{heading}</h2>");
    body(html);
    html.push_str("</section>\n");
}

fn list_section(html: &mut String, heading: &str, items: &[String]) {
    section(html, heading, |out| {
        out.push_str("<ul>\n");
        for item in items {
            let _ = writeln!(out, "<li>{}</li>", escape(item));
        }
        out.push_str("</ul>\n");
    });
}

/// "B. Chlorophyll" when the answer matches an option, else the answer as given.
fn answer_label(options: &[String], answer: &str) -> String {
    options
        .iter()
        .position(|option| option.trim() == answer.trim())
        .and_then(|idx| u8::try_from(idx).ok().filter(|i| *i < 26))
        .map(|idx| format!("{}. {}", char::from(b'A' + idx), answer.trim()))
        .unwrap_or_else(|| answer.trim().to_string())
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::notes::fixtures::sample_notes;

    #[test]
    fn test_all_sections_render_in_order() {
        let html = render_print_html(&sample_notes("Photosynthesis"));
        let order = [
            "Topic Overview",
            "Detailed Explanation",
            "Key Points",
            "Examples",
            "Common Mistakes",
            "Exam Tips",
            "Practice Questions",
        ];
        let positions: Vec<usize> = order
            .iter()
            .map(|h| html.find(&format!("<h2>{h}</h2>")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_explanation_paragraphs_become_p_tags() {
        let html = render_print_html(&sample_notes("Cells"));
        assert!(html.contains("<p>Cells is the first idea.</p>"));
        assert!(html.contains("<p>It builds on the second idea.</p>"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let mut notes = sample_notes("a < b & \"c\"");
        notes.key_points = vec!["<script>alert(1)</script>".to_string()];
        let html = render_print_html(&notes);

        assert!(html.contains("a &lt; b &amp; &quot;c&quot;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_mcq_answer_is_lettered() {
        let html = render_print_html(&sample_notes("Cells"));
        assert!(html.contains("Answer: B. B"));
    }

    #[test]
    fn test_answer_label_falls_back_to_raw_answer() {
        let options = vec!["Mitochondria".to_string(), "Nucleus".to_string()];
        assert_eq!(answer_label(&options, "Nucleus"), "B. Nucleus");
        assert_eq!(answer_label(&options, "Ribosome"), "Ribosome");
    }
}
