//! Document Text Extractor: converts uploaded document bytes into plain text.
//!
//! The caller declares the format; bytes are never sniffed. A document whose
//! extracted text is blank is rejected before any generation is attempted.

pub mod docx;
pub mod pdf;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Document contains no readable text")]
    EmptyDocument,

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),
}

/// Declared document format, chosen by the user's upload option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    #[serde(rename = "text")]
    PlainText,
    Pdf,
    Word,
}

impl DocumentFormat {
    /// File extensions the upload picker offers for this format.
    pub fn accepted_extensions(self) -> &'static [&'static str] {
        match self {
            DocumentFormat::PlainText => &["txt", "md"],
            DocumentFormat::Pdf => &["pdf"],
            DocumentFormat::Word => &["docx"],
        }
    }

    /// Whether `file_name` carries one of this format's extensions (case-insensitive).
    pub fn accepts(self, file_name: &str) -> bool {
        let Some((_, ext)) = file_name.rsplit_once('.') else {
            return false;
        };
        self.accepted_extensions()
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(ext))
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DocumentFormat::PlainText => "text",
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Word => "word",
        })
    }
}

impl FromStr for DocumentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" | "plain" | "plaintext" => Ok(DocumentFormat::PlainText),
            "pdf" => Ok(DocumentFormat::Pdf),
            "word" | "docx" => Ok(DocumentFormat::Word),
            other => Err(format!(
                "Unsupported document format '{other}'. Use 'text', 'pdf' or 'word'."
            )),
        }
    }
}

/// Extracts plain text from `bytes` according to the declared `format`.
///
/// Fails with `EmptyDocument` when the result is blank after trimming.
pub fn extract(bytes: &[u8], format: DocumentFormat) -> Result<String, ExtractError> {
    let text = match format {
        DocumentFormat::PlainText => String::from_utf8_lossy(bytes).into_owned(),
        DocumentFormat::Pdf => pdf::extract_pdf_text(bytes)?,
        DocumentFormat::Word => docx::extract_docx_text(bytes)?,
    };

    if text.trim().is_empty() {
        warn!("Extracted {format} document is blank ({} bytes in)", bytes.len());
        return Err(ExtractError::EmptyDocument);
    }

    debug!(
        "Extracted {} chars from {format} document ({} bytes)",
        text.chars().count(),
        bytes.len()
    );
    Ok(text)
}

/// Runs `extract` on the blocking pool; both parsers are CPU-bound.
pub async fn extract_blocking(
    bytes: bytes::Bytes,
    format: DocumentFormat,
) -> Result<String, ExtractError> {
    tokio::task::spawn_blocking(move || extract(&bytes, format))
        .await
        .map_err(|e| ExtractError::ExtractionFailed(format!("extraction task failed: {e}")))?
}
