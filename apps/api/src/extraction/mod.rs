//! Text extraction: turns an uploaded document into normalized lowercase text.
//!
//! `AppState` holds an `Arc<dyn TextExtractor>` so handlers never depend on a
//! concrete document parser.

use async_trait::async_trait;
use bytes::Bytes;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unable to extract text from resume")]
    Empty,

    #[error("Unable to read document '{filename}': {reason}")]
    Unreadable { filename: String, reason: String },
}

/// An uploaded file: original filename plus raw bytes.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub data: Bytes,
}

#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Returns normalized text, or an error when nothing usable was found.
    async fn extract(&self, upload: &Upload) -> Result<String, ExtractError>;
}

// ────────────────────────────────────────────────────────────────────────────
// DocumentExtractor, PDF via pdf-extract, plain text/markdown decoded directly
// ────────────────────────────────────────────────────────────────────────────

pub struct DocumentExtractor {
    whitespace: Regex,
}

impl DocumentExtractor {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            whitespace: Regex::new(r"\s+")?,
        })
    }

    /// Collapses whitespace runs to a single space, lowercases and trims.
    pub fn normalize(&self, raw: &str) -> String {
        self.whitespace
            .replace_all(raw, " ")
            .trim()
            .to_lowercase()
    }
}

#[async_trait]
impl TextExtractor for DocumentExtractor {
    async fn extract(&self, upload: &Upload) -> Result<String, ExtractError> {
        let raw = match DocumentKind::from_filename(&upload.filename) {
            DocumentKind::PlainText => String::from_utf8_lossy(&upload.data).into_owned(),
            DocumentKind::Pdf => {
                // pdf-extract is CPU-bound and synchronous
                let data = upload.data.clone();
                tokio::task::spawn_blocking(move || {
                    pdf_extract::extract_text_from_mem(&data).map_err(|e| e.to_string())
                })
                .await
                .map_err(|e| e.to_string())
                .and_then(|parsed| parsed)
                .map_err(|reason| ExtractError::Unreadable {
                    filename: upload.filename.clone(),
                    reason,
                })?
            }
        };

        let text = self.normalize(&raw);
        debug!(
            filename = %upload.filename,
            chars = text.len(),
            "Extracted resume text"
        );
        if text.is_empty() {
            return Err(ExtractError::Empty);
        }
        Ok(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentKind {
    Pdf,
    PlainText,
}

impl DocumentKind {
    /// Anything not recognisably plain text is treated as PDF.
    fn from_filename(filename: &str) -> Self {
        let lower = filename.to_lowercase();
        if lower.ends_with(".txt") || lower.ends_with(".md") {
            DocumentKind::PlainText
        } else {
            DocumentKind::Pdf
        }
    }
}
