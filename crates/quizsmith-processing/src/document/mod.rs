//! Plain-text extraction from uploaded documents.
//!
//! Extraction never returns an error: every outcome, parser failures included, is
//! reported as an [`Extraction`] so callers decide how to surface it.

mod docx;
mod pdf;

pub use docx::{parse_paragraphs, read_paragraphs, DocxExtractor};
pub use pdf::{LayoutTextSource, PageStreamTextSource, PdfExtractor, PdfPageSource};

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "docx" => Some(DocumentKind::Docx),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Docx => "docx",
        }
    }
}

/// Outcome of a text extraction attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// Non-blank text was recovered
    Text(String),
    /// The document parsed but contained no visible text
    Empty,
    /// The parser failed; carries the reason
    Failed(String),
}

impl Extraction {
    /// Classify raw extractor output; whitespace-only text counts as empty.
    pub fn from_text(text: String) -> Self {
        if text.trim().is_empty() {
            Extraction::Empty
        } else {
            Extraction::Text(text)
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Extraction::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Extraction::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Short outcome label for logs
    pub fn outcome(&self) -> &'static str {
        match self {
            Extraction::Text(_) => "text",
            Extraction::Empty => "empty",
            Extraction::Failed(_) => "failed",
        }
    }
}

/// Extract plain text from the document at `path` with the extractor for `kind`.
pub fn extract_text(kind: DocumentKind, path: &Path) -> Extraction {
    match kind {
        DocumentKind::Pdf => PdfExtractor::default().extract(path),
        DocumentKind::Docx => DocxExtractor.extract(path),
    }
}

/// Run one extraction attempt, turning errors and parser panics into [`Extraction::Failed`].
pub(crate) fn run_guarded<F>(source: &str, extract: F) -> Extraction
where
    F: FnOnce() -> anyhow::Result<String>,
{
    match catch_unwind(AssertUnwindSafe(extract)) {
        Ok(Ok(text)) => Extraction::from_text(text),
        Ok(Err(e)) => {
            tracing::warn!(source = source, error = %format!("{:#}", e), "Text extraction failed");
            Extraction::Failed(format!("{:#}", e))
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::warn!(source = source, panic = %message, "Text extractor panicked");
            Extraction::Failed(format!("extractor panicked: {}", message))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_kind_from_extension() {
        assert_eq!(DocumentKind::from_extension("pdf"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_extension("DOCX"), Some(DocumentKind::Docx));
        assert_eq!(DocumentKind::from_extension("doc"), None);
    }

    #[test]
    fn test_from_text_classifies_blank_as_empty() {
        assert_eq!(Extraction::from_text(String::new()), Extraction::Empty);
        assert_eq!(Extraction::from_text(" \n\t".to_string()), Extraction::Empty);
        assert_eq!(
            Extraction::from_text(" hi ".to_string()),
            Extraction::Text(" hi ".to_string())
        );
    }

    #[test]
    fn test_failed_has_no_text() {
        let failed = Extraction::Failed("boom".to_string());
        assert_eq!(failed.text(), None);
        assert_eq!(failed.outcome(), "failed");
    }

    #[test]
    fn test_run_guarded_outcomes() {
        assert_eq!(
            run_guarded("test", || Ok("Text".to_string())),
            Extraction::Text("Text".to_string())
        );
        assert_eq!(run_guarded("test", || Ok("  ".to_string())), Extraction::Empty);
        assert_eq!(
            run_guarded("test", || Err(anyhow::anyhow!("bad header"))),
            Extraction::Failed("bad header".to_string())
        );
    }

    #[test]
    fn test_run_guarded_contains_panics() {
        let result = run_guarded("test", || -> anyhow::Result<String> {
            panic!("index out of bounds")
        });
        assert_eq!(
            result,
            Extraction::Failed("extractor panicked: index out of bounds".to_string())
        );
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("static message");
        assert_eq!(panic_message(payload.as_ref()), "static message");
        let payload: Box<dyn Any + Send> = Box::new(String::from("owned message"));
        assert_eq!(panic_message(payload.as_ref()), "owned message");
        let payload: Box<dyn Any + Send> = Box::new(42u32);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }
}
