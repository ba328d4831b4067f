//! Quizsmith document processing
//!
//! Upload validation, per-request temporary files and plain-text extraction for the
//! supported document formats (PDF and DOCX).

pub mod document;
pub mod upload;
pub mod validator;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use document::{
    extract_text, DocumentKind, DocxExtractor, Extraction, LayoutTextSource,
    PageStreamTextSource, PdfExtractor, PdfPageSource,
};
pub use upload::{extract_document, TempUpload};
pub use validator::{UploadValidator, ValidationError};
