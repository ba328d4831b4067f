//! PDF text extraction with a layout-aware primary pass and a page-stream fallback.

use std::path::Path;

use anyhow::{anyhow, Context, Result};

use super::{run_guarded, Extraction};

/// A source of per-page text for a PDF on disk
pub trait PdfPageSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Text of every page in page order. Pages without text yield an empty string.
    fn page_texts(&self, path: &Path) -> Result<Vec<String>>;
}

/// Layout-aware extraction (reading-order reconstruction) via `pdf-extract`
#[derive(Debug, Default, Clone, Copy)]
pub struct LayoutTextSource;

impl PdfPageSource for LayoutTextSource {
    fn name(&self) -> &'static str {
        "layout"
    }

    fn page_texts(&self, path: &Path) -> Result<Vec<String>> {
        pdf_extract::extract_text_by_pages(path)
            .map_err(|e| anyhow!("Layout-aware extraction failed: {}", e))
    }
}

/// Page-stream extraction: raw text objects per page via `lopdf`, no layout
#[derive(Debug, Default, Clone, Copy)]
pub struct PageStreamTextSource;

impl PdfPageSource for PageStreamTextSource {
    fn name(&self) -> &'static str {
        "page-stream"
    }

    fn page_texts(&self, path: &Path) -> Result<Vec<String>> {
        let doc = lopdf::Document::load(path).context("Failed to load PDF")?;

        let texts = doc
            .get_pages()
            .keys()
            .map(|&page_number| {
                doc.extract_text(&[page_number]).unwrap_or_else(|e| {
                    tracing::debug!(
                        error = %e,
                        page = page_number,
                        "Page-stream extraction failed for page, treating as empty"
                    );
                    String::new()
                })
            })
            .collect();
        Ok(texts)
    }
}

/// PDF extractor: primary source first, fallback source when the primary yields no text
pub struct PdfExtractor {
    primary: Box<dyn PdfPageSource>,
    fallback: Box<dyn PdfPageSource>,
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::with_sources(Box::new(LayoutTextSource), Box::new(PageStreamTextSource))
    }
}

impl PdfExtractor {
    pub fn with_sources(primary: Box<dyn PdfPageSource>, fallback: Box<dyn PdfPageSource>) -> Self {
        Self { primary, fallback }
    }

    pub fn extract(&self, path: &Path) -> Extraction {
        let primary = run_source(self.primary.as_ref(), path);
        if let Extraction::Text(_) = primary {
            return primary;
        }

        tracing::debug!(
            primary = self.primary.name(),
            fallback = self.fallback.name(),
            outcome = primary.outcome(),
            "Primary PDF extraction yielded no text, trying fallback"
        );

        // The fallback also runs after a failed primary, not only an empty one;
        // pdf-extract errors or panics on many files lopdf still reads.
        match (primary, run_source(self.fallback.as_ref(), path)) {
            (_, text @ Extraction::Text(_)) => text,
            (Extraction::Failed(primary_err), Extraction::Failed(fallback_err)) => {
                Extraction::Failed(format!(
                    "{}: {}; {}: {}",
                    self.primary.name(),
                    primary_err,
                    self.fallback.name(),
                    fallback_err
                ))
            }
            (Extraction::Failed(primary_err), Extraction::Empty) => {
                Extraction::Failed(format!("{}: {}", self.primary.name(), primary_err))
            }
            (_, fallback) => fallback,
        }
    }
}

fn run_source(source: &dyn PdfPageSource, path: &Path) -> Extraction {
    run_guarded(source.name(), || source.page_texts(path).map(|pages| pages.concat()))
}
