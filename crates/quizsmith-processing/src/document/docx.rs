//! DOCX paragraph text extraction.
//!
//! A DOCX file is a zip archive; the body lives in `word/document.xml` as `w:p`
//! paragraphs whose visible text sits in `w:t` runs.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use quick_xml::events::Event;
use quick_xml::Reader;

use super::{run_guarded, Extraction};

const DOCUMENT_PART: &str = "word/document.xml";

const SKIPPED_SUBTREES: [&[u8]; 2] = [b"w:txbxContent", b"mc:Fallback"];

/// Joins the text of every non-blank paragraph with newlines
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxExtractor;

impl DocxExtractor {
    pub fn extract(&self, path: &Path) -> Extraction {
        run_guarded("docx", || read_paragraphs(path).map(|paragraphs| paragraphs.join("\n")))
    }
}

/// Read the paragraphs of the DOCX at `path`, skipping blank ones.
pub fn read_paragraphs(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).context("Failed to open DOCX file")?;
    let mut archive = zip::ZipArchive::new(file).context("DOCX is not a valid zip archive")?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .with_context(|| format!("DOCX has no {}", DOCUMENT_PART))?
        .read_to_string(&mut xml)
        .context("Failed to read document body")?;

    parse_paragraphs(&xml)
}

/// Parse paragraph texts out of a `word/document.xml` body.
///
/// Paragraphs nested in tables are included. Tabs and line breaks inside a paragraph
/// are kept as `\t` and `\n`. Text boxes and compatibility fallbacks are skipped:
/// their content sits outside the body flow and Word stores it twice.
pub fn parse_paragraphs(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut open: Vec<String> = Vec::new();
    let mut in_text = false;

    loop {
        match reader.read_event().context("Malformed document XML")? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => open.push(String::new()),
                b"w:t" => in_text = true,
                name if SKIPPED_SUBTREES.contains(&name) => {
                    let end = e.to_end().into_owned();
                    reader
                        .read_to_end(end.name())
                        .context("Malformed document XML")?;
                }
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"w:p" => {
                    if let Some(paragraph) = open.pop() {
                        if !paragraph.trim().is_empty() {
                            paragraphs.push(paragraph);
                        }
                    }
                }
                b"w:t" => in_text = false,
                _ => {}
            },
            Event::Empty(e) => {
                if let Some(current) = open.last_mut() {
                    match e.name().as_ref() {
                        b"w:tab" => current.push('\t'),
                        b"w:br" | b"w:cr" => current.push('\n'),
                        _ => {}
                    }
                }
            }
            Event::Text(e) if in_text => {
                if let Some(current) = open.last_mut() {
                    let text = e.unescape().context("Invalid text in document XML")?;
                    current.push_str(&text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{docx_from_document_xml, docx_with_paragraphs, write_temp};

    fn body(inner: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
            inner
        )
    }

    #[test]
    fn test_parse_paragraphs_joins_runs() {
        let xml = body(
            "<w:p><w:r><w:t>The cell </w:t></w:r><w:r><w:t>membrane</w:t></w:r></w:p>\
             <w:p><w:r><w:t>Second paragraph</w:t></w:r></w:p>",
        );
        let paragraphs = parse_paragraphs(&xml).unwrap();
        assert_eq!(paragraphs, vec!["The cell membrane", "Second paragraph"]);
    }

    #[test]
    fn test_parse_paragraphs_skips_blank() {
        let xml = body(
            "<w:p><w:r><w:t>First</w:t></w:r></w:p>\
             <w:p/>\
             <w:p><w:r><w:t xml:space=\"preserve\">   </w:t></w:r></w:p>\
             <w:p><w:r><w:t>Last</w:t></w:r></w:p>",
        );
        assert_eq!(parse_paragraphs(&xml).unwrap(), vec!["First", "Last"]);
    }

    #[test]
    fn test_parse_paragraphs_keeps_tabs_breaks_and_entities() {
        let xml = body(
            "<w:p><w:r><w:t>A</w:t><w:tab/><w:t>B</w:t><w:br/><w:t>C &amp; D</w:t></w:r></w:p>",
        );
        assert_eq!(parse_paragraphs(&xml).unwrap(), vec!["A\tB\nC & D"]);
    }

    #[test]
    fn test_parse_paragraphs_ignores_text_outside_runs() {
        let xml = body("<w:p><w:pPr><w:pStyle w:val=\"Heading1\"/></w:pPr><w:r><w:t>Title</w:t></w:r></w:p>");
        assert_eq!(parse_paragraphs(&xml).unwrap(), vec!["Title"]);
    }

    #[test]
    fn test_parse_paragraphs_includes_table_cells() {
        let xml = body(
            "<w:tbl><w:tr><w:tc><w:p><w:r><w:t>Cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>",
        );
        assert_eq!(parse_paragraphs(&xml).unwrap(), vec!["Cell"]);
    }

    #[test]
    fn test_parse_paragraphs_skips_text_boxes() {
        let xml = body(concat!(
            "<w:p><w:r><w:t xml:space=\"preserve\">Before </w:t></w:r>",
            "<w:r><mc:AlternateContent>",
            "<mc:Choice Requires=\"wps\"><w:drawing><wps:txbx><w:txbxContent>",
            "<w:p><w:r><w:t>Boxed</w:t></w:r></w:p>",
            "</w:txbxContent></wps:txbx></w:drawing></mc:Choice>",
            "<mc:Fallback><w:pict><v:textbox><w:txbxContent>",
            "<w:p><w:r><w:t>Boxed</w:t></w:r></w:p>",
            "</w:txbxContent></v:textbox></w:pict></mc:Fallback>",
            "</mc:AlternateContent></w:r>",
            "<w:r><w:t>after</w:t></w:r></w:p>",
        ));
        assert_eq!(parse_paragraphs(&xml).unwrap(), vec!["Before after"]);
    }

    #[test]
    fn test_parse_paragraphs_skips_fallback_without_text_box() {
        let xml = body(concat!(
            "<w:p><w:r><mc:AlternateContent><mc:Choice Requires=\"w14\"><w:t>New</w:t></mc:Choice>",
            "<mc:Fallback><w:t>Old</w:t></mc:Fallback></mc:AlternateContent></w:r></w:p>",
        ));
        assert_eq!(parse_paragraphs(&xml).unwrap(), vec!["New"]);
    }

    #[test]
    fn test_extract_docx_file() {
        let file = write_temp(
            &docx_with_paragraphs(&["Photosynthesis converts light.", "", "Chlorophyll is green."]),
            "docx",
        );
        assert_eq!(
            DocxExtractor.extract(file.path()),
            Extraction::Text("Photosynthesis converts light.\nChlorophyll is green.".to_string())
        );
    }

    #[test]
    fn test_extract_docx_without_text_is_empty() {
        let file = write_temp(&docx_with_paragraphs(&["", "  "]), "docx");
        assert_eq!(DocxExtractor.extract(file.path()), Extraction::Empty);
    }

    #[test]
    fn test_extract_docx_without_paragraphs_or_zip() {
        let file = write_temp(&docx_from_document_xml("<not-word/>"), "docx");
        assert_eq!(DocxExtractor.extract(file.path()), Extraction::Empty);

        let file = write_temp(b"PK but not really a zip", "docx");
        assert!(matches!(
            DocxExtractor.extract(file.path()),
            Extraction::Failed(_)
        ));
    }
}
