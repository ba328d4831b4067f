//! Per-request temporary copies of uploaded documents.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

use crate::document::{extract_text, DocumentKind, Extraction};

const TEMP_PREFIX: &str = "quizsmith-";

/// An uploaded document persisted to a uniquely named temporary file.
///
/// The name ends with the document's extension so extractors that sniff by name
/// see the right type. The file is deleted on [`TempUpload::remove`] or on drop.
pub struct TempUpload {
    file: NamedTempFile,
}

impl TempUpload {
    /// Write `data` to a fresh temp file in `dir`, or in the system temp dir when `None`.
    pub fn persist(data: &[u8], kind: DocumentKind, dir: Option<&Path>) -> Result<Self> {
        let suffix = format!(".{}", kind.extension());
        let mut builder = tempfile::Builder::new();
        builder.prefix(TEMP_PREFIX).suffix(&suffix);

        let mut file = match dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .context("Failed to create temp file for upload")?;

        file.write_all(data)
            .context("Failed to write upload to temp file")?;
        file.flush().context("Failed to flush temp file")?;

        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Delete the file now, reporting failures instead of swallowing them on drop.
    pub fn remove(self) -> Result<()> {
        let path: PathBuf = self.file.path().to_path_buf();
        self.file
            .close()
            .with_context(|| format!("Failed to remove temp file {}", path.display()))
    }
}

/// Persist `data`, extract its text and remove the temp file again.
///
/// Blocking; run it on a blocking thread from async code. Only temp file creation
/// can fail; extraction problems come back as [`Extraction::Failed`]. The temp file
/// is gone when this returns, whatever the extraction outcome.
pub fn extract_document(
    data: &[u8],
    kind: DocumentKind,
    temp_dir: Option<&Path>,
) -> Result<Extraction> {
    let upload = TempUpload::persist(data, kind, temp_dir)?;
    let extraction = extract_text(kind, upload.path());

    if let Err(e) = upload.remove() {
        tracing::warn!(error = %format!("{:#}", e), "Failed to remove temp upload");
    }

    tracing::debug!(
        kind = kind.extension(),
        outcome = extraction.outcome(),
        "Document extraction finished"
    );
    Ok(extraction)
}
