use crate::document::DocumentKind;

/// Upload validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Invalid file extension: {extension} (allowed: {allowed:?})")]
    InvalidExtension {
        extension: String,
        allowed: Vec<String>,
    },
}

/// Upload validator
///
/// Checks the extension allow-list and the size limit. Nothing else about the
/// upload is validated; an empty file passes and fails later at extraction.
#[derive(Clone, Debug)]
pub struct UploadValidator {
    max_file_size: usize,
    allowed_extensions: Vec<String>,
}

impl UploadValidator {
    pub fn new(max_file_size: usize, allowed_extensions: Vec<String>) -> Self {
        Self {
            max_file_size,
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|e| e.to_lowercase())
                .collect(),
        }
    }

    pub fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    /// Validate file size
    pub fn validate_file_size(&self, size: usize) -> Result<(), ValidationError> {
        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }
        Ok(())
    }

    /// Validate the file extension and resolve the extractor to use.
    ///
    /// The extension is everything after the last `.` (the whole name when there is none),
    /// compared case-insensitively.
    pub fn validate_extension(&self, filename: &str) -> Result<DocumentKind, ValidationError> {
        let extension = file_extension(filename);

        if !self.allowed_extensions.contains(&extension) {
            return Err(ValidationError::InvalidExtension {
                extension,
                allowed: self.allowed_extensions.clone(),
            });
        }

        DocumentKind::from_extension(&extension).ok_or_else(|| {
            ValidationError::InvalidExtension {
                extension,
                allowed: self.allowed_extensions.clone(),
            }
        })
    }
}

fn file_extension(filename: &str) -> String {
    filename.rsplit('.').next().unwrap_or("").to_lowercase()
}
