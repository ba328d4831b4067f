//! Error types module
//!
//! All request failures are unified under [`AppError`]. Each variant describes how it
//! should be presented over HTTP through the [`ErrorMetadata`] trait, so the API layer
//! only has to render what the error says about itself.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected rejections like validation failures
    Debug,
    /// Warning level - for inputs we could not process
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "BAD_EXTENSION")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden from clients
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unsupported file type.")]
    BadExtension(String),

    #[error("File too large. Max {}MB.", .limit_bytes / 1024 / 1024)]
    TooLarge { limit_bytes: usize },

    #[error("Could not extract text from document.")]
    ExtractionEmpty,

    #[error("{0}")]
    CompletionFailure(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

/// Static metadata for each variant: (http_status, error_code, sensitive, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, bool, LogLevel) {
    match err {
        AppError::BadExtension(_) => (400, "BAD_EXTENSION", false, LogLevel::Debug),
        AppError::TooLarge { .. } => (400, "TOO_LARGE", false, LogLevel::Debug),
        AppError::ExtractionEmpty => (400, "EXTRACTION_EMPTY", false, LogLevel::Warn),
        AppError::CompletionFailure(_) => (500, "COMPLETION_FAILURE", false, LogLevel::Error),
        AppError::InvalidInput(_) => (400, "INVALID_INPUT", false, LogLevel::Debug),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", true, LogLevel::Error),
        AppError::InternalWithSource { .. } => (500, "INTERNAL_ERROR", true, LogLevel::Error),
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn client_message(&self) -> String {
        if self.is_sensitive() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        }
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).3
    }
}

impl AppError {
    /// Short variant name used as a structured log field
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::BadExtension(_) => "BadExtension",
            AppError::TooLarge { .. } => "TooLarge",
            AppError::ExtractionEmpty => "ExtractionEmpty",
            AppError::CompletionFailure(_) => "CompletionFailure",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "InternalWithSource",
        }
    }

    /// Full message for logs, including the source chain when present
    pub fn detailed_message(&self) -> String {
        match self {
            AppError::InternalWithSource { message, source } => {
                format!("{}: {:#}", message, source)
            }
            other => other.to_string(),
        }
    }
}
