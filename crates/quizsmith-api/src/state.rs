use std::sync::Arc;

use quizsmith_core::Config;
use quizsmith_processing::UploadValidator;
use quizsmith_services::CompletionProvider;

/// Shared, read-only state handed to every request
pub struct AppState {
    pub config: Config,
    pub completion: Arc<dyn CompletionProvider>,
    pub validator: UploadValidator,
}

impl AppState {
    pub fn new(config: Config, completion: Arc<dyn CompletionProvider>) -> Self {
        let validator = UploadValidator::new(
            config.max_file_size_bytes(),
            config.allowed_extensions().to_vec(),
        );
        Self {
            config,
            completion,
            validator,
        }
    }
}
