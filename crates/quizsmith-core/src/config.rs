//! Configuration module
//!
//! Server, upload and completion-client settings, loaded from the process
//! environment (and an optional `.env` file) once at startup and then passed
//! explicitly to the components that need them.

use std::env;
use std::fmt;
use std::path::PathBuf;

// Common constants
const SERVER_PORT: u16 = 8000;
const MAX_FILE_SIZE_MB: usize = 10;
const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
const OPENAI_MODEL: &str = "gpt-3.5-turbo";
const OPENAI_MAX_TOKENS: u32 = 1500;
const OPENAI_TEMPERATURE: f32 = 0.7;

/// Extensions that have a text extractor behind them
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "docx"];

/// Console log output format
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

/// Server-level configuration
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub log_format: LogFormat,
}

/// Chat-completion client configuration
#[derive(Clone)]
pub struct CompletionConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// No timeout is applied when unset
    pub timeout_secs: Option<u64>,
}

impl fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Quiz service configuration
#[derive(Clone, Debug)]
pub struct QuizServiceConfig {
    pub base: BaseConfig,
    pub max_file_size_bytes: usize,
    pub allowed_extensions: Vec<String>,
    pub prompt_context_chars: usize,
    /// Directory for per-request upload files; system temp dir when unset
    pub upload_temp_dir: Option<PathBuf>,
    pub completion: CompletionConfig,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<QuizServiceConfig>);

impl Config {
    fn as_service(&self) -> &QuizServiceConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.as_service().base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        let config = QuizServiceConfig::from_lookup(|key| env::var(key).ok())?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_service().validate()
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.as_service().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_service().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.as_service().base.environment
    }

    pub fn log_format(&self) -> LogFormat {
        self.as_service().base.log_format
    }

    pub fn max_file_size_bytes(&self) -> usize {
        self.as_service().max_file_size_bytes
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.as_service().allowed_extensions
    }

    pub fn prompt_context_chars(&self) -> usize {
        self.as_service().prompt_context_chars
    }

    pub fn upload_temp_dir(&self) -> Option<&PathBuf> {
        self.as_service().upload_temp_dir.as_ref()
    }

    pub fn completion(&self) -> &CompletionConfig {
        &self.as_service().completion
    }
}

impl QuizServiceConfig {
    /// Build the configuration from a key lookup (the process environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let base = BaseConfig {
            server_port: lookup("PORT")
                .unwrap_or_else(|| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            log_format: LogFormat::parse(&lookup("LOG_FORMAT").unwrap_or_default()),
        };

        let max_file_size_mb = lookup("MAX_FILE_SIZE_MB")
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(MAX_FILE_SIZE_MB);

        let allowed_extensions = lookup("ALLOWED_EXTENSIONS")
            .unwrap_or_else(|| SUPPORTED_EXTENSIONS.join(","))
            .split(',')
            .map(|s| s.trim().trim_start_matches('.').to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let completion = CompletionConfig {
            api_key: lookup("OPENAI_API_KEY")
                .ok_or_else(|| anyhow::anyhow!("OPENAI_API_KEY must be set"))?,
            base_url: lookup("OPENAI_BASE_URL")
                .unwrap_or_else(|| OPENAI_API_BASE.to_string())
                .trim_end_matches('/')
                .to_string(),
            model: lookup("OPENAI_MODEL").unwrap_or_else(|| OPENAI_MODEL.to_string()),
            max_tokens: lookup("OPENAI_MAX_TOKENS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(OPENAI_MAX_TOKENS),
            temperature: lookup("OPENAI_TEMPERATURE")
                .and_then(|s| s.parse().ok())
                .unwrap_or(OPENAI_TEMPERATURE),
            timeout_secs: lookup("COMPLETION_TIMEOUT_SECS").and_then(|s| s.parse().ok()),
        };

        Ok(QuizServiceConfig {
            base,
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
            allowed_extensions,
            prompt_context_chars: lookup("PROMPT_CONTEXT_CHARS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(crate::prompt::DEFAULT_PROMPT_CONTEXT_CHARS),
            upload_temp_dir: lookup("UPLOAD_TEMP_DIR").map(PathBuf::from),
            completion,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.completion.api_key.trim().is_empty() {
            return Err(anyhow::anyhow!("OPENAI_API_KEY must not be empty"));
        }
        if self.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than 0"));
        }
        if self.prompt_context_chars == 0 {
            return Err(anyhow::anyhow!("PROMPT_CONTEXT_CHARS must be greater than 0"));
        }
        if !(0.0..=2.0).contains(&self.completion.temperature) {
            return Err(anyhow::anyhow!(
                "OPENAI_TEMPERATURE must be between 0 and 2, got {}",
                self.completion.temperature
            ));
        }
        if self.allowed_extensions.is_empty() {
            return Err(anyhow::anyhow!("ALLOWED_EXTENSIONS must not be empty"));
        }
        if let Some(ext) = self
            .allowed_extensions
            .iter()
            .find(|ext| !SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
        {
            return Err(anyhow::anyhow!(
                "ALLOWED_EXTENSIONS contains '{}' which has no text extractor (supported: {})",
                ext,
                SUPPORTED_EXTENSIONS.join(", ")
            ));
        }
        Ok(())
    }
}
