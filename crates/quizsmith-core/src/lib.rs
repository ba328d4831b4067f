//! Quizsmith Core Library
//!
//! This crate provides configuration, error types, request/response models and the
//! pure quiz helpers (prompt construction, question splitting) shared by every
//! Quizsmith component.

pub mod config;
pub mod error;
pub mod models;
pub mod prompt;
pub mod quiz;

// Re-export commonly used types
pub use config::{BaseConfig, CompletionConfig, Config, LogFormat, QuizServiceConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use prompt::{build_quiz_prompt, DEFAULT_PROMPT_CONTEXT_CHARS};
pub use quiz::split_questions;
