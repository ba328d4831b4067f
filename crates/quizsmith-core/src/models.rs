//! Request and response models for quiz generation

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::quiz::split_questions;

/// Caller-supplied quiz parameters. Neither field is bounds-checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizRequest {
    /// Free-text difficulty label (e.g. "Easy", "medium")
    pub difficulty: String,
    pub question_count: i64,
}

/// Successful quiz generation response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuizResponse {
    /// Quiz text exactly as returned by the model (trimmed)
    pub quiz: String,
    /// The quiz split into individual questions; the whole quiz when it cannot be split
    pub questions: Vec<String>,
}

impl QuizResponse {
    pub fn new(quiz: String) -> Self {
        let questions = split_questions(&quiz);
        Self { quiz, questions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_serializes_quiz_and_questions() {
        let response = QuizResponse::new("1. A?\n2. B?".to_string());
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["quiz"], "1. A?\n2. B?");
        assert_eq!(value["questions"].as_array().unwrap().len(), 2);
    }
}
