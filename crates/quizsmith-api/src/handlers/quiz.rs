//! Quiz generation handler

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Multipart, State},
    Json,
};
use quizsmith_core::{build_quiz_prompt, models::QuizResponse, AppError};
use quizsmith_processing::{extract_document, Extraction};
use tracing::Instrument;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::{read_quiz_form, QuizUpload};

#[utoipa::path(
    post,
    path = "/generate-quiz",
    tag = "quiz",
    request_body(
        content = inline(Object),
        content_type = "multipart/form-data",
        description = "Fields: `file` (.pdf or .docx), `difficulty` (text), `question_count` (integer)"
    ),
    responses(
        (status = 200, description = "Quiz generated", body = QuizResponse),
        (status = 400, description = "Unsupported file type, file too large, no extractable text or missing fields", body = ErrorResponse),
        (status = 500, description = "Completion request failed", body = ErrorResponse)
    )
)]
pub async fn generate_quiz(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<QuizResponse>, HttpAppError> {
    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("generate_quiz", request_id = %request_id);

    let response = handle_generate_quiz(state, multipart).instrument(span).await?;
    Ok(Json(response))
}

async fn handle_generate_quiz(
    state: Arc<AppState>,
    multipart: Multipart,
) -> Result<QuizResponse, HttpAppError> {
    let QuizUpload {
        data,
        filename,
        kind,
        request,
    } = read_quiz_form(multipart, &state.validator).await?;

    tracing::info!(
        filename = %filename,
        size = data.len(),
        difficulty = %request.difficulty,
        question_count = request.question_count,
        "Quiz upload accepted"
    );

    let temp_dir = state.config.upload_temp_dir().cloned();
    let extraction =
        tokio::task::spawn_blocking(move || extract_document(&data, kind, temp_dir.as_deref()))
            .await
            .map_err(|e| AppError::Internal(format!("Extraction task failed: {}", e)))??;

    let text = match extraction {
        Extraction::Text(text) => text,
        Extraction::Empty => {
            tracing::warn!(filename = %filename, "Document contains no extractable text");
            return Err(AppError::ExtractionEmpty.into());
        }
        Extraction::Failed(reason) => {
            tracing::warn!(filename = %filename, reason = %reason, "Document could not be parsed");
            return Err(AppError::ExtractionEmpty.into());
        }
    };

    let prompt = build_quiz_prompt(
        &text,
        &request.difficulty,
        request.question_count,
        state.config.prompt_context_chars(),
    );

    tracing::debug!(
        extracted_chars = text.chars().count(),
        prompt_chars = prompt.chars().count(),
        "Prompt built"
    );

    let started = Instant::now();
    let quiz = state
        .completion
        .complete(&prompt)
        .await
        .map_err(|e| AppError::CompletionFailure(format!("{:#}", e)))?;

    let response = QuizResponse::new(quiz);
    tracing::info!(
        model = state.completion.model_name(),
        duration_ms = started.elapsed().as_millis() as u64,
        questions = response.questions.len(),
        "Quiz generated"
    );

    Ok(response)
}
