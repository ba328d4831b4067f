//! Multipart parsing for quiz uploads

use axum::extract::multipart::{Field, MultipartError};
use axum::extract::Multipart;
use axum::http::StatusCode;
use quizsmith_core::{models::QuizRequest, AppError};
use quizsmith_processing::{DocumentKind, UploadValidator};

use crate::error::validation_to_app_error;

/// Cap on each text form field
pub const MAX_TEXT_FIELD_BYTES: usize = 1024 * 1024;

/// Request body allowance on top of the file size limit: two capped text fields plus
/// multipart boundaries and part headers.
pub const FORM_OVERHEAD_BYTES: usize = 2 * MAX_TEXT_FIELD_BYTES + 64 * 1024;

/// A fully read and validated quiz upload form
#[derive(Debug)]
pub struct QuizUpload {
    pub data: Vec<u8>,
    pub filename: String,
    pub kind: DocumentKind,
    pub request: QuizRequest,
}

/// Read the `file`, `difficulty` and `question_count` fields.
///
/// The extension is checked as soon as the file part's headers arrive, before any of
/// its bytes are read, and the size is enforced while streaming, so rejected uploads
/// are never buffered whole.
pub async fn read_quiz_form(
    mut multipart: Multipart,
    validator: &UploadValidator,
) -> Result<QuizUpload, AppError> {
    let mut file: Option<(Vec<u8>, String, DocumentKind)> = None;
    let mut difficulty: Option<String> = None;
    let mut question_count: Option<i64> = None;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, "Failed to read multipart", validator))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            "file" => {
                if file.is_some() {
                    return Err(AppError::InvalidInput(
                        "Multiple file fields are not allowed; send exactly one field named 'file'"
                            .to_string(),
                    ));
                }
                let filename = field.file_name().unwrap_or_default().to_string();
                let kind = validator
                    .validate_extension(&filename)
                    .map_err(validation_to_app_error)?;

                let mut data = Vec::new();
                while let Some(chunk) = field
                    .chunk()
                    .await
                    .map_err(|e| multipart_error(e, "Failed to read file data", validator))?
                {
                    validator
                        .validate_file_size(data.len() + chunk.len())
                        .map_err(validation_to_app_error)?;
                    data.extend_from_slice(&chunk);
                }

                file = Some((data, filename, kind));
            }
            "difficulty" => {
                let value = read_text(field, "difficulty", validator).await?;
                difficulty = Some(value);
            }
            "question_count" => {
                let value = read_text(field, "question_count", validator).await?;
                let count = value.trim().parse::<i64>().map_err(|_| {
                    AppError::InvalidInput(format!(
                        "question_count must be an integer, got '{}'",
                        value
                    ))
                })?;
                question_count = Some(count);
            }
            other => {
                tracing::debug!(field = other, "Ignoring unknown multipart field");
            }
        }
    }

    let (data, filename, kind) =
        file.ok_or_else(|| AppError::InvalidInput("No file provided".to_string()))?;
    let difficulty = difficulty
        .ok_or_else(|| AppError::InvalidInput("Missing form field 'difficulty'".to_string()))?;
    let question_count = question_count.ok_or_else(|| {
        AppError::InvalidInput("Missing form field 'question_count'".to_string())
    })?;

    Ok(QuizUpload {
        data,
        filename,
        kind,
        request: QuizRequest {
            difficulty,
            question_count,
        },
    })
}

async fn read_text(
    mut field: Field<'_>,
    name: &str,
    validator: &UploadValidator,
) -> Result<String, AppError> {
    let mut data = Vec::new();
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| multipart_error(e, &format!("Failed to read field '{}'", name), validator))?
    {
        if data.len() + chunk.len() > MAX_TEXT_FIELD_BYTES {
            return Err(AppError::InvalidInput(format!(
                "Form field '{}' exceeds {} bytes",
                name, MAX_TEXT_FIELD_BYTES
            )));
        }
        data.extend_from_slice(&chunk);
    }

    String::from_utf8(data)
        .map_err(|_| AppError::InvalidInput(format!("Form field '{}' is not valid UTF-8", name)))
}

/// A body that hit the request limit reports as too large; any other stream error is bad input.
fn multipart_error(err: MultipartError, context: &str, validator: &UploadValidator) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::TooLarge {
            limit_bytes: validator.max_file_size(),
        }
    } else {
        AppError::InvalidInput(format!("{}: {}", context, err))
    }
}
