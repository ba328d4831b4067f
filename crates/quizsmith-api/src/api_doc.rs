//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use quizsmith_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Quizsmith API",
        version = "0.1.0",
        description = "Upload a PDF or DOCX document and receive a generated quiz about its contents."
    ),
    paths(
        handlers::quiz::generate_quiz,
        handlers::health::liveness_check,
    ),
    components(schemas(models::QuizResponse, error::ErrorResponse)),
    tags(
        (name = "quiz", description = "Quiz generation from documents"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_routes() {
        let spec = ApiDoc::openapi();
        assert!(spec.paths.paths.contains_key("/generate-quiz"));
        assert!(spec.paths.paths.contains_key("/health"));
    }
}
