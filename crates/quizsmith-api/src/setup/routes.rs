//! Route configuration and setup.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use quizsmith_core::Config;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

use crate::api_doc::ApiDoc;
use crate::handlers::{health::liveness_check, quiz::generate_quiz};
use crate::state::AppState;
use crate::utils::upload::FORM_OVERHEAD_BYTES;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(config)?;

    // The file itself is size-checked while streaming; this bounds the whole form
    let body_limit = state.validator.max_file_size() + FORM_OVERHEAD_BYTES;

    let api_routes = Router::new()
        .route(
            "/generate-quiz",
            post(generate_quiz).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route("/health", get(liveness_check))
        .with_state(state);

    let app = api_routes
        .merge(RapiDoc::with_openapi("/api/openapi.json", ApiDoc::openapi()).path("/docs"))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        if config.is_production() {
            tracing::warn!("CORS configured to allow all origins - not recommended for production");
        }
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .with_context(|| format!("Invalid CORS origin '{}'", o))
            })
            .collect::<Result<Vec<_>, _>>()?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };
    Ok(cors)
}
