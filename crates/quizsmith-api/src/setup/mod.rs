//! Application setup

pub mod routes;
pub mod server;

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use quizsmith_core::Config;
use quizsmith_services::{CompletionProvider, OpenAiCompletionClient};

use crate::state::AppState;
use crate::telemetry::init_telemetry;

/// Initialize logging, the completion client and the router
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, Router)> {
    init_telemetry(config.log_format())?;

    config.validate()?;

    tracing::info!(
        environment = %config.environment(),
        production = config.is_production(),
        "Starting Quizsmith API"
    );

    let completion: Arc<dyn CompletionProvider> =
        Arc::new(OpenAiCompletionClient::new(config.completion())?);
    tracing::info!(
        model = completion.model_name(),
        base_url = %config.completion().base_url,
        "Completion client ready"
    );

    let state = Arc::new(AppState::new(config.clone(), completion));
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
