use quizsmith_core::Config;

// Use mimalloc as the global allocator; uploads are buffered in memory per request
// and mimalloc keeps fragmentation low under that churn.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (telemetry, completion client, routes)
    let (_state, router) = quizsmith_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    quizsmith_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
