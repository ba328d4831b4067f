//! Console logging setup

use quizsmith_core::LogFormat;
use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

const DEFAULT_FILTER: &str = "quizsmith=debug,tower_http=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into())
}

/// Install the global tracing subscriber. `RUST_LOG` overrides the default filter.
pub fn init_telemetry(format: LogFormat) -> Result<(), anyhow::Error> {
    match format {
        LogFormat::Compact => {
            let console_fmt = tracing_subscriber::fmt::layer().event_format(
                Format::default()
                    .compact()
                    .with_target(false)
                    .without_time(),
            );
            tracing_subscriber::registry()
                .with(env_filter())
                .with(console_fmt)
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter())
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()?;
        }
    }

    tracing::debug!(format = ?format, "Tracing initialized");
    Ok(())
}
