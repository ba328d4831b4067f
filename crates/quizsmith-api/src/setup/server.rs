//! Listener binding, the startup summary and graceful shutdown

use std::net::{Ipv4Addr, SocketAddr};

use anyhow::{Context, Result};
use axum::Router;
use quizsmith_core::Config;
use tokio::net::TcpListener;

/// Bind the quiz service port and serve until SIGINT or SIGTERM.
pub async fn start_server(config: &Config, app: Router) -> Result<()> {
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.server_port()));
    let listener = bind_listener(addr).await?;
    let completion = config.completion();
    tracing::info!(
        addr = %addr,
        environment = config.environment(),
        cors_origins = %config.cors_origins().join(","),
        max_file_mb = config.max_file_size_bytes() / 1024 / 1024,
        extensions = %config.allowed_extensions().join(","),
        upload_temp_dir = %config
            .upload_temp_dir()
            .map(|dir| dir.display().to_string())
            .unwrap_or_else(|| "system default".to_string()),
        completion_base_url = %completion.base_url,
        model = %completion.model,
        "Quiz service accepting uploads on POST /generate-quiz"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Quiz service stopped with an error")?;

    tracing::info!("Quiz service stopped");
    Ok(())
}

async fn bind_listener(addr: SocketAddr) -> Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind quiz service to {}", addr))
}

/// Resolves on Ctrl+C or SIGTERM. A handler that cannot be installed is logged and
/// never fires, leaving the other signal in charge.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal = tokio::select! {
        _ = ctrl_c => "SIGINT",
        _ = terminate => "SIGTERM",
    };

    tracing::info!(signal, "Draining in-flight quiz requests before exit");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_failure_names_the_address() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = taken.local_addr().unwrap();

        let err = bind_listener(addr).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Failed to bind quiz service to {}", addr)
        );
    }

    #[tokio::test]
    async fn test_bind_ephemeral_port() {
        let listener = bind_listener(SocketAddr::from((Ipv4Addr::LOCALHOST, 0)))
            .await
            .unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }
}
