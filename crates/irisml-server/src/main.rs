//! irisml prediction server.
//!
//! - `GET /`         : liveness message
//! - `POST /predict` : Iris species prediction
//! - `GET /metrics`  : Prometheus exposition
//!
//! Usage: `irisml-server [CONFIG_PATH]` (default `irisml.yaml`).
//! Exits non-zero when the config or the model artifact cannot be loaded.

use std::process;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use irisml_core::error::{IrisError, Result};
use irisml_server::{app_state, config, router};

const DEFAULT_CONFIG_PATH: &str = "irisml.yaml";

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!(code = e.client_code().as_str(), error = %e, "irisml-server failed to start");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::load_from_file(&path)?;
    let listen = cfg.server.listen_addr()?;

    // No model, no server.
    let state = app_state::AppState::from_config(&cfg)?;
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| IrisError::Internal(format!("bind {listen} failed: {e}")))?;
    tracing::info!(%listen, config = %path, "irisml-server starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| IrisError::Internal(format!("server failed: {e}")))?;

    tracing::info!("irisml-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("signal received, starting graceful shutdown");
}
