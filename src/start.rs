//! Startup helpers for the page host.

use std::process::ExitCode;

use anyhow::Context;

use crate::config::PickerConfig;
use crate::server;

/// Run the host (used by the `routine-picker-server` binary).
///
/// # Returns
/// `ExitCode::SUCCESS` on graceful shutdown, `1` on failure.
#[must_use]
pub fn run() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting routine picker v{}", env!("CARGO_PKG_VERSION"));

    match serve(&PickerConfig::from_env()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn serve(config: &PickerConfig) -> anyhow::Result<()> {
    tracing::info!("Serving assets from {}", config.static_dir.display());

    let rt = tokio::runtime::Runtime::new().context("Failed to create runtime")?;
    rt.block_on(server::run_server(config, shutdown_signal()))
        .context("Host stopped")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Ctrl+C handler failed: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
