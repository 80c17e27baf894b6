//! HTTP host for the picker page.
//!
//! Serves the page assets from the static directory. The catalog document
//! among them is read once at startup, and `/health` reports whether it
//! parsed. The chat endpoint lives elsewhere and is not routed here.

pub mod routes;

pub use routes::create_router;

use std::future::Future;
use std::net::SocketAddr;

use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::catalog::{CatalogState, FileCatalogSource};
use crate::config::PickerConfig;

/// Errors that stop the host.
#[derive(Debug, Error)]
pub enum HostError {
    /// The listening socket could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Requested address.
        addr: SocketAddr,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The server stopped with an error.
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Read the catalog document served under `static_dir`.
///
/// A missing or malformed document does not stop the host; the page then
/// shows its catalog error and `/health` reports the failure.
pub async fn load_catalog(config: &PickerConfig) -> CatalogState {
    let path = config
        .static_dir
        .join(config.catalog_path.trim_start_matches('/'));
    CatalogState::load(&FileCatalogSource::new(path)).await
}

/// Serve the page assets on the configured port until `shutdown_signal` completes.
///
/// # Errors
/// Returns an error if the listener cannot be bound or the server fails.
pub async fn run_server<F>(config: &PickerConfig, shutdown_signal: F) -> Result<(), HostError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let catalog = load_catalog(config).await;
    if let Some(loaded) = catalog.catalog() {
        tracing::info!("Catalog categories: {}", loaded.categories().join(", "));
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(config.static_dir.clone(), catalog)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| HostError::Bind { addr, source })?;
    tracing::info!("Routine picker listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[tokio::test]
    async fn test_load_catalog_from_static_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("products.json"),
            r#"{"products":[{"id":1,"name":"Serum","brand":"Ordinary","category":"skincare","description":"d","image":"i"}]}"#,
        )
        .unwrap();

        let mut config = PickerConfig::new().with_static_dir(dir.path());
        assert_eq!(load_catalog(&config).await.catalog().map(Catalog::len), Some(1));

        config.catalog_path = "/missing.json".to_string();
        assert!(load_catalog(&config).await.is_failed());
    }

    #[tokio::test]
    async fn test_bind_failure_is_reported() {
        let taken = std::net::TcpListener::bind("0.0.0.0:0").unwrap();
        let port = taken.local_addr().unwrap().port();
        let dir = tempfile::tempdir().unwrap();
        let config = PickerConfig::new().with_static_dir(dir.path()).with_port(port);

        let result = run_server(&config, std::future::ready(())).await;
        assert!(matches!(result, Err(HostError::Bind { .. })));
    }
}
