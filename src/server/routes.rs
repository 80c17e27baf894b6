//! Routes of the page host.

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use tower_http::services::ServeDir;

use crate::catalog::CatalogState;

/// Create the router: `/health` plus every file under `static_dir`.
#[must_use]
pub fn create_router(static_dir: PathBuf, catalog: CatalogState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(Arc::new(catalog))
}

/// Health check endpoint; `degraded` when the catalog document is unusable.
async fn health_check(State(catalog): State<Arc<CatalogState>>) -> Json<Value> {
    let body = match catalog.as_ref() {
        CatalogState::Loaded(loaded) => json!({
            "status": "ok",
            "service": "routine-picker",
            "version": env!("CARGO_PKG_VERSION"),
            "products": loaded.len(),
            "categories": loaded.categories(),
        }),
        CatalogState::Failed(reason) => json!({
            "status": "degraded",
            "service": "routine-picker",
            "version": env!("CARGO_PKG_VERSION"),
            "catalog_error": reason,
        }),
    };
    Json(body)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::catalog::{CatalogSource, HttpCatalogSource};
    use crate::config::PickerConfig;
    use crate::server::load_catalog;

    const DOC: &str = r#"{"products":[{"id":9,"name":"Serum","brand":"Ordinary","category":"skincare","description":"Niacinamide.","image":"s.jpg"}]}"#;

    fn static_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("products.json"), DOC).unwrap();
        dir
    }

    async fn router_for(dir: &tempfile::TempDir) -> Router {
        let config = PickerConfig::new().with_static_dir(dir.path());
        create_router(dir.path().to_path_buf(), load_catalog(&config).await)
    }

    async fn health_body(router: Router) -> Value {
        let response = router
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_catalog() {
        let dir = static_dir();
        let body = health_body(router_for(&dir).await).await;

        assert_eq!(body["status"], "ok");
        assert_eq!(body["products"], 1);
        assert_eq!(body["categories"], json!(["skincare"]));
    }

    #[tokio::test]
    async fn test_health_degraded_without_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let body = health_body(router_for(&dir).await).await;

        assert_eq!(body["status"], "degraded");
        assert!(body["catalog_error"].is_string());
    }

    #[tokio::test]
    async fn test_missing_asset() {
        let dir = static_dir();
        let response = router_for(&dir)
            .await
            .oneshot(Request::get("/nope.js").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_catalog_served_to_http_loader() {
        let dir = static_dir();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = router_for(&dir).await;
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        let config = PickerConfig::new().with_base_url(format!("http://{addr}/"));
        let catalog = HttpCatalogSource::from_config(&config)
            .unwrap()
            .load()
            .await
            .unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.products()[0].id.as_str(), "9");
    }
}
