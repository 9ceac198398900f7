//! Static Host
//!
//! Serves the compiled browser bundle. Unknown paths fall back to
//! `index.html` so client-side navigation survives a reload.

use axum::Router;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::config::ServerConfig;

/// Errors from the static host
#[derive(Error, Debug)]
pub enum ServeError {
    #[error("UI bundle not found: {0:?} has no index.html (build carescan-ui first)")]
    MissingBundle(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the router serving `ui_dir`
pub fn build_router(ui_dir: &Path) -> Router {
    let index = ui_dir.join("index.html");
    let files = ServeDir::new(ui_dir).fallback(ServeFile::new(index));

    Router::new()
        .fallback_service(files)
        .layer(TraceLayer::new_for_http())
}

/// Serve the bundle until Ctrl+C
pub async fn serve(config: &ServerConfig) -> Result<(), ServeError> {
    let ui_dir = PathBuf::from(&config.ui_dir);
    if !ui_dir.join("index.html").is_file() {
        return Err(ServeError::MissingBundle(ui_dir));
    }

    let router = build_router(&ui_dir);
    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Serving {:?} on http://{}", ui_dir, addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Static host shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tempfile::tempdir;
    use tower::util::ServiceExt;

    fn bundle() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<html>carescan</html>").unwrap();
        std::fs::write(dir.path().join("carescan-ui.js"), "export default 1;").unwrap();
        dir
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, String) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8_lossy(&body).to_string())
    }

    #[tokio::test]
    async fn test_serves_assets() {
        let dir = bundle();
        let (status, body) = get(build_router(dir.path()), "/carescan-ui.js").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "export default 1;");
    }

    #[tokio::test]
    async fn test_unknown_path_falls_back_to_index() {
        let dir = bundle();
        let (status, body) = get(build_router(dir.path()), "/dashboard/history").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<html>carescan</html>");
    }

    #[tokio::test]
    async fn test_missing_bundle_is_reported() {
        let dir = tempdir().unwrap();
        let config = ServerConfig {
            ui_dir: dir.path().to_string_lossy().to_string(),
            ..ServerConfig::default()
        };
        assert!(matches!(
            serve(&config).await,
            Err(ServeError::MissingBundle(_))
        ));
    }
}
