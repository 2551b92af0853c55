//! Router construction and the serve loop.

use axum::{Router, middleware as axum_middleware, routing::get};
use std::{future::Future, sync::Arc};
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tracing::info;

use crate::error::LaunchError;
use crate::handlers::{index, serve_static, status};
use crate::middleware::{log_requests, require_password};
use crate::state::AppState;

/// Builds the application router from finalized state.
pub fn build_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/status", get(status))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_password,
        ));

    Router::new()
        .route("/", get(index))
        .route("/static/{*path}", get(serve_static))
        .nest("/api", api)
        .layer(axum_middleware::from_fn(log_requests))
        .layer(CompressionLayer::new())
        .with_state(state)
}

/// Binds `host:port`. No validation beyond what the OS accepts.
pub async fn bind(host: &str, port: u16) -> Result<TcpListener, LaunchError> {
    TcpListener::bind((host, port))
        .await
        .map_err(|source| LaunchError::Bind {
            addr: format!("{}:{}", host, port),
            source,
        })
}

/// Serves `router` on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> Result<(), LaunchError>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!("Server listening on: {}", addr);
    }
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(LaunchError::Serve)
}
