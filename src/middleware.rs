//! Request logging and access-password middleware.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use nanoid::nanoid;
use std::{sync::Arc, time::Instant};
use tracing::{info, warn};

use crate::colors::colored_id;
use crate::state::AppState;

/// Header carrying the access password on API requests.
pub const PASSWORD_HEADER: &str = "x-tetsuo-password";

/// Request ID stored in request extensions by [`log_requests`].
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Middleware that logs incoming requests and assigns them unique colored IDs
///
/// This middleware:
/// 1. Generates a short nanoid for each request
/// 2. Records the start time for latency calculation
/// 3. Stores the ID and start time in request extensions for downstream handlers
/// 4. Logs the request on the way in and its status and latency on the way out
pub async fn log_requests(mut req: Request<Body>, next: Next) -> Response {
    let id = nanoid!(5);
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let start = Instant::now();

    req.extensions_mut().insert(RequestId(id.clone()));
    req.extensions_mut().insert(start);

    info!("{} → {} {}", colored_id(&id), method, path);
    let response = next.run(req).await;
    info!(
        "{} ← {} ({}ms)",
        colored_id(&id),
        response.status(),
        start.elapsed().as_millis()
    );
    response
}

/// Rejects requests without the configured access password
///
/// Layered on the `/api` routes only, so the page shell and its static
/// assets stay reachable and can prompt for the password. When no password
/// is configured every request passes through untouched. Otherwise the
/// `X-Tetsuo-Password` header must match exactly, or the request is answered
/// with 401 and logged under its request ID.
pub async fn require_password(
    State(state): State<Arc<AppState>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let Some(expected) = state.settings.password() else {
        return next.run(req).await;
    };

    let supplied = req
        .headers()
        .get(PASSWORD_HEADER)
        .and_then(|value| value.to_str().ok());

    if supplied == Some(expected) {
        next.run(req).await
    } else {
        let id = req
            .extensions()
            .get::<RequestId>()
            .map(|id| colored_id(&id.0))
            .unwrap_or_default();
        warn!("{} rejected: missing or wrong access password", id);
        (StatusCode::UNAUTHORIZED, "access password required").into_response()
    }
}
