//! HTTP request handlers.

use axum::{
    Json,
    body::Body,
    extract::{Extension, Path, State},
    http::{HeaderValue, StatusCode, header},
    response::Response,
};
use serde::Serialize;
use std::{
    path::{Component, Path as FsPath, PathBuf},
    sync::Arc,
    time::Instant,
};
use tracing::info;

use crate::assets;
use crate::colors::{colored_id, tag};
use crate::middleware::RequestId;
use crate::state::AppState;

/// Version reported by the status endpoint and banner.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Body of `GET /api/status`.
#[derive(Debug, Serialize)]
pub struct Status {
    pub version: &'static str,
    pub workspace: String,
    pub password_required: bool,
    pub api_key_configured: bool,
}

/// Reports the launch settings without exposing any secret
///
/// The page shell calls this on load to show the workspace and to find out
/// whether it has to ask the user for the access password. Credentials are
/// reduced to booleans; their values never leave the process.
pub async fn status(State(state): State<Arc<AppState>>) -> Json<Status> {
    let settings = &state.settings;
    Json(Status {
        version: APP_VERSION,
        workspace: settings.workspace.display().to_string(),
        password_required: settings.password.is_some(),
        api_key_configured: settings.api_key.is_some(),
    })
}

/// Serves the application shell, `templates/index.html`
pub async fn index(
    Extension(id): Extension<RequestId>,
    Extension(start_time): Extension<Instant>,
) -> Result<Response, StatusCode> {
    send_asset(
        "index.html",
        assets::template("index.html"),
        &id,
        start_time,
        "PAGE",
    )
}

/// Handles static asset requests with content-type detection and logging
///
/// Implements several key behaviors:
/// - Serves files embedded from `web/static` at build time
/// - Rejects any path that could climb out of the static tree with 404
/// - Correct MIME type detection using file extension
/// - Latency tracking from request start with the colored request ID
pub async fn serve_static(
    Extension(id): Extension<RequestId>,
    Extension(start_time): Extension<Instant>,
    Path(path): Path<String>,
) -> Result<Response, StatusCode> {
    let Some(relative) = sanitize(&path) else {
        info!(
            "{} ← {} {} (rejected path {:?})",
            colored_id(&id.0),
            tag("STATIC"),
            StatusCode::NOT_FOUND,
            path
        );
        return Err(StatusCode::NOT_FOUND);
    };
    send_asset(
        &relative,
        assets::static_file(&relative),
        &id,
        start_time,
        "STATIC",
    )
}

/// Keeps only plain path segments; `None` for anything that could escape.
fn sanitize(path: &str) -> Option<PathBuf> {
    let mut clean = PathBuf::new();
    for component in FsPath::new(path.trim_start_matches('/')).components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }
    (!clean.as_os_str().is_empty()).then_some(clean)
}

fn send_asset(
    name: impl AsRef<FsPath>,
    content: Option<&'static [u8]>,
    id: &RequestId,
    start_time: Instant,
    label: &str,
) -> Result<Response, StatusCode> {
    let Some(content) = content else {
        info!(
            "{} ← {} {} ({}ms)",
            colored_id(&id.0),
            tag(label),
            StatusCode::NOT_FOUND,
            start_time.elapsed().as_millis()
        );
        return Err(StatusCode::NOT_FOUND);
    };

    let mime_type = mime_guess::from_path(name).first_or_octet_stream();
    let content_type = HeaderValue::from_str(mime_type.as_ref())
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let mut response = Response::new(Body::from(content));
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, content_type);

    info!(
        "{} ← {} {} ({}ms)",
        colored_id(&id.0),
        tag(label),
        response.status(),
        start_time.elapsed().as_millis()
    );
    Ok(response)
}
