// Web server — Axum-based dashboard backend.
//
// The server embeds the static dashboard at compile time via include_dir!.
// All /api/* routes serve JSON out of the preloaded summary document; all
// other paths serve the embedded assets, falling back to index.html.
//
// The summary is loaded exactly once at startup and held read-only for the
// life of the process. Every handler is a lookup; nothing recomputes and
// nothing writes back.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use include_dir::{include_dir, Dir};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::summary::document::Summary;

pub mod handlers;

// Embed the dashboard assets at compile time.
static ASSETS: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/web/dist");

/// Shared application state threaded through all Axum handlers.
/// The summary never changes after startup, so a bare Arc is enough.
#[derive(Clone)]
pub struct AppState {
    pub summary: Arc<Summary>,
}

/// Load the summary document and serve the dashboard until the process exits.
/// A missing or corrupt summary is a startup error: the server never comes
/// up without data to show.
pub async fn run_server(summary_path: &Path, port: u16, bind: &str) -> Result<()> {
    let summary = Summary::load(summary_path)
        .context("Cannot start the dashboard without a summary document")?;

    info!(
        total_posts = summary.metadata.total_posts,
        "Loaded summary document"
    );

    let state = AppState {
        summary: Arc::new(summary),
    };

    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!("Subpulse dashboard listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Assemble the full router. Public so handler tests can drive it with
/// `tower::ServiceExt::oneshot` without binding a socket.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/summary", get(handlers::summary::get_summary))
        .route("/api/metadata", get(handlers::summary::get_metadata))
        .route("/api/trends", get(handlers::trends::get_trends))
        .route("/api/monthly", get(handlers::trends::get_monthly))
        .route("/api/top-posts", get(handlers::top_posts::list_top_posts))
        .fallback(serve_assets)
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([axum::http::Method::GET, axum::http::Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

/// Serve the embedded dashboard for all non-API paths.
/// Unknown paths fall back to index.html.
async fn serve_assets(uri: Uri) -> impl IntoResponse {
    let path = uri.path().trim_start_matches('/');

    if let Some(file) = ASSETS.get_file(path) {
        return asset_response(file.contents(), path);
    }

    match ASSETS.get_file("index.html") {
        Some(index) => asset_response(index.contents(), "index.html"),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            [(header::CONTENT_TYPE, "text/plain")],
            Body::from("Dashboard assets not found"),
        )
            .into_response(),
    }
}

fn asset_response(contents: &'static [u8], path: &str) -> Response {
    let mime = mime_type(path);
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, HeaderValue::from_static(mime))
        .body(Body::from(contents))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

fn mime_type(path: &str) -> &'static str {
    let ext = path.rsplit('.').next().unwrap_or("");
    match ext {
        "html" => "text/html; charset=utf-8",
        "js" | "mjs" => "application/javascript",
        "css" => "text/css",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "ico" => "image/x-icon",
        "json" => "application/json",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}
