//! Read-only HTTP surface over the published cache: JSON status and the overlay page.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tracing::info;

use crate::cache::{CacheReader, CacheState};
use crate::error::AppError;
use crate::snapshot::Snapshot;

const OVERLAY_TEMPLATE: &str = include_str!("../assets/overlay.html");

#[derive(Debug, Clone)]
pub struct AppState {
    pub cache: CacheReader,
    pub overlay_refresh_secs: u64,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/status", get(status))
        .route("/overlay", get(overlay))
        .route("/health", get(health))
        .with_state(state)
}

pub async fn serve(bind_addr: &str, state: AppState) -> Result<(), AppError> {
    let listener = TcpListener::bind(bind_addr).await?;
    info!(addr = bind_addr, "🌐 HTTP server listening");

    axum::serve(listener, router(state)).await?;
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusResponse<'a> {
    ok: bool,
    error: Option<&'a str>,
    last_update: Option<i64>,
    #[serde(flatten)]
    snapshot: Option<&'a Snapshot>,
}

impl<'a> From<&'a CacheState> for StatusResponse<'a> {
    fn from(state: &'a CacheState) -> Self {
        Self {
            ok: state.ok(),
            error: state.error.as_deref(),
            last_update: state.last_update,
            snapshot: state.snapshot.as_deref(),
        }
    }
}

fn not_ready() -> Response {
    let body = Json(StatusResponse {
        ok: false,
        error: Some("not ready"),
        last_update: None,
        snapshot: None,
    });

    (StatusCode::SERVICE_UNAVAILABLE, body).into_response()
}

async fn status(State(state): State<AppState>) -> Response {
    match state.cache.current() {
        Some(cached) => Json(StatusResponse::from(cached.as_ref())).into_response(),
        None => not_ready(),
    }
}

async fn overlay(State(state): State<AppState>) -> Html<String> {
    let refresh_ms = state.overlay_refresh_secs.saturating_mul(1000);

    Html(OVERLAY_TEMPLATE.replace("{{REFRESH_MS}}", &refresh_ms.to_string()))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    if state.cache.is_ready() {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not ready")
    }
}
