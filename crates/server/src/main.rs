use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use shared::{
    error::{ApiError, ErrorCode},
    protocol::{SubmissionPayload, SUBMIT_REACTION_PATH},
};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{info, warn};

mod api;
mod app_state;
mod config;
mod mechanism;

use api::{find_mechanism, ApiContext};
use app_state::AppState;
use config::load_settings;
use mechanism::WriteUpEngine;

const LANDING_PAGE: &str = "<!doctype html>\n<title>SiGC</title>\n\
<p>POST a reaction as JSON to <code>/submit_reaction</code>.</p>\n";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings();
    let state = AppState {
        api: ApiContext {
            engine: Arc::new(WriteUpEngine),
        },
    };
    let app = build_router(Arc::new(state), settings.body_limit_bytes);

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "analysis endpoint listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>, body_limit_bytes: usize) -> Router {
    Router::new()
        .route("/", get(landing_page))
        .route("/healthz", get(healthz))
        .route(SUBMIT_REACTION_PATH, post(submit_reaction))
        .layer(RequestBodyLimitLayer::new(body_limit_bytes))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn landing_page() -> Html<&'static str> {
    Html(LANDING_PAGE)
}

async fn submit_reaction(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SubmissionPayload>,
) -> Result<Html<String>, (StatusCode, Json<ApiError>)> {
    find_mechanism(&state.api, payload)
        .await
        .map(Html)
        .map_err(|err| {
            let status = match err.code {
                ErrorCode::Validation => StatusCode::BAD_REQUEST,
                ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            };
            warn!(status = status.as_u16(), message = %err.message, "reaction rejected");
            (status, Json(err))
        })
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
