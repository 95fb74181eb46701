//! Axum-based delivery surface for AlgoHelp: accepts raw chat messages,
//! applies the invocation prefix, and routes the remainder through the
//! core. Everything conversational lives in `algohelp-core`; this binary
//! only owns transport, configuration, and startup preload.

use axum::extract::{Json, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use algohelp_core::{CatalogStore, CoreConfig, QueryRouter, RouteOutcome};
use algohelp_netinfo::AlgodClient;
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file if present (before any env::var calls)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!(
            "[algohelp-gateway] .env not loaded: {} (using system environment)",
            e
        );
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(CoreConfig::load().expect("load CoreConfig"));
    let catalogs = Arc::new(CatalogStore::from_config(&config));

    // Pre-load all catalogs at startup so the first query pays no file I/O.
    tracing::info!("Pre-loading catalogs...");
    for catalog in catalogs.status() {
        tracing::info!(
            catalog = %catalog.name,
            loaded = catalog.loaded,
            entries = catalog.entry_count,
            "catalog ready"
        );
    }

    let provider = Arc::new(AlgodClient::from_config(&config));
    let router = Arc::new(QueryRouter::new(
        Arc::clone(&catalogs),
        provider,
        config.kb_score_threshold,
    ));

    let app = build_app(AppState {
        config: Arc::clone(&config),
        catalogs,
        router,
    });

    let port = config.port;
    let app_name = config.app_name.clone();
    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], port));
    tracing::info!("{} listening on {}", app_name, addr);
    axum::serve(tokio::net::TcpListener::bind(addr).await.unwrap(), app)
        .await
        .unwrap();
}

fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(tower_http::cors::Any);

    Router::new()
        .route("/v1/status", get(status))
        .route("/api/v1/health", get(health))
        .route("/api/v1/query", post(query))
        .route("/api/v1/reload", post(reload))
        .with_state(state)
        .layer(cors)
}

#[derive(Clone)]
struct AppState {
    config: Arc<CoreConfig>,
    catalogs: Arc<CatalogStore>,
    router: Arc<QueryRouter>,
}

/// GET /api/v1/health – liveness check for UI and scripts.
async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}

/// GET /v1/status – app identity plus per-catalog entry counts.
async fn status(State(state): State<AppState>) -> axum::Json<serde_json::Value> {
    let catalogs = state.catalogs.status();
    let all_loaded = catalogs.iter().all(|c| c.loaded);
    axum::Json(serde_json::json!({
        "app_name": state.config.app_name,
        "port": state.config.port,
        "status": if all_loaded { "ok" } else { "degraded" },
        "catalogs": catalogs,
    }))
}

#[derive(Debug, Deserialize)]
struct QueryRequest {
    /// Raw chat message, invocation prefix included.
    message: String,
    #[serde(default)]
    author: Option<String>,
}

/// POST /api/v1/query – one chat message in, at most one reply out.
///
/// A message without the configured invocation prefix is ignored. An empty
/// query after the prefix produces 204: nothing at all is delivered,
/// matching the silent path of the router.
async fn query(State(state): State<AppState>, Json(req): Json<QueryRequest>) -> Response {
    let correlation_id = uuid::Uuid::new_v4();
    let author = req.author.as_deref().unwrap_or("unknown");

    let Some(raw_query) = req.message.strip_prefix(state.config.command_prefix.as_str()) else {
        tracing::debug!(
            target: "algohelp::gateway",
            %correlation_id,
            author,
            "message without invocation prefix ignored"
        );
        return axum::Json(serde_json::json!({ "status": "ignored" })).into_response();
    };
    let raw_query = raw_query.trim();
    tracing::info!(
        target: "algohelp::gateway",
        %correlation_id,
        author,
        query = raw_query,
        "received query"
    );

    match state.router.route(raw_query).await {
        RouteOutcome::Respond(reply) => {
            axum::Json(serde_json::json!({ "status": "answered", "reply": reply })).into_response()
        }
        RouteOutcome::Fallback(reply) => {
            axum::Json(serde_json::json!({ "status": "fallback", "reply": reply })).into_response()
        }
        RouteOutcome::Silent => StatusCode::NO_CONTENT.into_response(),
    }
}

/// POST /api/v1/reload – drops every catalog cache; next access reloads
/// from disk.
async fn reload(State(state): State<AppState>) -> axum::Json<serde_json::Value> {
    state.catalogs.reload_all();
    let catalogs = state.catalogs.status();
    axum::Json(serde_json::json!({ "status": "reloaded", "catalogs": catalogs }))
}
