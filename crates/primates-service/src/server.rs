//! HTTP server
//!
//! Provides `GET /primates` (stored species, ingesting first when the store
//! is empty), `PUT /primates` (always re-ingests) and `/health`. Anything
//! else gets a JSON 404 naming the caller and the path.

use crate::error::AppError;
use crate::ingest::Ingester;
use crate::store::SpeciesStore;
use axum::{
    extract::{ConnectInfo, Request, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use primates_db::SpeciesRow;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

pub struct ServerState {
    pub ingester: Ingester,
    pub store: Arc<dyn SpeciesStore>,
    pub started_at: DateTime<Utc>,
}

impl ServerState {
    pub fn new(ingester: Ingester, store: Arc<dyn SpeciesStore>) -> Self {
        Self {
            ingester,
            store,
            started_at: Utc::now(),
        }
    }
}

pub type SharedState = Arc<ServerState>;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    started_at: String,
    uptime_secs: i64,
}

/// Create the HTTP router
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/primates", get(list_primates).put(refresh_primates))
        .route("/health", get(health))
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(state: SharedState, port: u16) -> std::io::Result<()> {
    let router = create_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Server running on port {}", port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
}

async fn list_primates(
    State(state): State<SharedState>,
) -> Result<Json<Vec<SpeciesRow>>, AppError> {
    let stored = state.store.all_species().await?;
    if !stored.is_empty() {
        debug!(count = stored.len(), "Serving stored species");
        return Ok(Json(stored));
    }

    info!("No species stored yet, running ingestion");
    let outcome = state.ingester.run().await?;
    Ok(Json(outcome.species))
}

async fn refresh_primates(
    State(state): State<SharedState>,
) -> Result<Json<Vec<SpeciesRow>>, AppError> {
    info!("Refresh requested, running ingestion");
    let outcome = state.ingester.run().await?;
    Ok(Json(outcome.species))
}

async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        started_at: state.started_at.to_rfc3339(),
        uptime_secs: (Utc::now() - state.started_at).num_seconds(),
    })
}

async fn not_found(request: Request) -> AppError {
    let caller = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let path = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    AppError::NotFound(format!("{} tried to access {}", caller, path))
}
