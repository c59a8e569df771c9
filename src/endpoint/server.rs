//! HTTP server for the mock query endpoint

use super::dataset::generate_rows;
use super::engine::{run_query, EndpointQuery};
use crate::error::{Error, Result};
use crate::types::Row;
use axum::{
    extract::{RawQuery, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Path of the query route
pub const USERS_PATH: &str = "/api/users";

/// Server configuration
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    /// Port to listen on
    pub port: u16,
    /// Number of generated rows
    pub rows: usize,
    /// Artificial delay before every response
    pub latency: Duration,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            rows: 500,
            latency: Duration::ZERO,
        }
    }
}

/// Rows served by the endpoint
#[derive(Debug, Clone)]
pub struct Dataset {
    rows: Vec<Row>,
    latency: Duration,
}

impl Dataset {
    /// Generate a dataset with `rows` rows
    pub fn generate(rows: usize, latency: Duration) -> Self {
        Self::from_rows(generate_rows(rows), latency)
    }

    /// Serve the given rows
    pub fn from_rows(rows: Vec<Row>, latency: Duration) -> Self {
        Self { rows, latency }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

/// Build the router
pub fn router(dataset: Arc<Dataset>) -> Router {
    // Allow all origins so a browser page on another port can query it
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route(USERS_PATH, get(query_users))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(dataset)
}

/// Start the server on `0.0.0.0:<port>`
pub async fn serve(config: &EndpointConfig) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to port {}: {e}", config.port)))?;

    let dataset = Dataset::generate(config.rows, config.latency);
    serve_on(listener, Arc::new(dataset)).await
}

/// Serve on an already bound listener
pub async fn serve_on(listener: TcpListener, dataset: Arc<Dataset>) -> Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!(
        "Serving {} rows on http://{}{}",
        dataset.rows.len(),
        addr,
        USERS_PATH
    );

    axum::serve(listener, router(dataset))
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    Ok(())
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Query endpoint
async fn query_users(
    State(dataset): State<Arc<Dataset>>,
    RawQuery(raw): RawQuery,
) -> impl IntoResponse {
    let query = EndpointQuery::from_query_str(raw.as_deref().unwrap_or_default());

    if !dataset.latency.is_zero() {
        tokio::time::sleep(dataset.latency).await;
    }

    let response = run_query(&dataset.rows, &query);
    tracing::debug!(
        total = response.total,
        returned = response.items.len(),
        "Answered query"
    );
    Json(response)
}
