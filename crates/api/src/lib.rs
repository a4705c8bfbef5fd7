//! `api` crate — HTTP layer over the execution engine.
//!
//! Exposes:
//!   POST   /api/v1/workflows
//!   GET    /api/v1/workflows
//!   GET    /api/v1/workflows/{id}
//!   DELETE /api/v1/workflows/{id}
//!   POST   /api/v1/workflows/{id}/execute
//!   POST   /api/v1/webhook/{id}
//!   GET    /api/v1/executions
//!   GET    /api/v1/executions/{id}
//!
//! Workflows live in an in-memory map: durable persistence is a caller
//! concern — the engine only ever sees plain graph values, and this layer
//! only ever sees finished logs.

pub mod handlers;

use std::collections::HashMap;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use chrono::{DateTime, Utc};
use engine::{ExecutionEngine, WorkflowGraph};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// A stored workflow record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredWorkflow {
    pub id: String,
    pub name: String,
    pub graph: WorkflowGraph,
    pub created_at: DateTime<Utc>,
}

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ExecutionEngine>,
    pub workflows: Arc<RwLock<HashMap<String, StoredWorkflow>>>,
}

impl AppState {
    pub fn new(engine: Arc<ExecutionEngine>) -> Self {
        Self {
            engine,
            workflows: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/v1/workflows",
            post(handlers::workflows::create).get(handlers::workflows::list),
        )
        .route(
            "/api/v1/workflows/:id",
            get(handlers::workflows::get).delete(handlers::workflows::delete),
        )
        .route(
            "/api/v1/workflows/:id/execute",
            post(handlers::workflows::execute),
        )
        .route("/api/v1/webhook/:id", post(handlers::webhooks::handle_webhook))
        .route("/api/v1/executions", get(handlers::executions::list))
        .route("/api/v1/executions/:id", get(handlers::executions::get))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until the process exits.
pub async fn serve(bind: &str, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!("listening on {bind}");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
