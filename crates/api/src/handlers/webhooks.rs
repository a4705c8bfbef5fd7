use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use engine::RunStatus;

use super::run_response;
use crate::AppState;

/// Webhook trigger endpoint: the raw request body becomes the run's
/// trigger input.
pub async fn handle_webhook(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<Value>), StatusCode> {
    let graph = match state.workflows.read().await.get(&id) {
        Some(workflow) => workflow.graph.clone(),
        None => return Err(StatusCode::NOT_FOUND),
    };

    let log = state.engine.execute(&id, &graph, payload).await;

    let status = if log.status == RunStatus::Failed {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::OK
    };
    Ok((status, Json(run_response(&log))))
}
