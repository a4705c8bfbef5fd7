use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use engine::validate_graph;

use super::run_response;
use crate::{AppState, StoredWorkflow};

#[derive(serde::Deserialize)]
pub struct CreateWorkflowDto {
    pub name: String,
    pub graph: Value,
}

#[derive(serde::Deserialize, Default)]
pub struct ExecuteWorkflowDto {
    #[serde(default = "default_input")]
    pub input: Value,
}

fn default_input() -> Value {
    json!({})
}

pub async fn list(State(state): State<AppState>) -> Json<Vec<StoredWorkflow>> {
    let workflows = state.workflows.read().await;
    let mut all: Vec<StoredWorkflow> = workflows.values().cloned().collect();
    all.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    Json(all)
}

pub async fn get(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<StoredWorkflow>, StatusCode> {
    match state.workflows.read().await.get(&id) {
        Some(workflow) => Ok(Json(workflow.clone())),
        None => Err(StatusCode::NOT_FOUND),
    }
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateWorkflowDto>,
) -> Result<(StatusCode, Json<StoredWorkflow>), (StatusCode, Json<Value>)> {
    // Malformed documents are rejected here, before they reach the engine.
    let graph: engine::WorkflowGraph = match serde_json::from_value(payload.graph) {
        Ok(graph) => graph,
        Err(e) => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": format!("invalid graph document: {e}") })),
            ))
        }
    };
    if let Err(e) = validate_graph(&graph) {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": e.to_string() })),
        ));
    }

    let workflow = StoredWorkflow {
        id: Uuid::new_v4().to_string(),
        name: payload.name,
        graph,
        created_at: chrono::Utc::now(),
    };
    state
        .workflows
        .write()
        .await
        .insert(workflow.id.clone(), workflow.clone());

    Ok((StatusCode::CREATED, Json(workflow)))
}

pub async fn delete(Path(id): Path<String>, State(state): State<AppState>) -> StatusCode {
    match state.workflows.write().await.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}

pub async fn execute(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<ExecuteWorkflowDto>,
) -> Result<Json<Value>, StatusCode> {
    let graph = match state.workflows.read().await.get(&id) {
        Some(workflow) => workflow.graph.clone(),
        None => return Err(StatusCode::NOT_FOUND),
    };

    let log = state.engine.execute(&id, &graph, payload.input).await;
    Ok(Json(run_response(&log)))
}
