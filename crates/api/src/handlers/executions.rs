use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use engine::ExecutionLog;

use crate::AppState;

pub async fn list(State(state): State<AppState>) -> Json<Vec<ExecutionLog>> {
    Json(state.engine.store().list())
}

pub async fn get(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ExecutionLog>, StatusCode> {
    match state.engine.store().get(&id) {
        Some(log) => Ok(Json(log)),
        None => Err(StatusCode::NOT_FOUND),
    }
}
