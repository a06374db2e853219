use axum::{
    extract::{Path, State},
    Json,
};

use chamados_core::storage::RepositoryError;
use chamados_core::ticket::Priority;

use crate::{handlers::AppError, state::AppState};

/// List all priorities (GET /Prioridade).
pub async fn list_priorities(
    State(state): State<AppState>,
) -> Result<Json<Vec<Priority>>, AppError> {
    let priorities = state.priority_repo.list_priorities().await?;
    Ok(Json(priorities))
}

/// Get a single priority by ID (GET /Prioridade/{id}).
pub async fn get_priority(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Priority>, AppError> {
    match state.priority_repo.get_priority(id).await? {
        Some(priority) => Ok(Json(priority)),
        None => Err(RepositoryError::not_found("Priority", id).into()),
    }
}
