//! Editor endpoints: typed edit commands and explicit save.

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::debug;

use crate::editor::EditCommand;
use crate::errors::AppError;
use crate::models::cv::Cv;
use crate::state::AppState;

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!(
        "CV {id} does not exist. Refresh the list or create a new resume."
    ))
}

async fn require_editor_session(state: &AppState) -> Result<(), AppError> {
    if state.config.require_sign_in && state.sessions.current().await.is_guest() {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

/// PATCH /api/v1/cvs/:id/edit
///
/// Applies one edit command to the freshest view of the CV (pending autosave
/// state wins over the store) and schedules a debounced save. The response
/// carries the post-edit record before it is persisted.
pub async fn handle_edit_cv(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(command): Json<EditCommand>,
) -> Result<Json<Cv>, AppError> {
    require_editor_session(&state).await?;

    let mut cv = state.current_cv(&id).ok_or_else(|| not_found(&id))?;
    debug!("Editing CV {id}, section {}", command.section().label());
    cv.data = command.apply(&cv.data);
    state.autosave.schedule(cv.clone());
    Ok(Json(cv))
}

/// POST /api/v1/cvs/:id/save — flushes the pending autosave immediately.
/// With nothing pending this is a no-op returning the stored record.
pub async fn handle_save_cv(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Cv>, AppError> {
    require_editor_session(&state).await?;

    match state.autosave.flush(&id) {
        Some(saved) => Ok(Json(saved)),
        None => state.store.get(&id).map(Json).ok_or_else(|| not_found(&id)),
    }
}
