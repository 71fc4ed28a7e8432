//! CRUD handlers for the CV collection.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::models::cv::Cv;
use crate::models::template::TemplateId;
use crate::state::AppState;
use crate::storage::duplicate_cv;

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!(
        "CV {id} does not exist. Refresh the list or create a new resume."
    ))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateCvRequest {
    pub title: String,
    pub template_id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateCvRequest {
    pub title: Option<String>,
    pub template_id: Option<String>,
    pub data: Option<Value>,
}

/// GET /api/v1/cvs — the collection, newest first, with pending autosave
/// state read through.
pub async fn handle_list_cvs(State(state): State<AppState>) -> Json<Vec<Cv>> {
    let cvs = state
        .store
        .load_all()
        .into_iter()
        .map(|cv| state.autosave.latest(&cv.id).unwrap_or(cv))
        .collect();
    Json(cvs)
}

/// POST /api/v1/cvs
pub async fn handle_create_cv(
    State(state): State<AppState>,
    Json(req): Json<CreateCvRequest>,
) -> Result<(StatusCode, Json<Cv>), AppError> {
    let template_id = TemplateId::parse_or_default(&req.template_id);
    let cv = state.store.create(&req.title, template_id)?;
    info!("Created CV {} ({})", cv.id, cv.title);
    Ok((StatusCode::CREATED, Json(cv)))
}

/// GET /api/v1/cvs/:id
pub async fn handle_get_cv(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Cv>, AppError> {
    state.current_cv(&id).map(Json).ok_or_else(|| not_found(&id))
}

/// PUT /api/v1/cvs/:id — replaces title/template/data wholesale. The data
/// payload is normalized, so partial or malformed shapes coerce to defaults.
pub async fn handle_put_cv(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateCvRequest>,
) -> Result<Json<Cv>, AppError> {
    // An in-flight autosave burst would overwrite this replace; settle it first.
    state.autosave.flush(&id);

    let updated = state.store.update(&id, |mut cv| {
        if let Some(title) = &req.title {
            let trimmed = title.trim();
            if !trimmed.is_empty() {
                cv.title = trimmed.to_string();
            }
        }
        if let Some(template_id) = &req.template_id {
            cv.template_id = TemplateId::parse_or_default(template_id);
        }
        if let Some(data) = &req.data {
            cv.data = crate::storage::normalize::normalize_cv_data(data);
        }
        cv.updated_at = chrono::Utc::now();
        cv
    })?;
    updated.map(Json).ok_or_else(|| not_found(&id))
}

/// DELETE /api/v1/cvs/:id
pub async fn handle_delete_cv(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.store.delete(&id)? {
        info!("Deleted CV {id}");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(&id))
    }
}

/// POST /api/v1/cvs/:id/duplicate
pub async fn handle_duplicate_cv(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<Cv>), AppError> {
    let source = state.current_cv(&id).ok_or_else(|| not_found(&id))?;
    let copy = duplicate_cv(&source);
    state.store.upsert(copy.clone())?;
    info!("Duplicated CV {id} -> {}", copy.id);
    Ok((StatusCode::CREATED, Json(copy)))
}
