//! Rendering endpoints: template catalog, HTML preview, PDF export.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;
use crate::models::template::{Template, TEMPLATES};
use crate::render::format::pdf_file_name;
use crate::render::pdf::render_pdf;
use crate::render::preview::render_preview;
use crate::state::AppState;

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!(
        "CV {id} does not exist. Refresh the list or create a new resume."
    ))
}

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<Vec<Template>> {
    Json(TEMPLATES.to_vec())
}

/// GET /api/v1/cvs/:id/preview
pub async fn handle_preview_cv(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let cv = state.current_cv(&id).ok_or_else(|| not_found(&id))?;
    Ok(Html(render_preview(&cv.title, &cv.data, cv.template_id)))
}

/// GET /api/v1/cvs/:id/export — the PDF document as a download attachment.
pub async fn handle_export_cv(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let cv = state.current_cv(&id).ok_or_else(|| not_found(&id))?;
    let pdf = render_pdf(&cv.title, &cv.data, cv.template_id)?;
    info!("Exported CV {id} as {} bytes of PDF", pdf.len());

    let disposition = format!("attachment; filename=\"{}\"", pdf_file_name(&cv.title));
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Bytes::from(pdf),
    )
        .into_response())
}
