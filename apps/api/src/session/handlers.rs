//! Session endpoints over the injected provider.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::session::AppSession;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignInRequest {
    pub email: String,
    pub full_name: String,
}

/// GET /api/v1/session
pub async fn handle_get_session(State(state): State<AppState>) -> Json<AppSession> {
    Json(state.sessions.current().await)
}

/// POST /api/v1/session/sign-in
pub async fn handle_sign_in(
    State(state): State<AppState>,
    Json(req): Json<SignInRequest>,
) -> Result<Json<AppSession>, AppError> {
    let session = state.sessions.sign_in(&req.email, &req.full_name).await?;
    info!("Signed in demo user");
    Ok(Json(session))
}

/// POST /api/v1/session/sign-out
pub async fn handle_sign_out(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.sessions.sign_out().await?;
    Ok(StatusCode::NO_CONTENT)
}
