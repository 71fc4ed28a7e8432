pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::editor::handlers as editor_handlers;
use crate::render::handlers as render_handlers;
use crate::session::handlers as session_handlers;
use crate::state::AppState;
use crate::storage::handlers as cv_handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Template catalog
        .route(
            "/api/v1/templates",
            get(render_handlers::handle_list_templates),
        )
        // CV collection
        .route(
            "/api/v1/cvs",
            get(cv_handlers::handle_list_cvs).post(cv_handlers::handle_create_cv),
        )
        .route(
            "/api/v1/cvs/:id",
            get(cv_handlers::handle_get_cv)
                .put(cv_handlers::handle_put_cv)
                .delete(cv_handlers::handle_delete_cv),
        )
        .route(
            "/api/v1/cvs/:id/duplicate",
            post(cv_handlers::handle_duplicate_cv),
        )
        // Editor
        .route(
            "/api/v1/cvs/:id/edit",
            patch(editor_handlers::handle_edit_cv),
        )
        .route("/api/v1/cvs/:id/save", post(editor_handlers::handle_save_cv))
        // Rendering
        .route(
            "/api/v1/cvs/:id/preview",
            get(render_handlers::handle_preview_cv),
        )
        .route(
            "/api/v1/cvs/:id/export",
            get(render_handlers::handle_export_cv),
        )
        // Session
        .route("/api/v1/session", get(session_handlers::handle_get_session))
        .route(
            "/api/v1/session/sign-in",
            post(session_handlers::handle_sign_in),
        )
        .route(
            "/api/v1/session/sign-out",
            post(session_handlers::handle_sign_out),
        )
        .with_state(state)
}
