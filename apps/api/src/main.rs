mod config;
mod editor;
mod errors;
mod layout;
mod models;
mod render;
mod routes;
mod session;
mod state;
mod storage;
#[cfg(test)]
mod test_fixtures;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::editor::autosave::Autosaver;
use crate::routes::build_router;
use crate::session::DemoSessionProvider;
use crate::state::AppState;
use crate::storage::CvStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ResumeForge API v{}", env!("CARGO_PKG_VERSION"));
    info!("Data dir: {}", config.data_dir.display());

    let store = CvStore::new(&config.data_dir);
    let autosave = Autosaver::new(
        store.clone(),
        Duration::from_millis(config.autosave_debounce_ms),
    );
    let sessions = Arc::new(DemoSessionProvider::new(&config.data_dir));

    let state = AppState {
        store,
        autosave,
        sessions,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
