use std::sync::Arc;

use crate::config::Config;
use crate::editor::autosave::Autosaver;
use crate::session::SessionProvider;
use crate::storage::CvStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: CvStore,
    pub autosave: Autosaver,
    /// Pluggable session backend. Default: DemoSessionProvider.
    pub sessions: Arc<dyn SessionProvider>,
    pub config: Config,
}

impl AppState {
    /// The freshest view of a CV: pending autosave state when a burst is in
    /// flight, the stored record otherwise.
    pub fn current_cv(&self, id: &str) -> Option<crate::models::cv::Cv> {
        self.autosave.latest(id).or_else(|| self.store.get(id))
    }
}
