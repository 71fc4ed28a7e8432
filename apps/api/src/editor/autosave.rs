//! Debounced autosave for editor sessions.
//!
//! Every edit burst schedules a save for its CV; scheduling again before the
//! delay elapses replaces the pending state and restarts the timer, so a
//! settled burst produces exactly one write. Saves are applied through
//! [`CvStore::update`], so a CV deleted mid-debounce is dropped silently.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::models::cv::Cv;
use crate::storage::CvStore;

struct Pending {
    cv: Cv,
    timer: JoinHandle<()>,
}

#[derive(Clone)]
pub struct Autosaver {
    store: CvStore,
    delay: Duration,
    pending: Arc<Mutex<HashMap<String, Pending>>>,
}

impl Autosaver {
    pub fn new(store: CvStore, delay: Duration) -> Self {
        Autosaver {
            store,
            delay,
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// The pending (not yet persisted) state for a CV, if any.
    ///
    /// Callers read through this before hitting the store so that a burst in
    /// flight is never observed stale.
    pub fn latest(&self, id: &str) -> Option<Cv> {
        let pending = self.pending.lock().expect("autosave lock");
        pending.get(id).map(|p| p.cv.clone())
    }

    /// Replaces the pending state for this CV and restarts its debounce timer.
    pub fn schedule(&self, cv: Cv) {
        let id = cv.id.clone();
        let mut pending = self.pending.lock().expect("autosave lock");
        if let Some(previous) = pending.remove(&id) {
            previous.timer.abort();
        }

        let saver = self.clone();
        let timer_id = id.clone();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(saver.delay).await;
            saver.persist(&timer_id);
        });

        pending.insert(id, Pending { cv, timer });
    }

    /// Persists the pending state for this CV immediately (explicit Save).
    /// Returns the saved record, or `None` when nothing was pending or the
    /// CV no longer exists.
    pub fn flush(&self, id: &str) -> Option<Cv> {
        let taken = {
            let mut pending = self.pending.lock().expect("autosave lock");
            pending.remove(id)
        };
        let taken = taken?;
        taken.timer.abort();
        self.save(taken.cv)
    }

    fn persist(&self, id: &str) {
        let taken = {
            let mut pending = self.pending.lock().expect("autosave lock");
            pending.remove(id)
        };
        if let Some(p) = taken {
            self.save(p.cv);
        }
    }

    fn save(&self, cv: Cv) -> Option<Cv> {
        let id = cv.id.clone();
        let result = self.store.update(&id, move |current| Cv {
            title: cv.title,
            template_id: cv.template_id,
            data: cv.data,
            updated_at: Utc::now(),
            ..current
        });
        match result {
            Ok(Some(saved)) => {
                debug!("Autosaved CV {id}");
                Some(saved)
            }
            Ok(None) => {
                debug!("Dropping autosave for deleted CV {id}");
                None
            }
            Err(e) => {
                warn!("Autosave for CV {id} failed: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::template::TemplateId;
    use tempfile::tempdir;

    fn setup(delay_ms: u64) -> (tempfile::TempDir, CvStore, Autosaver) {
        let dir = tempdir().unwrap();
        let store = CvStore::new(dir.path());
        let autosaver = Autosaver::new(store.clone(), Duration::from_millis(delay_ms));
        (dir, store, autosaver)
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    #[tokio::test]
    async fn test_burst_coalesces_to_final_state() {
        let (_dir, store, autosaver) = setup(20);
        let cv = store.create("Draft", TemplateId::Modern).unwrap();

        for title in ["Draft v1", "Draft v2", "Draft v3"] {
            let mut edited = autosaver.latest(&cv.id).unwrap_or_else(|| cv.clone());
            edited.title = title.to_string();
            autosaver.schedule(edited);
        }
        // read-through sees the pending state before the burst settles
        assert_eq!(autosaver.latest(&cv.id).unwrap().title, "Draft v3");

        settle().await;
        assert_eq!(store.get(&cv.id).unwrap().title, "Draft v3");
        assert!(autosaver.latest(&cv.id).is_none());
    }

    #[tokio::test]
    async fn test_flush_persists_immediately() {
        let (_dir, store, autosaver) = setup(10_000);
        let cv = store.create("Draft", TemplateId::Modern).unwrap();

        let mut edited = cv.clone();
        edited.title = "Saved".to_string();
        autosaver.schedule(edited);

        let saved = autosaver.flush(&cv.id).unwrap();
        assert_eq!(saved.title, "Saved");
        assert_eq!(store.get(&cv.id).unwrap().title, "Saved");
        // nothing pending afterwards
        assert!(autosaver.flush(&cv.id).is_none());
    }

    #[tokio::test]
    async fn test_save_for_deleted_cv_is_dropped() {
        let (_dir, store, autosaver) = setup(20);
        let cv = store.create("Doomed", TemplateId::Modern).unwrap();

        let mut edited = cv.clone();
        edited.title = "Ghost edit".to_string();
        autosaver.schedule(edited);
        store.delete(&cv.id).unwrap();

        settle().await;
        assert!(store.get(&cv.id).is_none());
        assert!(store.load_all().is_empty());
    }

    #[tokio::test]
    async fn test_autosave_bumps_updated_at() {
        let (_dir, store, autosaver) = setup(10);
        let cv = store.create("Draft", TemplateId::Modern).unwrap();

        let mut edited = cv.clone();
        edited.data.personal_info.first_name = "Ada".to_string();
        autosaver.schedule(edited);
        settle().await;

        let saved = store.get(&cv.id).unwrap();
        assert_eq!(saved.data.personal_info.first_name, "Ada");
        assert!(saved.updated_at >= cv.updated_at);
        // creation timestamp survives the save
        assert_eq!(saved.created_at, cv.created_at);
    }
}
