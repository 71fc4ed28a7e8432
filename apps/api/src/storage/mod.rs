//! File-backed repository for the CV collection.
//!
//! The whole collection is one JSON array persisted under a fixed file in the
//! data dir, newest record first. All operations are synchronous
//! read-modify-write over that file; an in-process mutex serializes them.
//! There is no cross-process locking: the last writer wins, which is the
//! intended semantics for a single-user local store.

pub mod handlers;
pub mod normalize;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::warn;

use crate::models::cv::{generate_id, Cv};
use crate::models::template::TemplateId;
use crate::storage::normalize::{normalize_cv, normalize_cv_data};

/// Fixed storage key for the persisted collection.
pub const STORAGE_FILE: &str = "resumeforge_cvs.json";

#[derive(Clone)]
pub struct CvStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl CvStore {
    pub fn new(data_dir: &Path) -> Self {
        CvStore {
            path: data_dir.join(STORAGE_FILE),
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Loads the full collection. Missing file, unreadable JSON, or a
    /// non-array payload all yield an empty collection; individual malformed
    /// records are normalized or dropped. Never fails.
    pub fn load_all(&self) -> Vec<Cv> {
        let Ok(raw) = fs::read_to_string(&self.path) else {
            return Vec::new();
        };
        let parsed: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("Discarding corrupt CV storage file: {e}");
                return Vec::new();
            }
        };
        let Some(items) = parsed.as_array() else {
            warn!("CV storage file is not an array; starting empty");
            return Vec::new();
        };
        items.iter().filter_map(normalize_cv).collect()
    }

    /// Overwrites the stored collection.
    pub fn save_all(&self, cvs: &[Cv]) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec(cvs).expect("CV collection serializes");
        fs::write(&self.path, json)
    }

    /// Creates and persists a fresh CV record, prepended to the collection.
    pub fn create(&self, title: &str, template_id: TemplateId) -> std::io::Result<Cv> {
        let cv = Cv::new(title, template_id);
        self.upsert(cv.clone())?;
        Ok(cv)
    }

    /// Finds one record by id.
    pub fn get(&self, id: &str) -> Option<Cv> {
        self.load_all().into_iter().find(|cv| cv.id == id)
    }

    /// Replaces the record with a matching id, or prepends a new one.
    pub fn upsert(&self, cv: Cv) -> std::io::Result<Vec<Cv>> {
        let _guard = self.lock.lock().expect("store lock");
        let mut cvs = self.load_all();
        match cvs.iter_mut().find(|existing| existing.id == cv.id) {
            Some(slot) => *slot = cv,
            None => cvs.insert(0, cv),
        }
        self.save_all(&cvs)?;
        Ok(cvs)
    }

    /// Applies a transform to the record with the given id.
    ///
    /// Returns `None` (and writes nothing) when the id is absent. The stored
    /// id always survives the transform.
    pub fn update(
        &self,
        id: &str,
        transform: impl FnOnce(Cv) -> Cv,
    ) -> std::io::Result<Option<Cv>> {
        let _guard = self.lock.lock().expect("store lock");
        let mut cvs = self.load_all();
        let Some(index) = cvs.iter().position(|cv| cv.id == id) else {
            return Ok(None);
        };
        let mut next = transform(cvs[index].clone());
        next.id = id.to_string();
        cvs[index] = next.clone();
        self.save_all(&cvs)?;
        Ok(Some(next))
    }

    /// Removes exactly the record with the given id, leaving order untouched.
    /// Returns whether anything was removed.
    pub fn delete(&self, id: &str) -> std::io::Result<bool> {
        let _guard = self.lock.lock().expect("store lock");
        let mut cvs = self.load_all();
        let before = cvs.len();
        cvs.retain(|cv| cv.id != id);
        if cvs.len() == before {
            return Ok(false);
        }
        self.save_all(&cvs)?;
        Ok(true)
    }
}

/// Clones a CV into an independent record: new id, title suffixed
/// " (Copy)", data re-normalized, fresh timestamps. Pure; callers persist
/// the result with [`CvStore::upsert`].
pub fn duplicate_cv(cv: &Cv) -> Cv {
    let now = Utc::now();
    let data_json = serde_json::to_value(&cv.data).expect("CV data serializes");
    Cv {
        id: generate_id(),
        user_id: cv.user_id.clone(),
        title: format!("{} (Copy)", cv.title),
        template_id: cv.template_id,
        data: normalize_cv_data(&data_json),
        created_at: now,
        updated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store() -> (tempfile::TempDir, CvStore) {
        let dir = tempdir().unwrap();
        let store = CvStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_load_all_missing_file_is_empty() {
        let (_dir, store) = store();
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn test_load_all_corrupt_json_is_empty() {
        let (dir, store) = store();
        fs::write(dir.path().join(STORAGE_FILE), "{not json").unwrap();
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn test_load_all_non_array_is_empty() {
        let (dir, store) = store();
        fs::write(dir.path().join(STORAGE_FILE), r#"{"id":"cv-1"}"#).unwrap();
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn test_load_all_drops_idless_records() {
        let (dir, store) = store();
        fs::write(
            dir.path().join(STORAGE_FILE),
            r#"[{"id":"cv-1","title":"Keep"},{"title":"No id"},"junk"]"#,
        )
        .unwrap();
        let cvs = store.load_all();
        assert_eq!(cvs.len(), 1);
        assert_eq!(cvs[0].title, "Keep");
    }

    #[test]
    fn test_create_prepends_newest_first() {
        let (_dir, store) = store();
        let first = store.create("First", TemplateId::Modern).unwrap();
        let second = store.create("Second", TemplateId::Classic).unwrap();
        let cvs = store.load_all();
        assert_eq!(cvs[0].id, second.id);
        assert_eq!(cvs[1].id, first.id);
    }

    #[test]
    fn test_create_blank_title_defaults() {
        let (_dir, store) = store();
        let cv = store.create("   ", TemplateId::Modern).unwrap();
        assert_eq!(cv.title, "Untitled Resume");
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let (_dir, store) = store();
        let a = store.create("A", TemplateId::Modern).unwrap();
        let _b = store.create("B", TemplateId::Modern).unwrap();
        let mut edited = a.clone();
        edited.title = "A v2".to_string();
        let cvs = store.upsert(edited).unwrap();
        assert_eq!(cvs.len(), 2);
        assert_eq!(cvs[1].id, a.id);
        assert_eq!(cvs[1].title, "A v2");
    }

    #[test]
    fn test_update_absent_id_is_noop() {
        let (_dir, store) = store();
        store.create("A", TemplateId::Modern).unwrap();
        let result = store
            .update("missing", |mut cv| {
                cv.title = "changed".to_string();
                cv
            })
            .unwrap();
        assert!(result.is_none());
        assert_eq!(store.load_all()[0].title, "A");
    }

    #[test]
    fn test_update_preserves_id() {
        let (_dir, store) = store();
        let cv = store.create("A", TemplateId::Modern).unwrap();
        let updated = store
            .update(&cv.id, |mut current| {
                current.id = "hijacked".to_string();
                current.title = "A v2".to_string();
                current
            })
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, cv.id);
        assert_eq!(updated.title, "A v2");
    }

    #[test]
    fn test_delete_removes_exactly_one_keeps_order() {
        let (_dir, store) = store();
        let a = store.create("A", TemplateId::Modern).unwrap();
        let b = store.create("B", TemplateId::Modern).unwrap();
        let c = store.create("C", TemplateId::Modern).unwrap();
        assert!(store.delete(&b.id).unwrap());
        let ids: Vec<String> = store.load_all().into_iter().map(|cv| cv.id).collect();
        assert_eq!(ids, vec![c.id, a.id]);
        assert!(!store.delete(&b.id).unwrap());
    }

    #[test]
    fn test_duplicate_fresh_identity_same_data() {
        let (_dir, store) = store();
        let mut cv = store.create("Senior Engineer", TemplateId::Creative).unwrap();
        cv.data.personal_info.first_name = "Ada".to_string();
        let cv = store.upsert(cv).unwrap().remove(0);

        let copy = duplicate_cv(&cv);
        assert_ne!(copy.id, cv.id);
        assert_eq!(copy.title, "Senior Engineer (Copy)");
        assert_eq!(copy.template_id, cv.template_id);
        assert_eq!(copy.data, cv.data);
        assert!(copy.created_at >= cv.created_at);
        assert_eq!(copy.created_at, copy.updated_at);
    }
}
