//! Session identity, behind a pluggable provider.
//!
//! `AppState` holds an `Arc<dyn SessionProvider>`, injected at startup. The
//! default backend is `DemoSessionProvider`, which persists one demo user as
//! JSON in the data dir. A remote auth backend can be swapped in without
//! touching handlers; the app consumes sessions read-only either way.

pub mod handlers;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppError;
use crate::models::session::AppSession;

const DEMO_USER_FILE: &str = "resumeforge_demo_user.json";

/// The session backend. Carried in `AppState` as `Arc<dyn SessionProvider>`.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// The current session; `Guest` when nobody is signed in.
    async fn current(&self) -> AppSession;

    /// Signs in and returns the new session. Read-only backends reject this.
    async fn sign_in(&self, email: &str, full_name: &str) -> Result<AppSession, AppError>;

    async fn sign_out(&self) -> Result<(), AppError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct DemoUser {
    email: String,
    full_name: String,
}

impl DemoUser {
    fn display_name(&self) -> String {
        if self.full_name.trim().is_empty() {
            self.email.clone()
        } else {
            self.full_name.trim().to_string()
        }
    }
}

/// File-backed demo sign-in. One user at a time; signing in overwrites.
pub struct DemoSessionProvider {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl DemoSessionProvider {
    pub fn new(data_dir: &Path) -> Self {
        DemoSessionProvider {
            path: data_dir.join(DEMO_USER_FILE),
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Reads the stored demo user. Missing, corrupt, or empty-email files all
    /// mean nobody is signed in.
    fn load(&self) -> Option<DemoUser> {
        let raw = std::fs::read(&self.path).ok()?;
        let user: DemoUser = match serde_json::from_slice(&raw) {
            Ok(user) => user,
            Err(e) => {
                warn!("Ignoring unreadable demo-user file: {e}");
                return None;
            }
        };
        if user.email.trim().is_empty() {
            return None;
        }
        Some(user)
    }
}

#[async_trait]
impl SessionProvider for DemoSessionProvider {
    async fn current(&self) -> AppSession {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        match self.load() {
            Some(user) => AppSession::Demo {
                email: user.email.trim().to_string(),
                display_name: user.display_name(),
            },
            None => AppSession::guest(),
        }
    }

    async fn sign_in(&self, email: &str, full_name: &str) -> Result<AppSession, AppError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(AppError::Validation("email must not be empty".to_string()));
        }
        let user = DemoUser {
            email: email.to_string(),
            full_name: full_name.trim().to_string(),
        };

        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec_pretty(&user).map_err(anyhow::Error::from)?;
        std::fs::write(&self.path, json)?;
        Ok(AppSession::Demo {
            email: user.email.clone(),
            display_name: user.display_name(),
        })
    }

    async fn sign_out(&self) -> Result<(), AppError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Storage(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_current_without_file_is_guest() {
        let dir = TempDir::new().unwrap();
        let provider = DemoSessionProvider::new(dir.path());
        assert!(provider.current().await.is_guest());
    }

    #[tokio::test]
    async fn test_sign_in_then_current_returns_demo_session() {
        let dir = TempDir::new().unwrap();
        let provider = DemoSessionProvider::new(dir.path());
        provider.sign_in("ada@example.com", "Ada Lovelace").await.unwrap();
        assert_eq!(
            provider.current().await,
            AppSession::Demo {
                email: "ada@example.com".to_string(),
                display_name: "Ada Lovelace".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_sign_in_blank_name_falls_back_to_email() {
        let dir = TempDir::new().unwrap();
        let provider = DemoSessionProvider::new(dir.path());
        let session = provider.sign_in("ada@example.com", "   ").await.unwrap();
        assert_eq!(
            session,
            AppSession::Demo {
                email: "ada@example.com".to_string(),
                display_name: "ada@example.com".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_sign_in_empty_email_rejected() {
        let dir = TempDir::new().unwrap();
        let provider = DemoSessionProvider::new(dir.path());
        assert!(matches!(
            provider.sign_in("  ", "Ada").await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_sign_out_clears_session_and_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let provider = DemoSessionProvider::new(dir.path());
        provider.sign_in("ada@example.com", "Ada").await.unwrap();
        provider.sign_out().await.unwrap();
        assert!(provider.current().await.is_guest());
        provider.sign_out().await.unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_user_file_treated_as_guest() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(DEMO_USER_FILE), b"{not json").unwrap();
        let provider = DemoSessionProvider::new(dir.path());
        assert!(provider.current().await.is_guest());
    }

    #[tokio::test]
    async fn test_empty_email_on_disk_treated_as_guest() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(DEMO_USER_FILE),
            br#"{"email": "", "full_name": "Nobody"}"#,
        )
        .unwrap();
        let provider = DemoSessionProvider::new(dir.path());
        assert!(provider.current().await.is_guest());
    }
}
