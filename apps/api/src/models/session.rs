use serde::{Deserialize, Serialize};

/// The session identity visible to the app.
///
/// Tagged union: `Guest` (no identity), `Demo` (local demo sign-in), and
/// `Remote` (an external auth backend, consumed read-only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AppSession {
    Guest {
        display_name: String,
    },
    Demo {
        email: String,
        display_name: String,
    },
    Remote {
        email: String,
        display_name: String,
    },
}

impl AppSession {
    pub fn guest() -> Self {
        AppSession::Guest {
            display_name: "Guest".to_string(),
        }
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, AppSession::Guest { .. })
    }
}
