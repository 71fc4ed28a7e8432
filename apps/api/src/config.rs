use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default so a bare `cargo run` works out of the box.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the CV collection and the demo-user file.
    pub data_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
    /// Debounce delay for editor autosave, in milliseconds.
    pub autosave_debounce_ms: u64,
    /// When true, the editor endpoints reject guest sessions.
    pub require_sign_in: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            data_dir: std::env::var("DATA_DIR")
                .unwrap_or_else(|_| "./data".to_string())
                .into(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            autosave_debounce_ms: std::env::var("AUTOSAVE_DEBOUNCE_MS")
                .unwrap_or_else(|_| "400".to_string())
                .parse::<u64>()
                .context("AUTOSAVE_DEBOUNCE_MS must be a number of milliseconds")?,
            require_sign_in: std::env::var("REQUIRE_SIGN_IN")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        })
    }
}
