use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::theme::ThemeStore;

/// Where resumes are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendMode {
    /// Through the relay, which injects the secret server side.
    Relay { url: String },
    /// Straight to the Lambda with a secret held by this client.
    Direct { lambda_url: String, secret: String },
}

/// Chat client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend: BackendMode,
    pub theme_file: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |key: &str| {
            get(key).with_context(|| format!("Required environment variable '{key}' is not set"))
        };

        let backend = match get("RELAY_URL") {
            Some(url) => BackendMode::Relay { url },
            None => BackendMode::Direct {
                lambda_url: require("LAMBDA_URL")?,
                secret: require("AWS_SECRET")?,
            },
        };

        let theme_file = match get("THEME_FILE") {
            Some(path) => PathBuf::from(path),
            None => ThemeStore::default_path()
                .context("No config directory on this platform; set THEME_FILE")?,
        };

        Ok(Config {
            backend,
            theme_file,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "warn".to_string()),
        })
    }
}
