use anyhow::{Context, Result};

/// Relay configuration loaded from environment variables.
/// Startup fails if the backend URL or the shared secret is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub lambda_url: String,
    pub aws_secret: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            lambda_url: require_env("LAMBDA_URL")?,
            aws_secret: require_env("AWS_SECRET")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8787".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
