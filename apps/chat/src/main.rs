mod backend;
mod config;
mod errors;
mod extract;
mod models;
mod render;
mod repl;
mod session;
mod theme;

use anyhow::Result;
use lambda_client::LambdaClient;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::backend::{DirectBackend, RelayBackend, ResumeBackend};
use crate::config::{BackendMode, Config};
use crate::extract::PdfTextExtractor;
use crate::session::ChatSession;
use crate::theme::ThemeStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Logs go to stderr so they never interleave with the conversation on stdout
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={level},lambda_client={level}",
                env!("CARGO_PKG_NAME"),
                level = &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting resume chat v{}", env!("CARGO_PKG_VERSION"));

    let backend: Box<dyn ResumeBackend> = match &config.backend {
        BackendMode::Relay { url } => {
            info!("Sending resumes through the relay at {url}");
            Box::new(RelayBackend::new(url)?)
        }
        BackendMode::Direct { lambda_url, secret } => {
            info!("Sending resumes directly to the backend");
            Box::new(DirectBackend::new(LambdaClient::new(lambda_url, secret)?))
        }
    };

    let session = ChatSession::new(ThemeStore::new(&config.theme_file));
    info!("Theme: {}", session.theme());

    repl::run(session, &PdfTextExtractor, backend.as_ref()).await
}
