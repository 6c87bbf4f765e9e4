use lambda_client::LambdaClient;

use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds nothing mutable: every request is handled independently.
#[derive(Clone)]
pub struct AppState {
    pub lambda: LambdaClient,
    pub config: Config,
}
