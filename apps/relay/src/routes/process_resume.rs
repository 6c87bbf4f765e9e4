//! Axum handler for the relay's only route.

use axum::{extract::State, Json};
use bytes::Bytes;
use lambda_client::ProcessResumeRequest;
use serde_json::Value;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/process-resume
///
/// Attaches the server-held secret and forwards the pair to the backend.
/// The backend's JSON is returned untouched. The body is parsed here rather than by
/// the `Json` extractor so a malformed body gets the same 500 shape as a backend failure.
pub async fn handle_process_resume(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let request: ProcessResumeRequest = serde_json::from_slice(&body)?;
    info!(
        "Received resume ({} chars) for job posting '{}'",
        request.resume_text.len(),
        request.job_posting_url
    );

    debug!("Forwarding to {}", state.config.lambda_url);
    let value = state
        .lambda
        .forward(&request.resume_text, &request.job_posting_url)
        .await?;

    info!("Relayed backend response");
    Ok(Json(value))
}
