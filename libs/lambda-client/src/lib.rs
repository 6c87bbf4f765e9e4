//! Lambda client: the single point of entry for calls to the resume inference backend.
//!
//! Both the relay and the chat client's direct mode go through this crate, so the
//! `{secret, resume_text, job_posting_url}` contract is defined exactly once.
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

/// Path the relay serves and the chat client's relay mode targets.
pub const PROCESS_RESUME_PATH: &str = "/api/process-resume";

#[derive(Debug, Error)]
pub enum LambdaError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Body accepted by the relay: the resume text and the job posting it is judged against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessResumeRequest {
    pub resume_text: String,
    pub job_posting_url: String,
}

/// Body sent to the backend. The secret is attached server side (or by the direct client).
#[derive(Debug, Serialize)]
pub struct LambdaRequest<'a> {
    pub secret: &'a str,
    pub resume_text: &'a str,
    pub job_posting_url: &'a str,
}

/// Expected success body of the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LambdaResponse {
    pub response: String,
}

/// Failure body produced by the relay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayErrorBody {
    pub error: String,
}

/// Thin wrapper over the backend endpoint. Cheap to clone; the inner `reqwest::Client`
/// pools connections.
#[derive(Clone)]
pub struct LambdaClient {
    client: Client,
    url: String,
    secret: String,
}

impl LambdaClient {
    /// No request timeout is configured: a call runs until the backend answers or
    /// the transport gives up.
    pub fn new(url: impl Into<String>, secret: impl Into<String>) -> Result<Self, LambdaError> {
        Ok(Self {
            client: Client::builder().build()?,
            url: url.into(),
            secret: secret.into(),
        })
    }

    /// POSTs `{secret, resume_text, job_posting_url}` and returns the body as raw JSON.
    /// The upstream status code is not interpreted; any JSON body is returned as is.
    pub async fn forward(
        &self,
        resume_text: &str,
        job_posting_url: &str,
    ) -> Result<Value, LambdaError> {
        let body = LambdaRequest {
            secret: &self.secret,
            resume_text,
            job_posting_url,
        };

        let response = self.client.post(&self.url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Backend returned {status}, relaying body anyway");
        }

        let bytes = response.bytes().await?;
        let value: Value = serde_json::from_slice(&bytes)?;

        debug!(
            "Backend call succeeded: status={}, bytes={}",
            status.as_u16(),
            bytes.len()
        );

        Ok(value)
    }
}
