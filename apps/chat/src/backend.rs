//! Backends a chat session can send resumes to: the Lambda itself, or the relay in front of it.

use async_trait::async_trait;
use lambda_client::{
    LambdaClient, LambdaResponse, ProcessResumeRequest, RelayErrorBody, PROCESS_RESUME_PATH,
};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::errors::BackendError;

#[async_trait]
pub trait ResumeBackend: Send + Sync {
    /// Returns the feedback text for a resume judged against a job posting.
    async fn process(&self, resume_text: &str, job_posting_url: &str)
        -> Result<String, BackendError>;
}

/// Calls the Lambda directly with the shared secret held by this client.
pub struct DirectBackend {
    lambda: LambdaClient,
}

impl DirectBackend {
    pub fn new(lambda: LambdaClient) -> Self {
        Self { lambda }
    }
}

#[async_trait]
impl ResumeBackend for DirectBackend {
    async fn process(
        &self,
        resume_text: &str,
        job_posting_url: &str,
    ) -> Result<String, BackendError> {
        let value = self.lambda.forward(resume_text, job_posting_url).await?;
        decode_response(value)
    }
}

/// Calls the relay, which holds the secret server side.
pub struct RelayBackend {
    client: Client,
    endpoint: String,
}

impl RelayBackend {
    pub fn new(relay_url: &str) -> Result<Self, BackendError> {
        Ok(Self {
            client: Client::builder().build()?,
            endpoint: format!("{}{}", relay_url.trim_end_matches('/'), PROCESS_RESUME_PATH),
        })
    }
}

#[async_trait]
impl ResumeBackend for RelayBackend {
    async fn process(
        &self,
        resume_text: &str,
        job_posting_url: &str,
    ) -> Result<String, BackendError> {
        let body = ProcessResumeRequest {
            resume_text: resume_text.to_string(),
            job_posting_url: job_posting_url.to_string(),
        };

        debug!("Posting resume to relay at {}", self.endpoint);
        let response = self.client.post(&self.endpoint).json(&body).send().await?;
        let bytes = response.bytes().await?;
        let value: Value = serde_json::from_slice(&bytes)?;

        if let Ok(RelayErrorBody { error }) = serde_json::from_value::<RelayErrorBody>(value.clone())
        {
            return Err(BackendError::Relay(error));
        }

        decode_response(value)
    }
}

fn decode_response(value: Value) -> Result<String, BackendError> {
    serde_json::from_value::<LambdaResponse>(value)
        .map(|r| r.response)
        .map_err(|_| BackendError::MalformedResponse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::json;

    async fn spawn_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn test_decode_response_requires_text() {
        assert_eq!(
            decode_response(json!({ "response": "Strong match" })).unwrap(),
            "Strong match"
        );
        assert!(matches!(
            decode_response(json!({ "message": "nope" })),
            Err(BackendError::MalformedResponse)
        ));
        assert!(matches!(
            decode_response(json!({ "response": 42 })),
            Err(BackendError::MalformedResponse)
        ));
    }

    #[tokio::test]
    async fn test_direct_backend_sends_secret() {
        let router = Router::new().route(
            "/lambda",
            post(|Json(body): Json<Value>| async move {
                let verdict = if body["secret"] == "abc" { "ok" } else { "bad secret" };
                Json(json!({ "response": verdict }))
            }),
        );
        let base = spawn_server(router).await;
        let backend = DirectBackend::new(LambdaClient::new(format!("{base}/lambda"), "abc").unwrap());

        let text = backend.process("resume", "https://jobs.example/1").await.unwrap();

        assert_eq!(text, "ok");
    }

    #[tokio::test]
    async fn test_relay_backend_posts_to_process_resume() {
        let router = Router::new().route(
            "/api/process-resume",
            post(|Json(body): Json<ProcessResumeRequest>| async move {
                Json(json!({ "response": format!("{} @ {}", body.resume_text, body.job_posting_url) }))
            }),
        );
        let base = spawn_server(router).await;
        let backend = RelayBackend::new(&format!("{base}/")).unwrap();

        let text = backend.process("resume", "https://jobs.example/1").await.unwrap();

        assert_eq!(text, "resume @ https://jobs.example/1");
    }

    #[tokio::test]
    async fn test_relay_backend_surfaces_relay_error() {
        let router = Router::new().route(
            "/api/process-resume",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "connection refused" })),
                )
            }),
        );
        let base = spawn_server(router).await;
        let backend = RelayBackend::new(&base).unwrap();

        let err = backend.process("resume", "").await.unwrap_err();

        assert_eq!(err.to_string(), "Relay error: connection refused");
    }
}
