use lambda_client::LambdaError;
use thiserror::Error;

/// PDF text extraction failure. Aborts the submission it happened in.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Invalid PDF: {0}")]
    Pdf(String),

    #[error("PDF extraction aborted: {0}")]
    Aborted(#[from] tokio::task::JoinError),
}

/// Failure talking to the inference backend, directly or through the relay.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error(transparent)]
    Lambda(#[from] LambdaError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Relay error: {0}")]
    Relay(String),

    #[error("Malformed backend response: missing 'response' text")]
    MalformedResponse,
}

/// Anything that can go wrong inside one submission. Rendered into the
/// assistant's error message, never propagated past the session.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AttachError {
    #[error("'{name}' is not a PDF (declared type: {content_type})")]
    NotPdf { name: String, content_type: String },

    #[error("Cannot change the attachment while a resume is being processed")]
    Busy,
}

/// Reasons a submit call did nothing at all.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitRejected {
    #[error("Attach a PDF resume first")]
    NoAttachment,

    #[error("A resume is already being processed")]
    Busy,
}
