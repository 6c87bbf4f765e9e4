use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lambda_client::{LambdaError, RelayErrorBody};
use thiserror::Error;

/// Relay error type.
/// Every failure on the forwarding path collapses into `500 {"error": message}`;
/// unknown routes are a bare `404 Not found`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found")]
    NotFound,

    #[error("{0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("{0}")]
    Backend(#[from] LambdaError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
            AppError::MalformedBody(e) => {
                tracing::error!("Malformed request body: {e}");
                relay_failure(e.to_string())
            }
            AppError::Backend(e) => {
                tracing::error!("Backend error: {e}");
                relay_failure(e.to_string())
            }
        }
    }
}

fn relay_failure(error: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(RelayErrorBody { error }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        let response = AppError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_malformed_body_is_500() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let response = AppError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
