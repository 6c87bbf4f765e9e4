pub mod process_resume;

use axum::{routing::post, Router};
use lambda_client::PROCESS_RESUME_PATH;

use crate::errors::AppError;
use crate::state::AppState;

async fn not_found() -> AppError {
    AppError::NotFound
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            PROCESS_RESUME_PATH,
            post(process_resume::handle_process_resume).fallback(not_found),
        )
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request, StatusCode},
        response::Response,
        Json,
    };
    use lambda_client::LambdaClient;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;

    async fn spawn_backend(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/")
    }

    fn relay_for(lambda_url: &str) -> Router {
        let config = Config {
            lambda_url: lambda_url.to_string(),
            aws_secret: "test-secret".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
        };
        let lambda = LambdaClient::new(&config.lambda_url, &config.aws_secret).unwrap();
        build_router(AppState { lambda, config })
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    const VALID_BODY: &str =
        r#"{"resume_text":"Senior Rust engineer","job_posting_url":"https://jobs.example/1"}"#;

    #[tokio::test]
    async fn test_relays_backend_json_unmodified() {
        let backend = Router::new().route(
            "/",
            post(|| async { Json(json!({ "response": "Looks good" })) }),
        );
        let app = relay_for(&spawn_backend(backend).await);

        let response = app
            .oneshot(post_json("/api/process-resume", VALID_BODY))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "response": "Looks good" }));
    }

    #[tokio::test]
    async fn test_injects_secret_and_forwards_fields() {
        let backend = Router::new().route(
            "/",
            post(|Json(body): Json<Value>| async move { Json(body) }),
        );
        let app = relay_for(&spawn_backend(backend).await);

        let response = app
            .oneshot(post_json("/api/process-resume", VALID_BODY))
            .await
            .unwrap();

        assert_eq!(
            body_json(response).await,
            json!({
                "secret": "test-secret",
                "resume_text": "Senior Rust engineer",
                "job_posting_url": "https://jobs.example/1"
            })
        );
    }

    #[tokio::test]
    async fn test_non_2xx_backend_json_is_still_relayed() {
        let backend = Router::new().route(
            "/",
            post(|| async {
                (
                    StatusCode::BAD_GATEWAY,
                    Json(json!({ "message": "upstream busy" })),
                )
            }),
        );
        let app = relay_for(&spawn_backend(backend).await);

        let response = app
            .oneshot(post_json("/api/process-resume", VALID_BODY))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "message": "upstream busy" }));
    }

    #[tokio::test]
    async fn test_non_json_backend_response_is_500() {
        let backend = Router::new().route("/", post(|| async { "<html>oops</html>" }));
        let app = relay_for(&spawn_backend(backend).await);

        let response = app
            .oneshot(post_json("/api/process-resume", VALID_BODY))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("JSON parse error"));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_500_with_message() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let app = relay_for(&format!("http://{addr}/"));

        let response = app
            .oneshot(post_json("/api/process-resume", VALID_BODY))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().starts_with("HTTP error"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_500() {
        let app = relay_for("http://127.0.0.1:9/");

        let response = app
            .oneshot(post_json("/api/process-resume", "{not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_missing_field_is_500() {
        let app = relay_for("http://127.0.0.1:9/");

        let response = app
            .oneshot(post_json("/api/process-resume", r#"{"resume_text":"x"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("job_posting_url"));
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let app = relay_for("http://127.0.0.1:9/");

        let response = app
            .oneshot(post_json("/api/other", VALID_BODY))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"Not found");
    }

    #[tokio::test]
    async fn test_wrong_method_is_404() {
        for method in [Method::GET, Method::PUT, Method::DELETE] {
            let app = relay_for("http://127.0.0.1:9/");
            let request = Request::builder()
                .method(method)
                .uri("/api/process-resume")
                .body(Body::empty())
                .unwrap();

            let response = app.oneshot(request).await.unwrap();

            assert_eq!(response.status(), StatusCode::NOT_FOUND);
        }
    }
}
