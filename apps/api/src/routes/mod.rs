pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::state::AppState;
use crate::summary::handlers;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::handle_home))
        .route("/health", get(health::health_handler))
        .route(
            "/earnings_transcript_summary",
            post(handlers::handle_summary),
        )
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::llm_client::{LanguageModel, LlmError};

    /// Canned model: answers every prompt with `reply`, or fails with `failure`.
    struct StubModel {
        reply: String,
        failure: Option<String>,
        calls: AtomicUsize,
    }

    impl StubModel {
        fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.to_string(),
                failure: None,
                calls: AtomicUsize::new(0),
            })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: String::new(),
                failure: Some(message.to_string()),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl LanguageModel for StubModel {
        fn model_name(&self) -> &str {
            "stub"
        }

        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.failure {
                Some(message) => Err(LlmError::Api {
                    status: 503,
                    message: message.clone(),
                }),
                None => Ok(self.reply.clone()),
            }
        }
    }

    fn test_config() -> Config {
        Config {
            gemini_api_key: "test-key".to_string(),
            gemini_model: "gemini-1.5-flash-8b".to_string(),
            gemini_endpoint: "http://localhost:9999/v1beta".to_string(),
            llm_timeout_secs: None,
            port: 5000,
            rust_log: "info".to_string(),
        }
    }

    fn app(model: Arc<StubModel>) -> Router {
        build_router(AppState {
            llm: model,
            config: test_config(),
        })
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/earnings_transcript_summary")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_home_returns_usage_descriptor() {
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let (status, json) = send(app(StubModel::replying("")), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["usage"]["endpoint"], "/earnings_transcript_summary");
        assert_eq!(json["usage"]["method"], "POST");
        assert_eq!(
            json["usage"]["example_input"]["company_name"],
            "Reliance Industries"
        );
    }

    #[tokio::test]
    async fn test_health_reports_model() {
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, json) = send(app(StubModel::replying("")), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["model"], "gemini-1.5-flash-8b");
    }

    #[tokio::test]
    async fn test_summary_success_includes_company_and_categories() {
        let model =
            StubModel::replying("- Financial Performance: Revenue grew 10%\n- Market Dynamics: Stable demand\n");
        let (status, json) = send(
            app(model.clone()),
            post_json(r#"{"company_name": "Acme", "transcript_text": "We grew."}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            json!({
                "company_name": "Acme",
                "financial_performance": "Revenue grew 10%",
                "market_dynamics": "Stable demand",
                "expansion_plans": "No information available for expansion plans.",
                "environmental_risks": "No information available for environmental risks.",
                "regulatory_or_policy_changes": "No information available for regulatory or policy changes."
            })
        );
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_transcript_is_bad_request() {
        let model = StubModel::replying("unused");
        let (status, json) = send(app(model.clone()), post_json(r#"{"company_name": "Acme"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json["error"],
            "Missing 'company_name' or 'transcript_text' in the input"
        );
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_company_is_bad_request() {
        let (status, json) = send(
            app(StubModel::replying("unused")),
            post_json(r#"{"transcript_text": "We grew."}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn test_empty_transcript_is_bad_request() {
        let model = StubModel::replying("unused");
        let (status, json) = send(
            app(model.clone()),
            post_json(r#"{"company_name": "Acme", "transcript_text": ""}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Transcript text cannot be empty");
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_body_is_bad_request() {
        let req = Request::builder()
            .method("POST")
            .uri("/earnings_transcript_summary")
            .body(Body::empty())
            .unwrap();
        let (status, json) = send(app(StubModel::replying("unused")), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let (status, _) = send(
            app(StubModel::replying("unused")),
            post_json(r#"{"company_name": "Acme", "transcript_text": "#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_array_body_is_bad_request() {
        let model = StubModel::replying("- Financial Performance: Up");
        let (status, json) =
            send(app(model.clone()), post_json(r#"["Acme", "We grew."]"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json["error"],
            "Missing 'company_name' or 'transcript_text' in the input"
        );
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_non_string_field_is_bad_request() {
        let model = StubModel::replying("- Financial Performance: Up");
        let (status, _) = send(
            app(model.clone()),
            post_json(r#"{"company_name": "Acme", "transcript_text": 42}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_rejected_reply_is_ok_with_error_only() {
        let (status, json) = send(
            app(StubModel::replying("Error: the transcript could not be processed")),
            post_json(r#"{"company_name": "Acme", "transcript_text": "We grew."}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            json!({"error": "Failed to generate valid summary from the transcript."})
        );
    }

    #[tokio::test]
    async fn test_empty_reply_is_ok_with_error_only() {
        let (status, json) = send(
            app(StubModel::replying("")),
            post_json(r#"{"company_name": "Acme", "transcript_text": "We grew."}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_object().unwrap().len(), 1);
        assert!(json.get("company_name").is_none());
    }

    #[tokio::test]
    async fn test_model_failure_is_server_error_with_message() {
        let (status, json) = send(
            app(StubModel::failing("The model is overloaded.")),
            post_json(r#"{"company_name": "Acme", "transcript_text": "We grew."}"#),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json["error"],
            "API error (status 503): The model is overloaded."
        );
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let req = Request::builder().uri("/nope").body(Body::empty()).unwrap();
        let (status, json) = send(app(StubModel::replying("")), req).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "No route for /nope");
    }
}
