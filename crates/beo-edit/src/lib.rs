#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod error;
mod gateway;
mod image;
mod interpret;
mod prompt;
mod protocol;
mod server;
mod types;

use std::sync::Arc;

#[cfg(feature = "http")]
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::{MethodRouter, post},
};

pub use error::{EditError, ProcessingError, Result};
pub use gateway::{EditGateway, GatewayError, GeminiGateway};
pub use image::{EncodedImage, ImageParseError};
pub use interpret::{Rejection, interpret};
pub use prompt::build_prompt;
pub use protocol::{Candidate, Content, InlineData, ModelResponse, Part, PromptFeedback};
pub use server::EditServer;
pub use types::{
    AdjustmentBody, EditBody, EditInstruction, EditMode, EditRequest, EditResponse, ErrorBody, FilterBody, Hotspot,
    RetouchBody,
};

/// Build the edit server from configuration
///
/// # Errors
///
/// Returns an error if the server fails to initialize
pub fn build_server(config: &beo_config::Config) -> anyhow::Result<Arc<EditServer>> {
    Ok(Arc::new(EditServer::from_config(config)?))
}

/// Create the endpoint router for the three edit modes
#[cfg(feature = "http")]
pub fn endpoint_router() -> Router<Arc<EditServer>> {
    Router::new()
        .route(RetouchBody::MODE.path(), edit_route::<RetouchBody>())
        .route(FilterBody::MODE.path(), edit_route::<FilterBody>())
        .route(AdjustmentBody::MODE.path(), edit_route::<AdjustmentBody>())
}

/// POST-only route; every other method answers 405
#[cfg(feature = "http")]
fn edit_route<B: EditBody>() -> MethodRouter<Arc<EditServer>> {
    post(edit::<B>).fallback(|| async { EditError::MethodNotAllowed })
}

/// Handle an edit request for the mode of `B`
#[cfg(feature = "http")]
async fn edit<B: EditBody>(
    State(server): State<Arc<EditServer>>,
    body: std::result::Result<Json<B>, JsonRejection>,
) -> Result<Json<EditResponse>> {
    let Json(body) = body.map_err(|rejection| {
        tracing::debug!(mode = %B::MODE, error = %rejection, "invalid request body");
        if rejection.status() == http::StatusCode::PAYLOAD_TOO_LARGE {
            EditError::BodyTooLarge
        } else {
            EditError::InvalidBody(rejection.body_text())
        }
    })?;

    let request = body.into_request().inspect_err(|_| {
        tracing::debug!(mode = %B::MODE, "request is missing required fields");
    })?;

    tracing::debug!(mode = %B::MODE, "edit handler called");

    let image = server.edit(&request).await?;

    tracing::debug!(mode = %B::MODE, "edit complete");

    Ok(Json(EditResponse {
        image_url: image.to_data_url(),
    }))
}

#[cfg(all(test, feature = "http"))]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;
    use axum::body::Body;
    use http::{Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;

    /// Gateway returning a canned reply and counting calls
    struct MockGateway {
        reply: std::result::Result<ModelResponse, u16>,
        calls: AtomicU32,
    }

    impl MockGateway {
        fn replying(response: ModelResponse) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(response),
                calls: AtomicU32::new(0),
            })
        }

        fn failing(status: u16) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(status),
                calls: AtomicU32::new(0),
            })
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl EditGateway for MockGateway {
        async fn generate(
            &self,
            _image: &EncodedImage,
            _prompt: &str,
        ) -> std::result::Result<ModelResponse, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Ok(response) => Ok(response.clone()),
                Err(status) => Err(GatewayError::Status {
                    status: *status,
                    body: "quota exceeded".to_string(),
                }),
            }
        }

        fn name(&self) -> &str {
            "mock"
        }
    }

    fn reply(parts: Vec<Part>, finish_reason: &str) -> ModelResponse {
        ModelResponse {
            candidates: vec![Candidate {
                content: Some(Content { role: None, parts }),
                finish_reason: Some(finish_reason.to_string()),
            }],
            prompt_feedback: None,
        }
    }

    fn image_reply() -> ModelResponse {
        reply(vec![Part::inline_data("image/png", "RURJVEVE")], "STOP")
    }

    async fn call(gateway: Arc<MockGateway>, method: &str, path: &str, body: &str) -> (StatusCode, Value) {
        let app = endpoint_router().with_state(Arc::new(EditServer::new(gateway)));

        let request = Request::builder()
            .method(method)
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    fn filter_body() -> String {
        json!({"imageData": "data:image/jpeg;base64,/9j/4AAQ", "filterPrompt": "sepia"}).to_string()
    }

    #[tokio::test]
    async fn retouch_success_returns_data_url() {
        let gateway = MockGateway::replying(image_reply());
        let body = json!({
            "imageData": "data:image/jpeg;base64,/9j/4AAQ",
            "userPrompt": "remove the cup",
            "hotspot": {"x": 120, "y": 45}
        })
        .to_string();

        let (status, json) = call(gateway.clone(), "POST", "/api/retouch", &body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({"imageUrl": "data:image/png;base64,RURJVEVE"}));
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test]
    async fn missing_fields_never_reach_the_gateway() {
        let gateway = MockGateway::replying(image_reply());
        let body = json!({"imageData": "data:image/png;base64,AAAA", "userPrompt": "brighten"}).to_string();

        let (status, json) = call(gateway.clone(), "POST", "/api/retouch", &body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Missing required fields");
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn empty_prompt_is_missing() {
        let gateway = MockGateway::replying(image_reply());
        let body = json!({"imageData": "data:image/png;base64,AAAA", "adjustmentPrompt": ""}).to_string();

        let (status, json) = call(gateway.clone(), "POST", "/api/adjust", &body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Missing required fields");
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn invalid_json_is_bad_request() {
        let gateway = MockGateway::replying(image_reply());

        let (status, json) = call(gateway.clone(), "POST", "/api/filter", "{not json").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["type"], "invalid_request_error");
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn other_methods_are_rejected() {
        let gateway = MockGateway::replying(image_reply());

        for path in ["/api/retouch", "/api/filter", "/api/adjust"] {
            let (status, json) = call(gateway.clone(), "GET", path, "").await;
            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
            assert_eq!(json["error"], "Method not allowed");
        }

        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn block_wins_over_image() {
        let mut response = image_reply();
        response.prompt_feedback = Some(PromptFeedback {
            block_reason: Some("PROHIBITED_CONTENT".to_string()),
            block_reason_message: Some("Policy violation".to_string()),
        });
        let gateway = MockGateway::replying(response);

        let (status, json) = call(gateway, "POST", "/api/filter", &filter_body()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json,
            json!({
                "error": "Request was blocked. Reason: PROHIBITED_CONTENT. Policy violation",
                "type": "blocked_error"
            })
        );
    }

    #[tokio::test]
    async fn safety_stop_names_the_reason() {
        let gateway = MockGateway::replying(reply(Vec::new(), "SAFETY"));

        let (status, json) = call(gateway, "POST", "/api/filter", &filter_body()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["type"], "stopped_error");
        assert!(json["error"].as_str().unwrap().contains("SAFETY"));
    }

    #[tokio::test]
    async fn text_reply_is_embedded_in_error() {
        let gateway = MockGateway::replying(reply(vec![Part::text("I cannot do that")], "STOP"));

        let (status, json) = call(gateway, "POST", "/api/filter", &filter_body()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("\"I cannot do that\""));
    }

    #[tokio::test]
    async fn malformed_image_is_a_processing_failure() {
        let gateway = MockGateway::replying(image_reply());
        let body = json!({"imageData": "not-an-image", "adjustmentPrompt": "warmer"}).to_string();

        let (status, json) = call(gateway.clone(), "POST", "/api/adjust", &body).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json,
            json!({"error": "Failed to process image adjustment", "type": "internal_error"})
        );
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn gateway_failure_hides_the_detail() {
        let gateway = MockGateway::failing(429);

        let (status, json) = call(gateway.clone(), "POST", "/api/filter", &filter_body()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "Failed to process image filter");
        assert!(!json.to_string().contains("quota"));
        assert_eq!(gateway.calls(), 1);
    }
}
