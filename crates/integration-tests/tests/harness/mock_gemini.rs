//! Mock Gemini backend for integration tests
//!
//! Answers `generateContent` for the test model with a canned reply

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

use super::config::TEST_MODEL;

/// Canned reply returned for every request
#[derive(Debug, Clone)]
pub enum MockReply {
    /// 200 with this JSON body
    Json(Value),
    /// Error status with a plain-text body
    Status(u16),
}

/// Mock Gemini backend that returns a predictable reply
pub struct MockGemini {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockGeminiState>,
}

struct MockGeminiState {
    request_count: AtomicU32,
    reply: MockReply,
    last_api_key: Mutex<Option<String>>,
    last_request: Mutex<Option<Value>>,
}

impl MockGemini {
    /// Start a mock that returns an edited PNG
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_with(MockReply::Json(image_reply("image/png", "RURJVEVE"))).await
    }

    /// Start a mock answering every request with `reply`
    pub async fn start_with(reply: MockReply) -> anyhow::Result<Self> {
        let state = Arc::new(MockGeminiState {
            request_count: AtomicU32::new(0),
            reply,
            last_api_key: Mutex::new(None),
            last_request: Mutex::new(None),
        });

        let app = Router::new()
            .route(
                &format!("/v1beta/models/{TEST_MODEL}:generateContent"),
                routing::post(handle_generate_content),
            )
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as the Gemini endpoint
    pub fn base_url(&self) -> String {
        format!("http://{}/v1beta", self.addr)
    }

    /// Number of `generateContent` requests received
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }

    /// `x-goog-api-key` header of the last request
    pub fn last_api_key(&self) -> Option<String> {
        self.state.last_api_key.lock().unwrap().clone()
    }

    /// Body of the last request
    pub fn last_request(&self) -> Option<Value> {
        self.state.last_request.lock().unwrap().clone()
    }
}

impl Drop for MockGemini {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

// -- Canned replies --

/// Successful reply carrying one inline image
pub fn image_reply(mime_type: &str, data: &str) -> Value {
    json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{"inlineData": {"mimeType": mime_type, "data": data}}]
            },
            "finishReason": "STOP"
        }]
    })
}

/// Prompt refused before generation
pub fn blocked_reply(reason: &str, message: &str) -> Value {
    json!({
        "promptFeedback": {"blockReason": reason, "blockReasonMessage": message}
    })
}

/// Generation ended with `finish_reason` and no output
pub fn finish_reply(finish_reason: &str) -> Value {
    json!({
        "candidates": [{"finishReason": finish_reason}]
    })
}

/// Text-only answer
pub fn text_reply(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
}

// -- Handlers --

async fn handle_generate_content(
    State(state): State<Arc<MockGeminiState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    *state.last_api_key.lock().unwrap() = headers
        .get("x-goog-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    *state.last_request.lock().unwrap() = Some(body);

    match &state.reply {
        MockReply::Json(value) => Json(value.clone()).into_response(),
        MockReply::Status(code) => (
            StatusCode::from_u16(*code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            "mock upstream failure",
        )
            .into_response(),
    }
}
