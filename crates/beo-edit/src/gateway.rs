pub(crate) mod gemini;

use async_trait::async_trait;
use thiserror::Error;

use crate::image::EncodedImage;
use crate::protocol::ModelResponse;

pub use gemini::GeminiGateway;

/// Transport-level failures talking to the image model
///
/// These are never interpreted; the endpoint reports them as a generic
/// processing failure.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No API key was configured
    #[error("no API key configured for the image model")]
    MissingApiKey,

    /// Network or connection error
    #[error("connection error: {0}")]
    Connection(String),

    /// Upstream answered with a non-success status
    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Upstream body could not be decoded
    #[error("failed to decode upstream response: {0}")]
    Decode(String),
}

/// Sends one image and one prompt to a generative image model
///
/// Exactly one upstream request is made per call; there is no retry.
#[async_trait]
pub trait EditGateway: Send + Sync {
    /// Submit the image and prompt and return the raw model reply
    async fn generate(&self, image: &EncodedImage, prompt: &str) -> Result<ModelResponse, GatewayError>;

    /// Name used in logs
    fn name(&self) -> &str;
}
