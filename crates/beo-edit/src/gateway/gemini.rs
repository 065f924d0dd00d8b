use async_trait::async_trait;
use beo_config::GeminiConfig;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use super::{EditGateway, GatewayError};
use crate::image::EncodedImage;
use crate::protocol::{Content, GenerateContentRequest, ModelResponse, Part};

/// Default Generative Language API base URL
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini `generateContent` client
pub struct GeminiGateway {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<SecretString>,
}

impl GeminiGateway {
    /// Create a gateway from configuration
    ///
    /// A missing API key is accepted here and reported on every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is invalid or the HTTP client cannot be built
    pub fn from_config(config: &GeminiConfig) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout_duration()? {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build Gemini HTTP client: {e}"))?;

        Ok(Self {
            client,
            base_url: config
                .base_url
                .as_ref()
                .map_or_else(|| DEFAULT_BASE_URL.to_string(), Url::to_string),
            model: config.model.clone(),
            api_key: config.resolve_api_key(),
        })
    }

    /// Build the `generateContent` endpoint URL
    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl EditGateway for GeminiGateway {
    async fn generate(&self, image: &EncodedImage, prompt: &str) -> Result<ModelResponse, GatewayError> {
        let api_key = self.api_key.as_ref().ok_or(GatewayError::MissingApiKey)?;

        let wire_request = GenerateContentRequest {
            contents: vec![Content {
                role: None,
                parts: vec![
                    Part::inline_data(image.mime_type.clone(), image.data.clone()),
                    Part::text(prompt),
                ],
            }],
        };

        tracing::debug!(
            model = %self.model,
            mime_type = %image.mime_type,
            "sending generateContent request"
        );

        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", api_key.expose_secret())
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(model = %self.model, error = %e, "Gemini request failed");
                GatewayError::Connection(e.to_string())
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            tracing::error!(
                model = %self.model,
                status = %status,
                "Gemini API error"
            );

            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let model_response: ModelResponse = response.json().await.map_err(|e| {
            tracing::error!(model = %self.model, error = %e, "failed to parse Gemini response");
            GatewayError::Decode(e.to_string())
        })?;

        tracing::debug!(
            model = %self.model,
            candidates = model_response.candidates.len(),
            "generateContent request complete"
        );

        Ok(model_response)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
