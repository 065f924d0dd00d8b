use std::sync::Arc;

use crate::{
    error::EditError,
    gateway::{EditGateway, GeminiGateway},
    image::EncodedImage,
    interpret::interpret,
    prompt::build_prompt,
    types::EditRequest,
};

/// Edit server that runs requests through the image model gateway
pub struct EditServer {
    gateway: Arc<dyn EditGateway>,
}

impl EditServer {
    pub fn new(gateway: Arc<dyn EditGateway>) -> Self {
        Self { gateway }
    }

    /// Build the server with the Gemini gateway
    pub fn from_config(config: &beo_config::Config) -> anyhow::Result<Self> {
        let gateway = GeminiGateway::from_config(&config.gemini)
            .map_err(|e| anyhow::anyhow!("Failed to initialize Gemini gateway: {e}"))?;

        tracing::debug!(model = %config.gemini.model, "edit server initialized");

        Ok(Self::new(Arc::new(gateway)))
    }

    /// Run one edit
    ///
    /// Parses the image string, builds the prompt, makes exactly one gateway
    /// call and interprets the reply.
    pub async fn edit(&self, request: &EditRequest) -> crate::error::Result<EncodedImage> {
        let mode = request.mode();

        let image = EncodedImage::parse(&request.image_data).map_err(|e| {
            tracing::error!(%mode, error = %e, "rejecting malformed image string");
            EditError::processing(mode, e)
        })?;

        let prompt = build_prompt(&request.instruction);

        tracing::debug!(
            %mode,
            gateway = self.gateway.name(),
            mime_type = %image.mime_type,
            "sending image and prompt to the model"
        );

        let response = self.gateway.generate(&image, &prompt).await.map_err(|e| {
            tracing::error!(%mode, gateway = self.gateway.name(), error = %e, "image model call failed");
            EditError::processing(mode, e)
        })?;

        match interpret(&response) {
            Ok(edited) => {
                tracing::debug!(%mode, mime_type = %edited.mime_type, "received edited image");
                Ok(edited)
            }
            Err(rejection) => {
                tracing::warn!(%mode, kind = rejection.error_type(), "{rejection}");
                Err(rejection.into())
            }
        }
    }
}
