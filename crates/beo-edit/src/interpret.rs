use thiserror::Error;

use crate::image::EncodedImage;
use crate::protocol::{FINISH_REASON_STOP, ModelResponse};

/// Model replies that are answered to the caller as a bad request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The prompt was refused before generation
    #[error("Request was blocked. Reason: {reason}.{}", message.as_deref().map(|m| format!(" {m}")).unwrap_or_default())]
    Blocked { reason: String, message: Option<String> },

    /// Generation ended abnormally without an image
    #[error(
        "Image generation stopped unexpectedly. Reason: {finish_reason}. This often relates to safety settings."
    )]
    Stopped { finish_reason: String },

    /// The model answered without an image
    #[error("The AI model did not return an image. {}", no_image_detail(text.as_deref()))]
    NoImage { text: Option<String> },
}

impl Rejection {
    /// Machine-readable category
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Blocked { .. } => "blocked_error",
            Self::Stopped { .. } => "stopped_error",
            Self::NoImage { .. } => "no_image_error",
        }
    }
}

fn no_image_detail(text: Option<&str>) -> String {
    match text {
        Some(text) => format!("The model responded with text: \"{text}\""),
        None => "This can happen due to safety filters or if the request is too complex. \
                 Please try rephrasing your prompt to be more direct."
            .to_string(),
    }
}

/// Turn a model reply into an image or a rejection
///
/// Checks run in a fixed order: a prompt block wins over everything, an
/// image wins over the finish reason (a normal `STOP` accompanies every
/// successful image), and text is only consulted when nothing else applies.
///
/// # Errors
///
/// Returns the matching `Rejection` when the reply carries no usable image
pub fn interpret(response: &ModelResponse) -> Result<EncodedImage, Rejection> {
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|feedback| feedback.block_reason.as_ref())
        .filter(|reason| !reason.is_empty())
    {
        let message = response
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason_message.clone())
            .filter(|m| !m.is_empty());

        return Err(Rejection::Blocked {
            reason: reason.clone(),
            message,
        });
    }

    if let Some(inline) = response
        .first_candidate_parts()
        .iter()
        .find_map(|part| part.inline_data.as_ref())
    {
        return Ok(EncodedImage::new(inline.mime_type.clone(), inline.data.clone()));
    }

    if let Some(finish_reason) = response.finish_reason()
        && !finish_reason.is_empty()
        && finish_reason != FINISH_REASON_STOP
    {
        return Err(Rejection::Stopped {
            finish_reason: finish_reason.to_string(),
        });
    }

    Err(Rejection::NoImage { text: response.text() })
}
