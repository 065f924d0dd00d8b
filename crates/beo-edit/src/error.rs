#[cfg(feature = "http")]
use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use thiserror::Error;

use crate::gateway::GatewayError;
use crate::image::ImageParseError;
use crate::interpret::Rejection;
use crate::types::EditMode;
#[cfg(feature = "http")]
use crate::types::ErrorBody;

pub type Result<T> = std::result::Result<T, EditError>;

/// Edit endpoint errors with their HTTP status codes
#[derive(Debug, Error)]
pub enum EditError {
    /// Endpoint called with a method other than POST
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// A required body field is absent or empty
    #[error("Missing required fields")]
    MissingFields,

    /// Body exceeds the configured size limit
    #[error("Request body too large")]
    BodyTooLarge,

    /// Body is not valid JSON for the endpoint
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// The model reply was refused by the interpreter
    #[error(transparent)]
    Rejected(#[from] Rejection),

    /// Operational failure; the detail is logged, never returned
    #[error("Failed to process image {mode}: {source}")]
    Processing { mode: EditMode, source: ProcessingError },
}

/// Operational failures behind a 500
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("malformed image: {0}")]
    Image(#[from] ImageParseError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl EditError {
    pub(crate) fn processing(mode: EditMode, source: impl Into<ProcessingError>) -> Self {
        Self::Processing {
            mode,
            source: source.into(),
        }
    }

    /// Get the appropriate HTTP status code for this error
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::MissingFields | Self::InvalidBody(_) | Self::Rejected(_) => StatusCode::BAD_REQUEST,
            Self::Processing { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error type string for the response
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::MethodNotAllowed => "method_not_allowed",
            Self::MissingFields | Self::BodyTooLarge | Self::InvalidBody(_) => "invalid_request_error",
            Self::Rejected(rejection) => rejection.error_type(),
            Self::Processing { .. } => "internal_error",
        }
    }

    /// Message that is safe to expose to API consumers
    pub fn client_message(&self) -> String {
        match self {
            Self::Processing { mode, .. } => format!("Failed to process image {mode}"),
            _ => self.to_string(),
        }
    }
}

#[cfg(feature = "http")]
impl IntoResponse for EditError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = ErrorBody {
            error: self.client_message(),
            error_type: Some(self.error_type().to_string()),
        };

        (status, Json(body)).into_response()
    }
}
