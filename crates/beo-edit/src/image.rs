//! Self-describing encoded image strings
//!
//! Two interchangeable forms are accepted: the `data:<mime>;base64,<payload>`
//! URL produced by browsers and the bare `<mime>;<payload>` pair.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

/// Why an image string could not be parsed
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageParseError {
    #[error("image string has no MIME type separator")]
    MissingSeparator,

    #[error("invalid MIME type '{0}'")]
    InvalidMimeType(String),

    #[error("data URL is not base64 encoded")]
    NotBase64,

    #[error("image payload is empty")]
    EmptyPayload,
}

/// An image as a MIME type plus base64 payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub mime_type: String,
    /// Base64 (standard alphabet) encoded bytes
    pub data: String,
}

impl EncodedImage {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Encode raw bytes
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self::new(mime_type, STANDARD.encode(bytes))
    }

    /// Parse either accepted string form
    ///
    /// The payload is not decoded; only its presence is checked.
    ///
    /// # Errors
    ///
    /// Returns an error if the MIME type or payload cannot be located
    pub fn parse(input: &str) -> Result<Self, ImageParseError> {
        let input = input.trim();

        let (mime_type, data) = if let Some(rest) = input.strip_prefix("data:") {
            let (header, payload) = rest.split_once(',').ok_or(ImageParseError::MissingSeparator)?;
            let mut params = header.split(';');
            let mime_type = params.next().unwrap_or_default();
            if !params.any(|p| p.eq_ignore_ascii_case("base64")) {
                return Err(ImageParseError::NotBase64);
            }
            (mime_type, payload)
        } else {
            input.split_once(';').ok_or(ImageParseError::MissingSeparator)?
        };

        if !is_mime_type(mime_type) {
            return Err(ImageParseError::InvalidMimeType(mime_type.to_string()));
        }

        if data.is_empty() {
            return Err(ImageParseError::EmptyPayload);
        }

        Ok(Self::new(mime_type, data))
    }

    /// Render as `data:<mime>;base64,<payload>`
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// Render as the bare `<mime>;<payload>` pair
    pub fn to_pair(&self) -> String {
        format!("{};{}", self.mime_type, self.data)
    }

    /// Decode the payload into raw bytes
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not valid base64
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(self.data.as_bytes())
    }
}

impl fmt::Display for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime_type, self.data)
    }
}

fn is_mime_type(value: &str) -> bool {
    value
        .split_once('/')
        .is_some_and(|(kind, subtype)| !kind.is_empty() && !subtype.is_empty() && !value.contains(char::is_whitespace))
}
