use std::fmt;

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::EditError;

/// The three kinds of edit the service performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditMode {
    /// Localized edit around a hotspot
    Retouch,
    /// Whole-image stylistic filter
    Filter,
    /// Global quality adjustment
    Adjustment,
}

impl EditMode {
    /// Wire name of the mode
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Retouch => "retouch",
            Self::Filter => "filter",
            Self::Adjustment => "adjustment",
        }
    }

    /// Endpoint path serving this mode
    pub const fn path(self) -> &'static str {
        match self {
            Self::Retouch => "/api/retouch",
            Self::Filter => "/api/filter",
            Self::Adjustment => "/api/adjust",
        }
    }
}

impl fmt::Display for EditMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pixel coordinates of the focal point of a retouch
///
/// Bounds are not checked against the image; the caller is trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotspot {
    pub x: u32,
    pub y: u32,
}

/// Mode-specific part of an edit request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditInstruction {
    Retouch { prompt: String, hotspot: Hotspot },
    Filter { prompt: String },
    Adjustment { prompt: String },
}

impl EditInstruction {
    pub const fn mode(&self) -> EditMode {
        match self {
            Self::Retouch { .. } => EditMode::Retouch,
            Self::Filter { .. } => EditMode::Filter,
            Self::Adjustment { .. } => EditMode::Adjustment,
        }
    }

    /// The user's instruction text
    pub fn prompt(&self) -> &str {
        match self {
            Self::Retouch { prompt, .. } | Self::Filter { prompt } | Self::Adjustment { prompt } => prompt,
        }
    }
}

/// A validated edit request
///
/// `image_data` is kept as received; it is parsed when the edit runs so that
/// a malformed image string surfaces as a processing failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    pub image_data: String,
    pub instruction: EditInstruction,
}

impl EditRequest {
    pub const fn mode(&self) -> EditMode {
        self.instruction.mode()
    }
}

/// A JSON request body accepted by one of the edit endpoints
pub trait EditBody: DeserializeOwned + Serialize + Send + 'static {
    /// Mode served by the endpoint accepting this body
    const MODE: EditMode;

    /// Check required fields and build the request
    ///
    /// # Errors
    ///
    /// Returns `EditError::MissingFields` if any required field is absent or empty
    fn into_request(self) -> Result<EditRequest, EditError>;
}

/// Body of `POST /api/retouch`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetouchBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotspot: Option<Hotspot>,
}

impl EditBody for RetouchBody {
    const MODE: EditMode = EditMode::Retouch;

    fn into_request(self) -> Result<EditRequest, EditError> {
        let (Some(image_data), Some(prompt), Some(hotspot)) =
            (present(self.image_data), present(self.user_prompt), self.hotspot)
        else {
            return Err(EditError::MissingFields);
        };

        Ok(EditRequest {
            image_data,
            instruction: EditInstruction::Retouch { prompt, hotspot },
        })
    }
}

/// Body of `POST /api/filter`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_prompt: Option<String>,
}

impl EditBody for FilterBody {
    const MODE: EditMode = EditMode::Filter;

    fn into_request(self) -> Result<EditRequest, EditError> {
        let (Some(image_data), Some(prompt)) = (present(self.image_data), present(self.filter_prompt)) else {
            return Err(EditError::MissingFields);
        };

        Ok(EditRequest {
            image_data,
            instruction: EditInstruction::Filter { prompt },
        })
    }
}

/// Body of `POST /api/adjust`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjustment_prompt: Option<String>,
}

impl EditBody for AdjustmentBody {
    const MODE: EditMode = EditMode::Adjustment;

    fn into_request(self) -> Result<EditRequest, EditError> {
        let (Some(image_data), Some(prompt)) = (present(self.image_data), present(self.adjustment_prompt)) else {
            return Err(EditError::MissingFields);
        };

        Ok(EditRequest {
            image_data,
            instruction: EditInstruction::Adjustment { prompt },
        })
    }
}

/// Successful edit response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditResponse {
    /// Edited image as a `data:` URL
    pub image_url: String,
}

/// Error response body shared by all endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message
    pub error: String,
    /// Machine-readable category
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
