use std::path::Path;

use beo_edit::{AdjustmentBody, EditBody, EditResponse, EncodedImage, ErrorBody, FilterBody, Hotspot, RetouchBody};
use url::Url;

use crate::error::{ClientError, Result};
use crate::history::{HistoryLog, NewHistoryEntry};
use crate::media::mime_type_for;

/// Message used when an error response carries no usable `error` text
const FALLBACK_ERROR_MESSAGE: &str = "An error occurred while processing the request.";

/// Typed client for the edit endpoints
///
/// Every attempt is appended to the history log before its result is
/// returned, including failures to read the source file.
#[derive(Debug, Clone)]
pub struct EditClient {
    base_url: Url,
    http: reqwest::Client,
    history: HistoryLog,
}

impl EditClient {
    /// Create a new client pointing at the given base URL
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid
    pub fn new(base_url: &str, history: HistoryLog) -> Result<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| ClientError::Config(format!("invalid base URL: {e}")))?;

        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
            history,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// History log receiving every attempt
    #[must_use]
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Localized edit around `hotspot`, returning the edited image as a data URL
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the request fails, or the
    /// endpoint rejects the edit
    pub async fn retouch(&self, image: &Path, prompt: &str, hotspot: Hotspot) -> Result<String> {
        self.edit(image, prompt, |image_data| RetouchBody {
            image_data: Some(image_data),
            user_prompt: Some(prompt.to_owned()),
            hotspot: Some(hotspot),
        })
        .await
    }

    /// Whole-image stylistic filter
    ///
    /// # Errors
    ///
    /// Same as [`EditClient::retouch`]
    pub async fn filter(&self, image: &Path, prompt: &str) -> Result<String> {
        self.edit(image, prompt, |image_data| FilterBody {
            image_data: Some(image_data),
            filter_prompt: Some(prompt.to_owned()),
        })
        .await
    }

    /// Global quality adjustment
    ///
    /// # Errors
    ///
    /// Same as [`EditClient::retouch`]
    pub async fn adjust(&self, image: &Path, prompt: &str) -> Result<String> {
        self.edit(image, prompt, |image_data| AdjustmentBody {
            image_data: Some(image_data),
            adjustment_prompt: Some(prompt.to_owned()),
        })
        .await
    }

    async fn edit<B: EditBody>(&self, image: &Path, prompt: &str, body: impl FnOnce(String) -> B) -> Result<String> {
        tracing::debug!(mode = %B::MODE, image = %image.display(), "starting edit");

        let outcome = self.submit(image, body).await;

        let entry = match &outcome {
            Ok(image_url) => NewHistoryEntry::success(B::MODE, prompt, image_url.clone()),
            Err(e) => {
                tracing::debug!(mode = %B::MODE, error = %e, "edit failed");
                NewHistoryEntry::failure(B::MODE, prompt, e.to_string())
            }
        };
        self.history.append(entry).await;

        outcome
    }

    async fn submit<B: EditBody>(&self, image: &Path, body: impl FnOnce(String) -> B) -> Result<String> {
        let image_data = encode_file(image).await?;
        let url = make_url(&self.base_url, B::MODE.path());

        let response = self.http.post(url).json(&body(image_data)).send().await?;

        let response: EditResponse = handle_error(response)
            .await?
            .json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))?;

        tracing::debug!(mode = %B::MODE, "received edited image");

        Ok(response.image_url)
    }
}

/// Read a file and encode it as a data URL
async fn encode_file(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path).await.map_err(|source| ClientError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(EncodedImage::from_bytes(mime_type_for(path), &bytes).to_data_url())
}

/// Build a URL from the base and a path
fn make_url(base_url: &Url, path: &str) -> Url {
    let mut url = base_url.clone();
    url.set_path(path);
    url
}

/// Check an HTTP response for errors
async fn handle_error(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let (error_type, message) = parse_error_body(&body);

    Err(ClientError::Api {
        status: status.as_u16(),
        error_type,
        message,
    })
}

/// Parse an error response body into (type, message)
fn parse_error_body(body: &str) -> (Option<String>, String) {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { error, error_type }) if !error.is_empty() => (error_type, error),
        Ok(ErrorBody { error_type, .. }) => (error_type, FALLBACK_ERROR_MESSAGE.to_owned()),
        Err(_) => (None, FALLBACK_ERROR_MESSAGE.to_owned()),
    }
}
