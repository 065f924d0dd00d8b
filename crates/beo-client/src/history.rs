//! Bounded, most-recent-first log of edit attempts

mod store;

use std::sync::Arc;

use beo_edit::EditMode;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use store::{FileStore, KeyValueStore, MemoryStore};

/// Storage key holding the serialized log
pub const HISTORY_KEY: &str = "beo-image-pro-history";

/// Maximum number of retained entries
pub const MAX_ENTRIES: usize = 50;

/// Errors from the history store
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Outcome of an edit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Success,
    Error,
}

/// One recorded edit attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub timestamp: Timestamp,
    #[serde(rename = "type")]
    pub mode: EditMode,
    /// The user's instruction, as submitted
    pub prompt: String,
    pub status: EntryStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Entry contents before an id and timestamp are assigned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHistoryEntry {
    pub mode: EditMode,
    pub prompt: String,
    pub status: EntryStatus,
    pub error: Option<String>,
    pub image_url: Option<String>,
}

impl NewHistoryEntry {
    pub fn success(mode: EditMode, prompt: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            mode,
            prompt: prompt.into(),
            status: EntryStatus::Success,
            error: None,
            image_url: Some(image_url.into()),
        }
    }

    pub fn failure(mode: EditMode, prompt: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            mode,
            prompt: prompt.into(),
            status: EntryStatus::Error,
            error: Some(error.into()),
            image_url: None,
        }
    }
}

/// Edit history over an injected store
///
/// Logging is best-effort: storage and serialization failures are reported
/// through `tracing` and never reach the caller. Appends read then write the
/// whole log, so concurrent appends may drop an entry.
#[derive(Clone)]
pub struct HistoryLog {
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for HistoryLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryLog").finish_non_exhaustive()
    }
}

impl HistoryLog {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Log kept in memory only
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Record an attempt as the newest entry
    ///
    /// Returns the stored entry with its assigned id and timestamp.
    pub async fn append(&self, entry: NewHistoryEntry) -> HistoryEntry {
        let entry = HistoryEntry {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Timestamp::now(),
            mode: entry.mode,
            prompt: entry.prompt,
            status: entry.status,
            error: entry.error,
            image_url: entry.image_url,
        };

        let mut entries = self.read_all().await;
        entries.insert(0, entry.clone());
        entries.truncate(MAX_ENTRIES);

        if let Err(e) = self.write(&entries).await {
            tracing::error!(error = %e, "failed to save history");
        }

        entry
    }

    /// All entries, most recent first
    ///
    /// Missing or unreadable history yields an empty list.
    pub async fn read_all(&self) -> Vec<HistoryEntry> {
        let raw = match self.store.get(HISTORY_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::error!(error = %e, "failed to load history");
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::error!(error = %e, "failed to parse history");
            Vec::new()
        })
    }

    /// Remove every entry
    pub async fn clear(&self) {
        if let Err(e) = self.store.remove(HISTORY_KEY).await {
            tracing::error!(error = %e, "failed to clear history");
        }
    }

    async fn write(&self, entries: &[HistoryEntry]) -> Result<(), HistoryError> {
        let json = serde_json::to_string(entries)?;
        self.store.set(HISTORY_KEY, json).await
    }
}
