#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Typed Rust HTTP client for the Beo photo edit endpoints
//!
//! Every edit attempt, successful or not, is recorded in a [`HistoryLog`].

mod client;
pub mod error;
pub mod history;
mod media;

pub use client::EditClient;
pub use error::{ClientError, Result};
pub use history::{
    EntryStatus, FileStore, HISTORY_KEY, HistoryEntry, HistoryError, HistoryLog, KeyValueStore, MAX_ENTRIES,
    MemoryStore, NewHistoryEntry,
};
pub use media::mime_type_for;
