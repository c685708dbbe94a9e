//! # Store Error Types
//!
//! Error types for persistence operations.
//!
//! ## Error Flow
//! ```text
//! std::io::Error / serde_json::Error
//!       │
//!       ▼
//! StoreError (this module) ← adds the collection key as context
//!       │
//!       ▼
//! AppError (tillbook-app) ← surfaced to the operator as a notification
//! ```
//!
//! Reads never produce an error: an absent or corrupt document reads as an
//! empty collection (logged as a warning). Only writes can fail, and a
//! failed write means "the in-memory change was not saved".

use std::path::PathBuf;

use thiserror::Error;

/// Persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The data directory could not be created or accessed.
    #[error("cannot open data directory {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing a collection document failed; the previously persisted
    /// document is untouched.
    #[error("failed to write collection '{collection}': {source}")]
    WriteFailed {
        collection: String,
        #[source]
        source: std::io::Error,
    },

    /// Serializing a collection to JSON failed.
    #[error("failed to serialize collection '{collection}': {source}")]
    SerializeFailed {
        collection: String,
        #[source]
        source: serde_json::Error,
    },

    /// No platform data directory could be resolved.
    #[error("no data directory available for this platform")]
    NoDataDir,
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
