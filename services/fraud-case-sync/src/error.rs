//! Error types for fraud case sync

use reqwest::StatusCode;
use thiserror::Error;

/// HTTP adapter errors, kept separate from application-level status handling
#[derive(Error, Debug)]
pub enum HttpError {
    /// Connection, timeout or request-building failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Body is not valid JSON for the expected shape
    #[error("Decode error: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        /// Raw body, for logging
        body: String,
    },
}

/// A page request to the source API failed
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to get fraud cases page {page}: {source}")]
    Request {
        page: u32,
        #[source]
        source: HttpError,
    },

    #[error("Fraud cases API returned {status} for page {page}")]
    Status { page: u32, status: StatusCode },
}

/// Destination API answered with a status that indicates API drift.
/// Stops the whole worker, not just the current message.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FatalSyncError {
    #[error("Upsert request failed with status code {}", .0.as_u16())]
    UnexpectedUpsertStatus(StatusCode),

    #[error("Delete request failed with status code {}", .0.as_u16())]
    UnexpectedDeleteStatus(StatusCode),
}

/// Anything that can go wrong while syncing one credential
#[derive(Error, Debug)]
pub enum SyncError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Failed to upsert fraud cases: {0}")]
    Upsert(#[source] HttpError),

    #[error("Failed to delete fraud cases: {0}")]
    Delete(#[source] HttpError),

    #[error("Failed to marshal request body: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Fatal(#[from] FatalSyncError),
}

impl SyncError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, SyncError::Fatal(_))
    }
}

/// Result type for sync operations
pub type Result<T> = std::result::Result<T, SyncError>;
