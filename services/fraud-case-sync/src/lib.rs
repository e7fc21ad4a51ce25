//! # Fraud Case Sync
//!
//! Queue-driven worker that mirrors fraud cases from the fraud cases API into
//! the Catena-X destination API:
//! - each queue message carries one source API key
//! - every page for that key is fetched, transformed and upserted in order
//! - destination records older than the oldest upsert timestamp are deleted
//!
//! Unexpected destination status codes are fatal for the whole worker; all
//! other failures only drop the current message.

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod fetcher;
pub mod handler;
pub mod http_client;
pub mod models;
pub mod sync;
pub mod telemetry;
pub mod transformer;

pub use config::Config;
pub use error::{FatalSyncError, FetchError, HttpError, SyncError};
pub use handler::SyncHandler;
pub use sync::FraudCaseSync;

use std::time::Duration;

/// Fraud cases requested per source API page
pub const PAGE_SIZE: u32 = 200;

/// Per-request timeout for both APIs
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Source API classification filter
pub const CLASSIFICATION: &str = "CATENAX";
