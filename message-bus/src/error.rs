//! Error types for message bus

use thiserror::Error;

/// Message bus error
///
/// Every variant describes a broken queue connection or channel. Callers
/// treat these as process-fatal.
#[derive(Debug, Error)]
pub enum Error {
    /// Connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Channel setup error
    #[error("Channel error: {0}")]
    Channel(String),

    /// Consumer registration or delivery error
    #[error("Consume error: {0}")]
    Consume(String),

    /// Acknowledgement (ack or reject) error
    #[error("Ack error for delivery {delivery_tag}: {reason}")]
    Ack {
        /// Delivery tag that could not be settled
        delivery_tag: u64,
        /// Broker or client error text
        reason: String,
    },
}

/// Result type
pub type Result<T> = std::result::Result<T, Error>;
