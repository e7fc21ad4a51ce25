//! Delivery envelope for consumed messages

use bytes::Bytes;

/// Broker-assigned delivery tag, unique per channel
pub type DeliveryTag = u64;

/// A single message pulled from the queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// Delivery tag used to ack or reject this message
    pub tag: DeliveryTag,

    /// Raw message body, no envelope
    pub payload: Bytes,
}

impl Delivery {
    /// Create new delivery
    pub fn new(tag: DeliveryTag, payload: impl Into<Bytes>) -> Self {
        Self {
            tag,
            payload: payload.into(),
        }
    }

    /// Payload as text, replacing invalid UTF-8 sequences
    pub fn payload_lossy(&self) -> String {
        String::from_utf8_lossy(&self.payload).into_owned()
    }
}
