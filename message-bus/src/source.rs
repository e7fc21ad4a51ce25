//! Delivery sources the consumer pulls from

use crate::{message::Delivery, message::DeliveryTag, Result};
use async_trait::async_trait;
use std::collections::VecDeque;

/// A queue the consumer can pull deliveries from and settle them on
#[async_trait]
pub trait DeliverySource: Send {
    /// Wait for the next delivery. `None` means the channel is closed.
    async fn next_delivery(&mut self) -> Option<Result<Delivery>>;

    /// Acknowledge (remove) a processed delivery
    async fn ack(&mut self, delivery: &Delivery) -> Result<()>;

    /// Reject a delivery without requeueing it
    async fn reject(&mut self, delivery: &Delivery) -> Result<()>;
}

/// In-memory delivery source
///
/// Hands out queued payloads in order and records how each one was settled.
/// The channel reports closed once the queue is drained.
#[derive(Debug, Default)]
pub struct MemorySource {
    pending: VecDeque<Delivery>,
    next_tag: DeliveryTag,
    acked: Vec<DeliveryTag>,
    rejected: Vec<DeliveryTag>,
}

impl MemorySource {
    /// Create empty source
    pub fn new() -> Self {
        Self {
            next_tag: 1,
            ..Default::default()
        }
    }

    /// Create source pre-loaded with payloads
    pub fn with_payloads<I, P>(payloads: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<bytes::Bytes>,
    {
        let mut source = Self::new();
        for payload in payloads {
            source.push(payload);
        }
        source
    }

    /// Enqueue a payload, returning its delivery tag
    pub fn push(&mut self, payload: impl Into<bytes::Bytes>) -> DeliveryTag {
        let tag = self.next_tag;
        self.next_tag += 1;
        self.pending.push_back(Delivery::new(tag, payload));
        tag
    }

    /// Tags acknowledged so far
    pub fn acked(&self) -> &[DeliveryTag] {
        &self.acked
    }

    /// Tags rejected so far
    pub fn rejected(&self) -> &[DeliveryTag] {
        &self.rejected
    }

    /// Number of deliveries not yet pulled
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

#[async_trait]
impl DeliverySource for MemorySource {
    async fn next_delivery(&mut self) -> Option<Result<Delivery>> {
        self.pending.pop_front().map(Ok)
    }

    async fn ack(&mut self, delivery: &Delivery) -> Result<()> {
        self.acked.push(delivery.tag);
        Ok(())
    }

    async fn reject(&mut self, delivery: &Delivery) -> Result<()> {
        self.rejected.push(delivery.tag);
        Ok(())
    }
}
