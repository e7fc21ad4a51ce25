//! Sequential message consumer with ack/reject/fatal outcomes

use crate::{
    message::{Delivery, DeliveryTag},
    metrics::{MESSAGES_TOTAL, MESSAGE_PROCESS_DURATION},
    source::DeliverySource,
    Result,
};
use async_trait::async_trait;
use std::time::Instant;
use tracing::{error, info, warn};

/// Boxed error carried by handler failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Handler failure, split by severity
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// Message-scoped failure: reject the message and keep consuming
    #[error("{0}")]
    Reject(BoxError),

    /// Invariant violation: stop consuming, leave the message unsettled
    #[error("{0}")]
    Fatal(BoxError),
}

impl HandlerError {
    /// Whether this failure must stop the consumer
    pub fn is_fatal(&self) -> bool {
        matches!(self, HandlerError::Fatal(_))
    }
}

/// Message handler trait
#[async_trait]
pub trait MessageHandler: Send + Sync {
    /// Handle one delivery to completion
    async fn handle(&self, delivery: &Delivery) -> std::result::Result<(), HandlerError>;
}

/// Why the consumer stopped
#[derive(Debug)]
pub enum StopReason {
    /// The broker closed the channel or the source ran dry
    ChannelClosed,

    /// A handler reported a fatal error
    Fatal {
        /// Delivery that triggered the stop (left unacknowledged)
        delivery_tag: DeliveryTag,
        /// The handler error
        error: BoxError,
    },
}

/// Single-consumer processing loop
pub struct Consumer;

impl Consumer {
    /// Pull and handle deliveries one at a time until the channel closes or a
    /// handler reports a fatal error.
    ///
    /// Returns `Err` only when the source itself fails (consume, ack or reject).
    pub async fn run<S, H>(source: &mut S, handler: &H) -> Result<StopReason>
    where
        S: DeliverySource + ?Sized,
        H: MessageHandler + ?Sized,
    {
        while let Some(delivery) = source.next_delivery().await {
            let delivery = delivery?;
            let start = Instant::now();

            let outcome = handler.handle(&delivery).await;
            MESSAGE_PROCESS_DURATION.observe(start.elapsed().as_secs_f64());

            match outcome {
                Ok(()) => {
                    info!(delivery_tag = delivery.tag, "Successfully processed message");
                    source.ack(&delivery).await?;
                    MESSAGES_TOTAL.with_label_values(&["acked"]).inc();
                }
                Err(HandlerError::Reject(e)) => {
                    error!(delivery_tag = delivery.tag, "Failed to handle message: {}", e);
                    error!(
                        delivery_tag = delivery.tag,
                        "Dropping message: {}",
                        delivery.payload_lossy()
                    );
                    source.reject(&delivery).await?;
                    MESSAGES_TOTAL.with_label_values(&["rejected"]).inc();
                }
                Err(HandlerError::Fatal(e)) => {
                    error!(
                        delivery_tag = delivery.tag,
                        "Fatal error handling message, stopping consumer: {}", e
                    );
                    MESSAGES_TOTAL.with_label_values(&["fatal"]).inc();
                    return Ok(StopReason::Fatal {
                        delivery_tag: delivery.tag,
                        error: e,
                    });
                }
            }
        }

        warn!("Delivery channel closed, consumer stopping");
        Ok(StopReason::ChannelClosed)
    }
}
