//! Message Bus with AMQP support
//!
//! Provides single-consumer queue processing with:
//! - Manual acknowledgement (ack on success, reject without requeue on failure)
//! - A fatal path that stops consumption and leaves the delivery unacknowledged
//! - A pluggable delivery source (RabbitMQ via `lapin`, or in-memory for tests)
//! - Observability via Prometheus metrics

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod amqp;
pub mod consumer;
pub mod error;
pub mod message;
pub mod metrics;
pub mod source;

pub use amqp::{AmqpConfig, AmqpSource};
pub use consumer::{BoxError, Consumer, HandlerError, MessageHandler, StopReason};
pub use error::{Error, Result};
pub use message::{Delivery, DeliveryTag};
pub use source::{DeliverySource, MemorySource};
