//! Prometheus metrics for message bus

use lazy_static::lazy_static;
use prometheus::{register_counter_vec, register_histogram, CounterVec, Histogram};

lazy_static! {
    /// Total messages handled, by outcome (acked/rejected/fatal)
    pub static ref MESSAGES_TOTAL: CounterVec = register_counter_vec!(
        "message_bus_messages_total",
        "Total messages handled by outcome",
        &["outcome"]
    )
    .unwrap();

    /// Message processing duration
    pub static ref MESSAGE_PROCESS_DURATION: Histogram = register_histogram!(
        "message_bus_process_duration_seconds",
        "Message processing duration in seconds"
    )
    .unwrap();
}
