//! Error types for the broker layer

use thiserror::Error;

/// Errors raised by broker clients
#[derive(Debug, Error)]
pub enum BrokerError {
    /// Errors reported by librdkafka
    #[error("Kafka error: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),

    /// Client construction or subscription failures
    #[error("Client error: {0}")]
    Client(String),

    /// Fetch failures surfaced by a poll
    #[error("Poll error: {0}")]
    Poll(String),

    /// Delivery failures surfaced by a publish
    #[error("Publish error: {0}")]
    Publish(String),

    /// The client was used after it was closed
    #[error("Client is closed")]
    Closed,
}

pub type Result<T> = std::result::Result<T, BrokerError>;
