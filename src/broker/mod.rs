//! Broker client abstraction
//!
//! The consumer and producer services only talk to the broker through the two
//! traits defined here. `kafka` holds the rdkafka-backed implementations used
//! by the binary; tests substitute scripted clients.

use async_trait::async_trait;
use std::time::Duration;

pub mod error;
pub mod kafka;
pub mod message;

pub use error::{BrokerError, Result};
pub use kafka::{KafkaBrokerClient, KafkaPublisher};
pub use message::Message;

/// Subscribing side of the broker
///
/// A batch is the first message returned by [`recv`](Self::recv) followed by
/// whatever [`drain`](Self::drain) hands back right after it. Only `recv` may
/// be cancelled; once it has returned a message, the batch belongs to the
/// caller.
#[async_trait]
pub trait BrokerClient: Send + Sync {
    /// Wait at most `timeout` for the next message
    ///
    /// `Ok(None)` means nothing arrived in time; it is not an error. The
    /// future is cancel-safe: dropped before it resolves, it has taken
    /// nothing from the broker.
    async fn recv(&self, timeout: Duration) -> Result<Option<Message>>;

    /// Take the messages already queued behind the last one received
    ///
    /// Returns promptly and never fails; a broken fetch ends the drain early
    /// and keeps what was taken. Not cancel-safe.
    async fn drain(&self) -> Vec<Message>;

    /// Fetch the next batch, waiting at most `timeout` for its first message
    async fn poll(&self, timeout: Duration) -> Result<Vec<Message>> {
        match self.recv(timeout).await? {
            Some(first) => {
                let mut batch = vec![first];
                batch.extend(self.drain().await);
                Ok(batch)
            }
            None => Ok(Vec::new()),
        }
    }

    /// Release the subscription
    ///
    /// Callers guarantee this runs at most once.
    fn close(&self);
}

/// Broker coordinates of a published message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    pub partition: i32,
    pub offset: i64,
}

/// Publishing side of the broker
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Publish one payload to `topic` and wait for the delivery report
    async fn publish(&self, topic: &str, payload: &str) -> Result<Delivery>;

    /// Flush outstanding deliveries and release the client
    fn close(&self);
}
