//! Producer service: one-shot publishing to a fixed topic

use std::sync::Arc;
use tracing::{info, warn};

use crate::broker::{Delivery, Publisher, Result};

/// Configuration for a producer service
#[derive(Debug, Clone)]
pub struct ProducerConfig {
    /// Kafka bootstrap servers (comma-separated list)
    pub brokers: String,

    /// Topic every message is published to
    pub topic: String,

    /// Delivery timeout in milliseconds
    pub message_timeout_ms: u64,
}

impl Default for ProducerConfig {
    fn default() -> Self {
        Self {
            brokers: "kafka:9092".to_string(),
            topic: "tomcat-topic".to_string(),
            message_timeout_ms: 5000,
        }
    }
}

impl ProducerConfig {
    pub fn new(brokers: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            brokers: brokers.into(),
            topic: topic.into(),
            ..Default::default()
        }
    }

    /// Set the delivery timeout in milliseconds (builder pattern)
    pub fn with_message_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.message_timeout_ms = timeout_ms;
        self
    }
}

/// Publishes messages to the configured topic
///
/// Publishing is fail-fast: a delivery error is returned to the caller and
/// never retried here.
pub struct ProducerService {
    publisher: Arc<dyn Publisher>,
    config: ProducerConfig,
}

impl ProducerService {
    pub fn new(publisher: Arc<dyn Publisher>, config: ProducerConfig) -> Self {
        Self { publisher, config }
    }

    pub async fn send(&self, message: &str) -> Result<Delivery> {
        match self.publisher.publish(&self.config.topic, message).await {
            Ok(delivery) => {
                info!(
                    topic = %self.config.topic,
                    partition = delivery.partition,
                    offset = delivery.offset,
                    "Message sent"
                );
                Ok(delivery)
            }
            Err(e) => {
                warn!(topic = %self.config.topic, error = %e, "Failed to send message");
                Err(e)
            }
        }
    }

    pub fn topic(&self) -> &str {
        &self.config.topic
    }

    pub fn shutdown(&self) {
        self.publisher.close();
    }
}
