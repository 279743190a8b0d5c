use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{Consumer as _, StreamConsumer};
use rdkafka::producer::{FutureProducer, FutureRecord, Producer as _};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{BrokerClient, BrokerError, Delivery, Message, Publisher, Result};
use crate::consumer::ConsumerConfig;
use crate::producer::ProducerConfig;

/// How long to keep draining once the first message of a batch has arrived
const DRAIN_TIMEOUT: Duration = Duration::from_millis(10);

/// How long `close` waits for outstanding deliveries
const FLUSH_TIMEOUT: Duration = Duration::from_secs(5);

/// Kafka consumer subscribed to a single topic
pub struct KafkaBrokerClient {
    consumer: StreamConsumer,
    max_batch_size: usize,
    closed: AtomicBool,
}

impl KafkaBrokerClient {
    /// Create the consumer and subscribe it to the configured topic
    pub fn new(config: &ConsumerConfig) -> Result<Self> {
        let consumer: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", &config.brokers)
            .set("group.id", &config.group_id)
            .set("auto.offset.reset", &config.auto_offset_reset)
            .set("enable.auto.commit", "true")
            .set("enable.partition.eof", "false")
            .create()
            .map_err(|e| BrokerError::Client(format!("Failed to create consumer: {e}")))?;

        consumer
            .subscribe(&[&config.topic])
            .map_err(|e| BrokerError::Client(format!("Failed to subscribe to topic: {e}")))?;

        info!(
            brokers = %config.brokers,
            group_id = %config.group_id,
            topic = %config.topic,
            "Kafka consumer subscribed"
        );

        Ok(Self {
            consumer,
            max_batch_size: config.max_batch_size.max(1),
            closed: AtomicBool::new(false),
        })
    }
}

#[async_trait]
impl BrokerClient for KafkaBrokerClient {
    async fn recv(&self, timeout: Duration) -> Result<Option<Message>> {
        if self.closed.load(Ordering::Acquire) {
            return Err(BrokerError::Closed);
        }

        match tokio::time::timeout(timeout, self.consumer.recv()).await {
            Ok(received) => received
                .map(|record| Some(Message::from_kafka(&record)))
                .map_err(|e| BrokerError::Poll(e.to_string())),
            Err(_) => Ok(None),
        }
    }

    async fn drain(&self) -> Vec<Message> {
        let mut batch = Vec::new();

        // Pick up whatever else is already queued locally
        while batch.len() + 1 < self.max_batch_size {
            match tokio::time::timeout(DRAIN_TIMEOUT, self.consumer.recv()).await {
                Ok(Ok(record)) => batch.push(Message::from_kafka(&record)),
                Ok(Err(e)) => {
                    warn!(error = %e, "Error while draining batch, keeping partial batch");
                    break;
                }
                Err(_) => break,
            }
        }

        debug!(count = batch.len(), "Drained queued messages");
        batch
    }

    fn close(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        self.consumer.unsubscribe();
        info!("Kafka consumer closed");
    }
}

/// Kafka producer publishing plain-text payloads
pub struct KafkaPublisher {
    producer: FutureProducer,
    message_timeout: Duration,
    closed: AtomicBool,
}

impl KafkaPublisher {
    /// Create the producer
    pub fn new(config: &ProducerConfig) -> Result<Self> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", &config.brokers)
            .set("message.timeout.ms", config.message_timeout_ms.to_string())
            .create()
            .map_err(|e| BrokerError::Client(format!("Failed to create producer: {e}")))?;

        info!(brokers = %config.brokers, "Kafka producer created");

        Ok(Self {
            producer,
            message_timeout: Duration::from_millis(config.message_timeout_ms),
            closed: AtomicBool::new(false),
        })
    }
}

#[async_trait]
impl Publisher for KafkaPublisher {
    async fn publish(&self, topic: &str, payload: &str) -> Result<Delivery> {
        if self.closed.load(Ordering::Acquire) {
            return Err(BrokerError::Closed);
        }

        let record = FutureRecord::<(), str>::to(topic).payload(payload);
        let (partition, offset) = self
            .producer
            .send(record, self.message_timeout)
            .await
            .map_err(|(err, _)| BrokerError::Publish(err.to_string()))?;

        Ok(Delivery { partition, offset })
    }

    fn close(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        if let Err(e) = self.producer.flush(FLUSH_TIMEOUT) {
            warn!(error = %e, "Failed to flush producer on close");
        }
        info!("Kafka producer closed");
    }
}
