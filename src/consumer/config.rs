use std::num::NonZeroUsize;
use std::time::Duration;

/// Configuration for a consumer service
#[derive(Debug, Clone)]
pub struct ConsumerConfig {
    /// Kafka bootstrap servers (comma-separated list)
    pub brokers: String,

    /// Consumer group ID
    pub group_id: String,

    /// Topic to consume from
    pub topic: String,

    /// Maximum wait for a single poll (milliseconds)
    pub poll_timeout_ms: u64,

    /// Where to start when the group has no committed offset ("earliest" or "latest")
    pub auto_offset_reset: String,

    /// Maximum messages returned by a single poll
    pub max_batch_size: usize,

    /// Optional bound on buffered messages; the oldest are dropped past it
    pub buffer_capacity: Option<NonZeroUsize>,
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self {
            brokers: "kafka:9092".to_string(),
            group_id: "consumer-group".to_string(),
            topic: "tomcat-topic".to_string(),
            poll_timeout_ms: 1000,
            auto_offset_reset: "earliest".to_string(),
            max_batch_size: 500,
            buffer_capacity: None,
        }
    }
}

impl ConsumerConfig {
    /// Create a new consumer configuration
    ///
    /// # Example
    ///
    /// ```
    /// use kafka_bridge::consumer::ConsumerConfig;
    ///
    /// let config = ConsumerConfig::new("localhost:9092", "tomcat-topic")
    ///     .with_group_id("bridge")
    ///     .with_poll_timeout_ms(250);
    /// assert_eq!(config.poll_timeout().as_millis(), 250);
    /// ```
    pub fn new(brokers: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            brokers: brokers.into(),
            topic: topic.into(),
            ..Default::default()
        }
    }

    /// Set the consumer group (builder pattern)
    pub fn with_group_id(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = group_id.into();
        self
    }

    /// Set the poll timeout in milliseconds (builder pattern)
    pub fn with_poll_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.poll_timeout_ms = timeout_ms;
        self
    }

    /// Set the auto offset reset policy (builder pattern)
    pub fn with_auto_offset_reset(mut self, policy: impl Into<String>) -> Self {
        self.auto_offset_reset = policy.into();
        self
    }

    /// Set the maximum batch size (builder pattern)
    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = max_batch_size;
        self
    }

    /// Bound the message buffer (builder pattern)
    pub fn with_buffer_capacity(mut self, capacity: NonZeroUsize) -> Self {
        self.buffer_capacity = Some(capacity);
        self
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }
}
