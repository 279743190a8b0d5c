use chrono::{DateTime, TimeZone, Utc};
use rdkafka::message::Message as KafkaMessage;
use serde::{Deserialize, Serialize};

/// A message received from the broker
///
/// The payload is kept as text (lossily decoded from the record bytes). The
/// remaining fields record where the message came from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// Message payload
    pub payload: String,

    /// Topic the message was read from
    pub topic: String,

    /// Partition the message was read from
    pub partition: i32,

    /// Offset within the partition, if the broker reported one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,

    /// Record key, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Broker timestamp, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Message {
    /// Create a new Message with only a payload and topic
    ///
    /// # Example
    ///
    /// ```
    /// use kafka_bridge::broker::Message;
    ///
    /// let msg = Message::new("tomcat-topic", "hello")
    ///     .with_partition(2)
    ///     .with_offset(41);
    /// assert_eq!(msg.payload, "hello");
    /// assert_eq!(msg.offset, Some(41));
    /// ```
    pub fn new(topic: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            topic: topic.into(),
            partition: 0,
            offset: None,
            key: None,
            timestamp: None,
        }
    }

    /// Set the partition (builder pattern)
    pub fn with_partition(mut self, partition: i32) -> Self {
        self.partition = partition;
        self
    }

    /// Set the offset (builder pattern)
    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set the key (builder pattern)
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set the timestamp (builder pattern)
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Build a Message from a record handed out by rdkafka
    pub fn from_kafka<M: KafkaMessage>(record: &M) -> Self {
        let payload = record
            .payload()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .unwrap_or_default();

        // rdkafka reports a negative offset when none is known
        let offset = Some(record.offset()).filter(|offset| *offset >= 0);

        Self {
            payload,
            topic: record.topic().to_string(),
            partition: record.partition(),
            offset,
            key: record
                .key()
                .map(|bytes| String::from_utf8_lossy(bytes).into_owned()),
            timestamp: record
                .timestamp()
                .to_millis()
                .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        }
    }
}
