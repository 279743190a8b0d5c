/// Consumer service: buffered background polling of one topic
///
/// This module provides:
/// - `MessageBuffer`: thread-safe, arrival-ordered message store
/// - `PollLoop`: background task filling the buffer from a `BrokerClient`
/// - `ConsumerService`: start/stop lifecycle and read access to the buffer
/// - `ConsumerConfig`: configuration for all of the above
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use kafka_bridge::broker::KafkaBrokerClient;
/// use kafka_bridge::consumer::{ConsumerConfig, ConsumerService};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = ConsumerConfig::new("localhost:9092", "tomcat-topic");
///     let client = KafkaBrokerClient::new(&config)?;
///     let service = ConsumerService::new(Arc::new(client), config);
///
///     service.start().await?;
///     // ... later
///     let messages = service.list_messages();
///     println!("{} messages buffered", messages.len());
///     service.shutdown().await;
///     Ok(())
/// }
/// ```

pub mod buffer;
pub mod config;
pub mod error;
pub mod poll_loop;
pub mod service;

pub use buffer::MessageBuffer;
pub use config::ConsumerConfig;
pub use error::ConsumerError;
pub use poll_loop::{Cycle, PollLoop, PollSummary};
pub use service::{ConsumerService, ConsumerStatus, StartOutcome, StopOutcome};
