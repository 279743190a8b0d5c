//! Command line interface
//!
//! One binary serves all three roles; the subcommand picks the role. Every
//! flag can also be set through the environment variable shown in `--help`.

use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::num::NonZeroUsize;

use crate::consumer::ConsumerConfig;
use crate::dispatcher::DispatcherConfig;
use crate::producer::ProducerConfig;

#[derive(Debug, Parser)]
#[command(name = "kafka-bridge", version, about = "HTTP bridge to a Kafka broker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Buffer messages from a topic and serve them over HTTP
    Consumer(ConsumerArgs),
    /// Publish messages received over HTTP to a topic
    Producer(ProducerArgs),
    /// Relay admin commands to consumer and producer instances
    Dispatcher(DispatcherArgs),
}

impl Command {
    pub fn listen(&self) -> SocketAddr {
        match self {
            Command::Consumer(args) => args.listen,
            Command::Producer(args) => args.listen,
            Command::Dispatcher(args) => args.listen,
        }
    }
}

#[derive(Debug, Args)]
pub struct ConsumerArgs {
    /// Address to serve HTTP on
    #[arg(long, env = "BRIDGE_LISTEN", default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,

    /// Kafka bootstrap servers
    #[arg(long, env = "KAFKA_BROKERS", default_value = "kafka:9092")]
    pub brokers: String,

    /// Consumer group ID
    #[arg(long, env = "KAFKA_GROUP_ID", default_value = "consumer-group")]
    pub group_id: String,

    /// Topic to consume from
    #[arg(long, env = "KAFKA_TOPIC", default_value = "tomcat-topic")]
    pub topic: String,

    /// Maximum wait of a single poll, in milliseconds
    #[arg(long, env = "POLL_TIMEOUT_MS", default_value_t = 1000)]
    pub poll_timeout_ms: u64,

    /// Offset reset policy when the group has no committed offset
    #[arg(long, env = "KAFKA_AUTO_OFFSET_RESET", default_value = "earliest")]
    pub auto_offset_reset: String,

    /// Maximum messages fetched by one poll
    #[arg(long, env = "MAX_BATCH_SIZE", default_value_t = 500)]
    pub max_batch_size: usize,

    /// Bound the message buffer, dropping the oldest messages past it (at least 1)
    #[arg(long, env = "BUFFER_CAPACITY")]
    pub buffer_capacity: Option<NonZeroUsize>,
}

impl From<&ConsumerArgs> for ConsumerConfig {
    fn from(args: &ConsumerArgs) -> Self {
        let config = ConsumerConfig::new(&args.brokers, &args.topic)
            .with_group_id(&args.group_id)
            .with_poll_timeout_ms(args.poll_timeout_ms)
            .with_auto_offset_reset(&args.auto_offset_reset)
            .with_max_batch_size(args.max_batch_size);

        match args.buffer_capacity {
            Some(capacity) => config.with_buffer_capacity(capacity),
            None => config,
        }
    }
}

#[derive(Debug, Args)]
pub struct ProducerArgs {
    /// Address to serve HTTP on
    #[arg(long, env = "BRIDGE_LISTEN", default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,

    /// Kafka bootstrap servers
    #[arg(long, env = "KAFKA_BROKERS", default_value = "kafka:9092")]
    pub brokers: String,

    /// Topic to publish to
    #[arg(long, env = "KAFKA_TOPIC", default_value = "tomcat-topic")]
    pub topic: String,

    /// Delivery timeout, in milliseconds
    #[arg(long, env = "MESSAGE_TIMEOUT_MS", default_value_t = 5000)]
    pub message_timeout_ms: u64,
}

impl From<&ProducerArgs> for ProducerConfig {
    fn from(args: &ProducerArgs) -> Self {
        ProducerConfig::new(&args.brokers, &args.topic)
            .with_message_timeout_ms(args.message_timeout_ms)
    }
}

#[derive(Debug, Args)]
pub struct DispatcherArgs {
    /// Address to serve HTTP on
    #[arg(long, env = "BRIDGE_LISTEN", default_value = "0.0.0.0:8085")]
    pub listen: SocketAddr,

    #[arg(long, env = "TOMCAT_CONSUMER_URL", default_value = "http://consumer:8080/consumer")]
    pub tomcat_consumer_url: String,

    #[arg(long, env = "JETTY_CONSUMER_URL", default_value = "http://consumer-jetty:8080/consumer")]
    pub jetty_consumer_url: String,

    #[arg(long, env = "TOMCAT_PRODUCER_URL", default_value = "http://producer:8080/producer")]
    pub tomcat_producer_url: String,

    #[arg(long, env = "JETTY_PRODUCER_URL", default_value = "http://producer-jetty:8080/producer")]
    pub jetty_producer_url: String,

    /// Timeout of a relayed call, in milliseconds
    #[arg(long, env = "RELAY_TIMEOUT_MS", default_value_t = 5000)]
    pub request_timeout_ms: u64,

    /// Origin allowed to read dispatcher replies
    #[arg(long, env = "ALLOWED_ORIGIN", default_value = "http://localhost:3000")]
    pub allowed_origin: String,
}

impl From<&DispatcherArgs> for DispatcherConfig {
    fn from(args: &DispatcherArgs) -> Self {
        DispatcherConfig {
            tomcat_consumer_url: args.tomcat_consumer_url.clone(),
            jetty_consumer_url: args.jetty_consumer_url.clone(),
            tomcat_producer_url: args.tomcat_producer_url.clone(),
            jetty_producer_url: args.jetty_producer_url.clone(),
            request_timeout_ms: args.request_timeout_ms,
            allowed_origin: args.allowed_origin.clone(),
        }
    }
}
