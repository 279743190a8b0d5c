use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use super::{ConsumerConfig, ConsumerError, MessageBuffer, PollLoop, PollSummary};
use crate::broker::{BrokerClient, Message};

/// Outcome of [`ConsumerService::start`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    AlreadyRunning,
}

impl StartOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            StartOutcome::Started => "Polling started successfully.",
            StartOutcome::AlreadyRunning => "Polling is already running.",
        }
    }
}

/// Outcome of [`ConsumerService::stop`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    Stopped,
    NotRunning,
}

impl StopOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            StopOutcome::Stopped => "Polling stopped successfully.",
            StopOutcome::NotRunning => "Polling is not running.",
        }
    }
}

/// Point-in-time view of a consumer service
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ConsumerStatus {
    pub running: bool,
    pub buffered: usize,
    pub topic: String,
}

struct ActivePoll {
    token: CancellationToken,
    handle: JoinHandle<PollSummary>,
}

enum PollState {
    Stopped,
    Running(ActivePoll),
}

struct Lifecycle {
    poll: PollState,
    closed: bool,
}

/// Owns the broker client, the message buffer and the poll loop lifecycle
///
/// At most one poll loop is active at a time. `start`, `stop` and `shutdown`
/// all go through the same lock, and `stop` only returns once the loop task
/// has exited, so no message is appended after `stop` returns.
pub struct ConsumerService {
    client: Arc<dyn BrokerClient>,
    buffer: Arc<MessageBuffer>,
    config: ConsumerConfig,
    lifecycle: Mutex<Lifecycle>,
}

impl ConsumerService {
    pub fn new(client: Arc<dyn BrokerClient>, config: ConsumerConfig) -> Self {
        let buffer = match config.buffer_capacity {
            Some(capacity) => MessageBuffer::with_capacity_limit(capacity),
            None => MessageBuffer::new(),
        };

        Self {
            client,
            buffer: Arc::new(buffer),
            config,
            lifecycle: Mutex::new(Lifecycle {
                poll: PollState::Stopped,
                closed: false,
            }),
        }
    }

    /// Start polling unless a loop is already running
    pub async fn start(&self) -> Result<StartOutcome, ConsumerError> {
        let mut lifecycle = self.lifecycle.lock().await;

        if lifecycle.closed {
            return Err(ConsumerError::Closed);
        }
        if let PollState::Running(_) = lifecycle.poll {
            return Ok(StartOutcome::AlreadyRunning);
        }

        let token = CancellationToken::new();
        let handle = PollLoop::new(
            Arc::clone(&self.client),
            Arc::clone(&self.buffer),
            self.config.poll_timeout(),
        )
        .spawn(token.clone());

        lifecycle.poll = PollState::Running(ActivePoll { token, handle });
        info!(topic = %self.config.topic, "Polling started");

        Ok(StartOutcome::Started)
    }

    /// Stop the running loop and wait for it to exit
    pub async fn stop(&self) -> StopOutcome {
        let mut lifecycle = self.lifecycle.lock().await;
        Self::stop_locked(&mut lifecycle).await
    }

    /// Every message received so far, in arrival order
    pub fn list_messages(&self) -> Vec<Message> {
        self.buffer.snapshot()
    }

    pub async fn is_running(&self) -> bool {
        matches!(self.lifecycle.lock().await.poll, PollState::Running(_))
    }

    pub async fn status(&self) -> ConsumerStatus {
        ConsumerStatus {
            running: self.is_running().await,
            buffered: self.buffer.len(),
            topic: self.config.topic.clone(),
        }
    }

    /// Stop polling and close the broker client
    ///
    /// Safe to call more than once; the client is closed on the first call only.
    pub async fn shutdown(&self) {
        let mut lifecycle = self.lifecycle.lock().await;
        Self::stop_locked(&mut lifecycle).await;

        if !lifecycle.closed {
            lifecycle.closed = true;
            self.client.close();
            info!(topic = %self.config.topic, "Consumer service shut down");
        }
    }

    pub fn config(&self) -> &ConsumerConfig {
        &self.config
    }

    async fn stop_locked(lifecycle: &mut Lifecycle) -> StopOutcome {
        let active = match std::mem::replace(&mut lifecycle.poll, PollState::Stopped) {
            PollState::Running(active) => active,
            PollState::Stopped => return StopOutcome::NotRunning,
        };

        active.token.cancel();
        match active.handle.await {
            Ok(summary) => info!(
                cycles = summary.cycles,
                messages = summary.messages,
                "Polling stopped"
            ),
            Err(e) => error!(error = %e, "Poll loop task ended abnormally"),
        }

        StopOutcome::Stopped
    }
}
