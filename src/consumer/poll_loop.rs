use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::MessageBuffer;
use crate::broker::BrokerClient;

/// Counters reported by a poll loop when it exits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollSummary {
    /// Completed poll calls, successful or not
    pub cycles: u64,
    /// Messages appended to the buffer
    pub messages: u64,
    /// Poll calls that returned an error
    pub failures: u64,
}

/// Result of a single poll cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cycle {
    /// The batch was appended; holds the number of messages (0 when idle)
    Appended(usize),
    /// The broker reported an error; polling goes on
    Failed,
    /// Cancellation was observed before a message was taken
    Cancelled,
}

/// Background loop moving messages from the broker into the buffer
///
/// The loop runs until its cancellation token fires. Fetch errors are logged
/// and the next cycle starts immediately. The loop never closes the broker
/// client.
pub struct PollLoop {
    client: Arc<dyn BrokerClient>,
    buffer: Arc<MessageBuffer>,
    poll_timeout: Duration,
}

impl PollLoop {
    pub fn new(
        client: Arc<dyn BrokerClient>,
        buffer: Arc<MessageBuffer>,
        poll_timeout: Duration,
    ) -> Self {
        Self {
            client,
            buffer,
            poll_timeout,
        }
    }

    /// Run the loop on a new tokio task
    pub fn spawn(self, token: CancellationToken) -> JoinHandle<PollSummary> {
        tokio::spawn(self.run(token))
    }

    /// Run the loop on the current task until `token` is cancelled
    pub async fn run(self, token: CancellationToken) -> PollSummary {
        info!(poll_timeout_ms = self.poll_timeout.as_millis() as u64, "Poll loop started");
        let mut summary = PollSummary::default();

        while !token.is_cancelled() {
            // A client may answer without ever suspending
            tokio::task::yield_now().await;

            match self.poll_once(&token).await {
                Cycle::Appended(count) => {
                    summary.cycles += 1;
                    summary.messages += count as u64;
                }
                Cycle::Failed => {
                    summary.cycles += 1;
                    summary.failures += 1;
                }
                Cycle::Cancelled => break,
            }
        }

        info!(
            cycles = summary.cycles,
            messages = summary.messages,
            failures = summary.failures,
            "Poll loop stopped"
        );
        summary
    }

    /// Run one poll cycle
    ///
    /// Only the wait for the first message is raced against the token. Once
    /// a message has been taken, the rest of its batch is drained and the
    /// whole batch is appended even if the token fires meanwhile.
    pub async fn poll_once(&self, token: &CancellationToken) -> Cycle {
        let received = tokio::select! {
            biased;
            _ = token.cancelled() => return Cycle::Cancelled,
            received = self.client.recv(self.poll_timeout) => received,
        };

        let first = match received {
            Ok(Some(first)) => first,
            Ok(None) => return Cycle::Appended(0),
            Err(e) => {
                warn!(error = %e, "Error during polling");
                return Cycle::Failed;
            }
        };

        let mut batch = vec![first];
        batch.extend(self.client.drain().await);

        for message in &batch {
            debug!(
                payload = %message.payload,
                partition = message.partition,
                offset = ?message.offset,
                "Received message"
            );
        }

        let count = batch.len();
        self.buffer.append_batch(batch);
        Cycle::Appended(count)
    }
}
