#![allow(dead_code)]

use async_trait::async_trait;
use kafka_bridge::broker::{self, BrokerClient, BrokerError, Delivery, Message, Publisher};
use kafka_bridge::dispatcher::{DispatchError, Relay, RelayRequest, RelayResponse};
use std::collections::VecDeque;
use std::net::{SocketAddr, TcpListener};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const TOPIC: &str = "tomcat-topic";

/// What a scripted poll returns
pub enum Step {
    Batch(Vec<&'static str>),
    Fail(&'static str),
    /// Wait this long, then return the batch
    Slow(Duration, Vec<&'static str>),
}

/// What the broker does once the script runs out
pub enum Exhausted {
    /// Wait for the poll timeout and return nothing
    Idle,
    /// Return nothing at once, without suspending
    Instant,
    /// Return one numbered message per poll after a short pause
    Stream(Duration),
}

/// Mock broker replaying a fixed script of poll results
///
/// Each `Batch` step is handed out as one `recv` followed by one `drain`.
/// Tracks how many receives ran and the largest number in flight at once,
/// which exposes a second concurrent poll loop. A `Slow` step stays queued
/// until its delay has passed, so a cancelled receive takes nothing.
pub struct ScriptedBroker {
    steps: Mutex<VecDeque<Step>>,
    queued: Mutex<VecDeque<Message>>,
    exhausted: Exhausted,
    polls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    closes: AtomicUsize,
    streamed: AtomicUsize,
}

impl ScriptedBroker {
    pub fn new(steps: Vec<Step>) -> Arc<Self> {
        Self::with_exhausted(steps, Exhausted::Idle)
    }

    pub fn streaming(pause: Duration) -> Arc<Self> {
        Self::with_exhausted(Vec::new(), Exhausted::Stream(pause))
    }

    pub fn with_exhausted(steps: Vec<Step>, exhausted: Exhausted) -> Arc<Self> {
        Arc::new(Self {
            steps: Mutex::new(steps.into()),
            queued: Mutex::new(VecDeque::new()),
            exhausted,
            polls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            closes: AtomicUsize::new(0),
            streamed: AtomicUsize::new(0),
        })
    }

    pub fn polls(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    async fn next(&self, timeout: Duration) -> broker::Result<Option<Message>> {
        let delay = match self.steps.lock().unwrap().front() {
            Some(Step::Slow(delay, _)) => Some(*delay),
            _ => None,
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let step = self.steps.lock().unwrap().pop_front();
        match step {
            Some(Step::Batch(payloads)) | Some(Step::Slow(_, payloads)) => {
                let mut messages: VecDeque<Message> = batch(&payloads).into();
                let first = messages.pop_front();
                *self.queued.lock().unwrap() = messages;
                Ok(first)
            }
            Some(Step::Fail(reason)) => Err(BrokerError::Poll(reason.to_string())),
            None => match self.exhausted {
                Exhausted::Idle => {
                    tokio::time::sleep(timeout).await;
                    Ok(None)
                }
                Exhausted::Instant => Ok(None),
                Exhausted::Stream(pause) => {
                    tokio::time::sleep(pause).await;
                    let n = self.streamed.fetch_add(1, Ordering::SeqCst);
                    Ok(Some(Message::new(TOPIC, format!("m{n}")).with_offset(n as i64)))
                }
            },
        }
    }
}

#[async_trait]
impl BrokerClient for ScriptedBroker {
    async fn recv(&self, timeout: Duration) -> broker::Result<Option<Message>> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let _guard = InFlight(&self.in_flight);
        self.next(timeout).await
    }

    async fn drain(&self) -> Vec<Message> {
        self.queued.lock().unwrap().drain(..).collect()
    }

    fn close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

/// Decrements the in-flight counter even when the receive future is dropped
struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Mock topic log handing out one record per `interval`
///
/// A record leaves the log the moment it is taken, the way a consumer's
/// position advances on fetch, so anything taken and then lost never comes
/// back.
pub struct TricklingLog {
    records: Mutex<VecDeque<Message>>,
    interval: Duration,
}

impl TricklingLog {
    pub fn new(payloads: &[&str], interval: Duration) -> Arc<Self> {
        Arc::new(Self {
            records: Mutex::new(batch(payloads).into()),
            interval,
        })
    }

    pub fn remaining(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    fn take(&self) -> Option<Message> {
        self.records.lock().unwrap().pop_front()
    }
}

#[async_trait]
impl BrokerClient for TricklingLog {
    async fn recv(&self, timeout: Duration) -> broker::Result<Option<Message>> {
        if self.remaining() == 0 {
            tokio::time::sleep(timeout).await;
            return Ok(None);
        }
        tokio::time::sleep(self.interval).await;
        Ok(self.take())
    }

    async fn drain(&self) -> Vec<Message> {
        let mut drained = Vec::new();
        while self.remaining() > 0 {
            tokio::time::sleep(self.interval).await;
            drained.extend(self.take());
        }
        drained
    }

    fn close(&self) {}
}

fn batch(payloads: &[&str]) -> Vec<Message> {
    payloads
        .iter()
        .enumerate()
        .map(|(i, payload)| Message::new(TOPIC, *payload).with_offset(i as i64))
        .collect()
}

pub fn payloads(messages: &[Message]) -> Vec<String> {
    messages.iter().map(|m| m.payload.clone()).collect()
}

/// Publisher recording every publish; fails when `fail` is set
#[derive(Default)]
pub struct RecordingPublisher {
    pub published: Mutex<Vec<(String, String)>>,
    /// Every publish call, failed ones included
    pub attempts: AtomicUsize,
    pub fail: bool,
    pub closes: AtomicUsize,
}

impl RecordingPublisher {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn published(&self) -> Vec<(String, String)> {
        self.published.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Publisher for RecordingPublisher {
    async fn publish(&self, topic: &str, payload: &str) -> broker::Result<Delivery> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(BrokerError::Publish("Local: Message timed out".to_string()));
        }
        let mut published = self.published.lock().unwrap();
        published.push((topic.to_string(), payload.to_string()));
        Ok(Delivery {
            partition: 0,
            offset: published.len() as i64 - 1,
        })
    }

    fn close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

/// Relay recording every request and answering with a canned response
pub struct RecordingRelay {
    pub requests: Mutex<Vec<RelayRequest>>,
    response: Result<RelayResponse, String>,
}

impl RecordingRelay {
    pub fn answering(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            response: Ok(RelayResponse {
                status,
                body: body.to_string(),
            }),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            response: Err(message.to_string()),
        })
    }

    pub fn requests(&self) -> Vec<RelayRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Relay for RecordingRelay {
    async fn send(&self, request: &RelayRequest) -> Result<RelayResponse, DispatchError> {
        self.requests.lock().unwrap().push(request.clone());
        self.response.clone().map_err(|message| DispatchError::Upstream {
            verb: request.verb,
            url: request.url.clone(),
            message,
        })
    }
}

/// An address on localhost that was free a moment ago
pub fn free_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

/// Wait until something accepts connections on `addr`
pub async fn wait_for_listener(addr: SocketAddr) {
    for _ in 0..100 {
        if tokio::net::TcpStream::connect(addr).await.is_ok() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("server on {addr} never came up");
}
