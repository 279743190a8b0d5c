use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use super::router::{RelayRequest, Verb};
use super::DispatchError;

/// Status and body returned by an instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayResponse {
    pub status: u16,
    pub body: String,
}

/// Transport used by the dispatcher to reach instances
#[async_trait]
pub trait Relay: Send + Sync {
    /// Perform the call described by `request`
    ///
    /// Any status returned by the instance is a successful relay; only
    /// transport failures are errors.
    async fn send(&self, request: &RelayRequest) -> Result<RelayResponse, DispatchError>;
}

/// Relay over HTTP with a shared reqwest client
#[derive(Clone)]
pub struct HttpRelay {
    http_client: Client,
}

impl HttpRelay {
    /// Create a relay whose calls give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, DispatchError> {
        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(5).min(timeout))
            .timeout(timeout)
            .build()
            .map_err(|e| DispatchError::Client(e.to_string()))?;

        Ok(Self { http_client })
    }
}

#[async_trait]
impl Relay for HttpRelay {
    async fn send(&self, request: &RelayRequest) -> Result<RelayResponse, DispatchError> {
        let upstream = |e: reqwest::Error| {
            warn!(url = %request.url, error = %e, "Relay call failed");
            DispatchError::Upstream {
                verb: request.verb,
                url: request.url.clone(),
                message: e.to_string(),
            }
        };

        let builder = match request.verb {
            Verb::Get => self.http_client.get(&request.url),
            Verb::Post => self.http_client.post(&request.url).form(&request.form),
        };

        let response = builder.send().await.map_err(upstream)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(upstream)?;

        debug!(url = %request.url, status, "Relay call completed");
        Ok(RelayResponse { status, body })
    }
}
