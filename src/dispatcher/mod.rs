//! Dispatcher: relays admin commands to consumer and producer instances
//!
//! A command such as `POST /dispatcher/tomcat-consumer/start` is resolved by
//! the [`Router`] into a call against the instance's base URL, performed by a
//! [`Relay`], and answered with a one-line summary:
//!
//! ```text
//! POST /tomcat-consumer/start -> HTTP 200 | Polling started successfully.
//! ```
//!
//! Malformed commands are rejected before any call is made. A failed call is
//! not an error of the dispatcher itself and is reported in the summary line.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

pub mod config;
pub mod error;
pub mod relay;
pub mod router;

pub use config::DispatcherConfig;
pub use error::DispatchError;
pub use relay::{HttpRelay, Relay, RelayResponse};
pub use router::{Operation, RelayRequest, Role, Route, Router, ServiceName, Verb};

pub struct Dispatcher {
    router: Router,
    relay: Arc<dyn Relay>,
    config: DispatcherConfig,
}

impl Dispatcher {
    pub fn new(config: DispatcherConfig, relay: Arc<dyn Relay>) -> Self {
        Self {
            router: Router::new(&config),
            relay,
            config,
        }
    }

    /// Build a dispatcher relaying over HTTP
    pub fn with_http_relay(config: DispatcherConfig) -> Result<Self, DispatchError> {
        let relay = HttpRelay::new(config.request_timeout())?;
        Ok(Self::new(config, Arc::new(relay)))
    }

    /// Resolve and relay one command, returning the summary line
    ///
    /// Errors are returned only for commands that could not be resolved.
    pub async fn dispatch(
        &self,
        verb: Verb,
        path: &str,
        params: &HashMap<String, String>,
    ) -> Result<String, DispatchError> {
        let route = self.router.resolve(verb, path, params)?;
        info!(route = %route.label(), url = %route.request.url, "Relaying command");

        let outcome = match self.relay.send(&route.request).await {
            Ok(response) => format!("HTTP {} | {}", response.status, response.body),
            Err(e) => e.to_string(),
        };

        Ok(format!("{} -> {}", route.label(), outcome))
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }
}
