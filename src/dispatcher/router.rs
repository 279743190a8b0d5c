use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::{DispatchError, DispatcherConfig};

/// Logical names of the instances the dispatcher can reach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceName {
    TomcatConsumer,
    JettyConsumer,
    TomcatProducer,
    JettyProducer,
}

/// Whether an instance consumes or produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Consumer,
    Producer,
}

impl ServiceName {
    pub const ALL: [ServiceName; 4] = [
        ServiceName::TomcatConsumer,
        ServiceName::JettyConsumer,
        ServiceName::TomcatProducer,
        ServiceName::JettyProducer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceName::TomcatConsumer => "tomcat-consumer",
            ServiceName::JettyConsumer => "jetty-consumer",
            ServiceName::TomcatProducer => "tomcat-producer",
            ServiceName::JettyProducer => "jetty-producer",
        }
    }

    pub fn role(&self) -> Role {
        match self {
            ServiceName::TomcatConsumer | ServiceName::JettyConsumer => Role::Consumer,
            ServiceName::TomcatProducer | ServiceName::JettyProducer => Role::Producer,
        }
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceName {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_ascii_lowercase();
        ServiceName::ALL
            .into_iter()
            .find(|service| service.as_str() == lowered)
            .ok_or(DispatchError::UnknownService(lowered))
    }
}

/// HTTP verb of a dispatcher command, and of the call relayed for it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
        }
    }

    /// Word used when a relayed call with this verb fails
    pub fn failure_word(&self) -> &'static str {
        match self {
            Verb::Get => "GETing",
            Verb::Post => "calling",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Commands understood by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Start,
    Stop,
    Send,
    Messages,
    Stats,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Start => "start",
            Operation::Stop => "stop",
            Operation::Send => "send",
            Operation::Messages => "messages",
            Operation::Stats => "stats",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "start" => Some(Operation::Start),
            "stop" => Some(Operation::Stop),
            "send" => Some(Operation::Send),
            "messages" => Some(Operation::Messages),
            "stats" => Some(Operation::Stats),
            _ => None,
        }
    }
}

/// A call to make against one instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayRequest {
    pub verb: Verb,
    pub url: String,
    /// Form fields sent as `application/x-www-form-urlencoded` (POST only)
    pub form: Vec<(String, String)>,
}

/// A resolved dispatcher command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub service: ServiceName,
    pub operation: Operation,
    pub request: RelayRequest,
}

impl Route {
    /// Prefix used in the dispatcher's reply, e.g. `POST /tomcat-consumer/start`
    pub fn label(&self) -> String {
        format!(
            "{} /{}/{}",
            self.request.verb, self.service, self.operation.as_str()
        )
    }
}

/// Maps `(verb, service, operation)` onto a relay request
///
/// | service    | verb | operation      | relayed as                      |
/// |------------|------|----------------|---------------------------------|
/// | *-consumer | POST | start, stop    | POST `action=<op>`              |
/// | *-consumer | GET  | messages       | GET                             |
/// | *-producer | POST | send           | POST `action=send&msg=<msg>`    |
/// | *-producer | GET  | stats          | GET                             |
#[derive(Debug, Clone)]
pub struct Router {
    config: DispatcherConfig,
}

impl Router {
    pub fn new(config: &DispatcherConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Resolve a dispatcher path such as `tomcat-consumer/start`
    ///
    /// Service and operation are matched case-insensitively. Segments after
    /// the operation are ignored.
    pub fn resolve(
        &self,
        verb: Verb,
        path: &str,
        params: &HashMap<String, String>,
    ) -> Result<Route, DispatchError> {
        let mut segments = path.split('/').filter(|segment| !segment.is_empty());

        let service = segments.next().ok_or(DispatchError::MissingPath)?;
        let operation = segments.next().ok_or(DispatchError::IncompletePath)?;

        let service: ServiceName = service.parse()?;
        let operation = operation.to_ascii_lowercase();

        let unknown = || DispatchError::UnknownOperation {
            method: verb.to_string(),
            service: service.to_string(),
            operation: operation.clone(),
        };
        let op = Operation::parse(&operation).ok_or_else(unknown)?;

        let form = match (service.role(), verb, op) {
            (Role::Consumer, Verb::Post, Operation::Start | Operation::Stop) => {
                vec![("action".to_string(), op.as_str().to_string())]
            }
            (Role::Consumer, Verb::Get, Operation::Messages) => Vec::new(),
            (Role::Producer, Verb::Post, Operation::Send) => {
                let msg = params.get("msg").ok_or_else(|| DispatchError::MissingParameter {
                    parameter: "msg".to_string(),
                    service: service.to_string(),
                })?;
                vec![
                    ("action".to_string(), "send".to_string()),
                    ("msg".to_string(), msg.clone()),
                ]
            }
            (Role::Producer, Verb::Get, Operation::Stats) => Vec::new(),
            _ => return Err(unknown()),
        };

        let url = self.config.endpoint(service).to_string();

        Ok(Route {
            service,
            operation: op,
            request: RelayRequest { verb, url, form },
        })
    }
}
