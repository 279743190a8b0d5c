// Request parameters and reply bodies shared by the HTTP handlers

use std::collections::HashMap;
use std::str::FromStr;

pub const INVALID_ACTION: &str = "Invalid action. Use 'start' or 'stop'.";
pub const PRODUCER_LIVENESS: &str = "This endpoint is working";
pub const MISSING_MSG: &str = "Missing 'msg' parameter.";

// Consumer Action Enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Stop,
}

impl FromStr for Action {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("start") {
            Ok(Action::Start)
        } else if s.eq_ignore_ascii_case("stop") {
            Ok(Action::Stop)
        } else {
            Err(())
        }
    }
}

/// The consumer's `action` parameter, if it names a known action
pub fn action_param(params: &HashMap<String, String>) -> Option<Action> {
    params.get("action").and_then(|action| action.parse().ok())
}

/// The producer's message parameter; `msg` wins over `message`
pub fn message_param(params: &HashMap<String, String>) -> Option<&str> {
    params
        .get("msg")
        .or_else(|| params.get("message"))
        .map(String::as_str)
}

/// Reply line for a successful publish
pub fn sent_reply(message: &str) -> String {
    format!("Message sent to Kafka: {}", message)
}
