//! Error types for the dispatcher

use thiserror::Error;
use warp::http::StatusCode;

use super::router::Verb;

/// Errors that can occur while routing or relaying a dispatcher command
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// No service/operation in the path
    #[error("No valid path provided. Use /tomcat-consumer/start, /jetty-consumer/messages, etc.")]
    MissingPath,

    /// A service but no operation
    #[error("Incomplete path. Expected something like /tomcat-consumer/start")]
    IncompletePath,

    /// Service name outside the routing table
    #[error("Unknown service: {0}. Expected tomcat-consumer, jetty-consumer, tomcat-producer, or jetty-producer.")]
    UnknownService(String),

    /// Operation not offered by the service for this method
    #[error("Unknown {method} operation for {service}: {operation}")]
    UnknownOperation {
        method: String,
        service: String,
        operation: String,
    },

    /// Required request parameter absent
    #[error("Missing '{parameter}' parameter for {service}.")]
    MissingParameter { parameter: String, service: String },

    /// Method other than GET or POST
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    /// The relayed call itself failed
    #[error("Error {} {url}: {message}", .verb.failure_word())]
    Upstream {
        verb: Verb,
        url: String,
        message: String,
    },

    /// The HTTP client could not be built
    #[error("Failed to create HTTP client: {0}")]
    Client(String),
}

impl DispatchError {
    /// HTTP status for errors reported by the dispatcher itself
    pub fn status_code(&self) -> StatusCode {
        match self {
            DispatchError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            // Relay failures are reported in the body of a 200
            DispatchError::Upstream { .. } => StatusCode::OK,
            DispatchError::Client(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_service_message() {
        let err = DispatchError::UnknownService("kafka".to_string());
        assert_eq!(
            err.to_string(),
            "Unknown service: kafka. Expected tomcat-consumer, jetty-consumer, tomcat-producer, or jetty-producer."
        );
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unknown_operation_message() {
        let err = DispatchError::UnknownOperation {
            method: "GET".to_string(),
            service: "tomcat-producer".to_string(),
            operation: "messages".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unknown GET operation for tomcat-producer: messages"
        );
    }

    #[test]
    fn test_upstream_error_is_not_a_client_error() {
        let err = DispatchError::Upstream {
            verb: Verb::Post,
            url: "http://consumer:8080/consumer".to_string(),
            message: "connection refused".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Error calling http://consumer:8080/consumer: connection refused"
        );
        assert_eq!(err.status_code(), StatusCode::OK);
    }

    #[test]
    fn test_failed_get_names_the_verb() {
        let err = DispatchError::Upstream {
            verb: Verb::Get,
            url: "http://consumer-jetty:8080/consumer".to_string(),
            message: "connection refused".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Error GETing http://consumer-jetty:8080/consumer: connection refused"
        );
    }

    #[test]
    fn test_client_error_is_a_server_error() {
        let err = DispatchError::Client("no TLS backend".to_string());
        assert_eq!(err.to_string(), "Failed to create HTTP client: no TLS backend");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
