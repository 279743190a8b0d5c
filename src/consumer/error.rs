use thiserror::Error;
use warp::http::StatusCode;

/// Errors returned by the consumer service
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConsumerError {
    /// The service was shut down and can no longer poll
    #[error("Consumer service is shut down.")]
    Closed,
}

impl ConsumerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ConsumerError::Closed => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}
