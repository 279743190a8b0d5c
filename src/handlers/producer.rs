// POST /producer and GET /producer handlers

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use warp::http::StatusCode;

use crate::models::{message_param, sent_reply, MISSING_MSG, PRODUCER_LIVENESS};
use crate::producer::ProducerService;

pub async fn send_message_handler(
    params: HashMap<String, String>,
    service: Arc<ProducerService>,
) -> Result<impl warp::Reply, Infallible> {
    let (body, status) = match message_param(&params) {
        Some(message) => match service.send(message).await {
            Ok(_) => (sent_reply(message), StatusCode::OK),
            Err(e) => (
                format!("Failed to send message to Kafka: {}", e),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        },
        None => (MISSING_MSG.to_string(), StatusCode::BAD_REQUEST),
    };

    Ok(warp::reply::with_status(body, status))
}

pub async fn liveness_handler() -> Result<impl warp::Reply, Infallible> {
    Ok(warp::reply::with_status(PRODUCER_LIVENESS, StatusCode::OK))
}
