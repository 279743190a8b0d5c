// POST /consumer, GET /consumer and GET /consumer/status handlers

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use tracing::info;
use warp::http::StatusCode;

use crate::consumer::ConsumerService;
use crate::models::{action_param, Action, INVALID_ACTION};

pub async fn consumer_action_handler(
    params: HashMap<String, String>,
    service: Arc<ConsumerService>,
) -> Result<impl warp::Reply, Infallible> {
    info!(action = ?params.get("action"), "POST /consumer");

    let (body, status) = match action_param(&params) {
        Some(Action::Start) => match service.start().await {
            Ok(outcome) => (outcome.message().to_string(), StatusCode::OK),
            Err(e) => (e.to_string(), e.status_code()),
        },
        Some(Action::Stop) => (service.stop().await.message().to_string(), StatusCode::OK),
        None => (INVALID_ACTION.to_string(), StatusCode::BAD_REQUEST),
    };

    Ok(warp::reply::with_status(body, status))
}

pub async fn list_messages_handler(
    service: Arc<ConsumerService>,
) -> Result<impl warp::Reply, Infallible> {
    let payloads: Vec<String> = service
        .list_messages()
        .into_iter()
        .map(|message| message.payload)
        .collect();

    Ok(warp::reply::with_status(
        warp::reply::json(&payloads),
        StatusCode::OK,
    ))
}

pub async fn consumer_status_handler(
    service: Arc<ConsumerService>,
) -> Result<impl warp::Reply, Infallible> {
    let status = service.status().await;
    Ok(warp::reply::json(&status))
}
