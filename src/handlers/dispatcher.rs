// GET|POST /dispatcher/{service}/{operation} handler

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use tracing::warn;
use warp::http::{Method, StatusCode};
use warp::path::Tail;

use crate::dispatcher::{DispatchError, Dispatcher, Verb};

pub async fn dispatch_handler(
    method: Method,
    tail: Tail,
    params: HashMap<String, String>,
    dispatcher: Arc<Dispatcher>,
) -> Result<impl warp::Reply, Infallible> {
    let result = match verb(&method) {
        Ok(verb) => dispatcher.dispatch(verb, tail.as_str(), &params).await,
        Err(e) => Err(e),
    };

    let (body, status) = match result {
        Ok(summary) => (summary, StatusCode::OK),
        Err(e) => {
            warn!(method = %method, path = tail.as_str(), error = %e, "Rejected dispatcher command");
            (e.to_string(), e.status_code())
        }
    };

    let reply = warp::reply::with_status(body, status);
    let reply = warp::reply::with_header(
        reply,
        "Access-Control-Allow-Origin",
        dispatcher.config().allowed_origin.clone(),
    );
    Ok(warp::reply::with_header(
        reply,
        "Access-Control-Allow-Credentials",
        "true",
    ))
}

fn verb(method: &Method) -> Result<Verb, DispatchError> {
    match *method {
        Method::GET => Ok(Verb::Get),
        Method::POST => Ok(Verb::Post),
        _ => Err(DispatchError::MethodNotAllowed(method.to_string())),
    }
}
