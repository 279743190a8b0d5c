// Route definitions for the three services

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use warp::Filter;

use crate::consumer::ConsumerService;
use crate::dispatcher::Dispatcher;
use crate::handlers;
use crate::producer::ProducerService;

/// Largest form body accepted
const MAX_FORM_BYTES: u64 = 64 * 1024;

pub fn consumer_routes(
    service: Arc<ConsumerService>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let consumer = warp::path("consumer");

    // POST /consumer?action={start|stop}
    let action = consumer
        .and(warp::path::end())
        .and(warp::post())
        .and(request_params())
        .and(with_state(service.clone()))
        .and_then(handlers::consumer_action_handler);

    // GET /consumer
    let list = consumer
        .and(warp::path::end())
        .and(warp::get())
        .and(with_state(service.clone()))
        .and_then(handlers::list_messages_handler);

    // GET /consumer/status
    let status = consumer
        .and(warp::path("status"))
        .and(warp::path::end())
        .and(warp::get())
        .and(with_state(service))
        .and_then(handlers::consumer_status_handler);

    // OPTIONS /consumer
    let preflight = consumer
        .and(warp::path::end())
        .and(warp::options())
        .and_then(handlers::service_preflight_handler);

    action.or(list).or(status).or(preflight)
}

pub fn producer_routes(
    service: Arc<ProducerService>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let producer = warp::path("producer").and(warp::path::end());

    // POST /producer with msg=...
    let send = producer
        .and(warp::post())
        .and(request_params())
        .and(with_state(service))
        .and_then(handlers::send_message_handler);

    // GET /producer
    let liveness = producer
        .and(warp::get())
        .and_then(handlers::liveness_handler);

    // OPTIONS /producer
    let preflight = producer
        .and(warp::options())
        .and_then(handlers::service_preflight_handler);

    send.or(liveness).or(preflight)
}

pub fn dispatcher_routes(
    dispatcher: Arc<Dispatcher>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let dispatcher_path = warp::path("dispatcher");

    // OPTIONS /dispatcher/...
    let preflight = dispatcher_path
        .and(warp::options())
        .and_then(handlers::dispatcher_preflight_handler);

    // GET|POST /dispatcher/{service}/{operation}
    let dispatch = dispatcher_path
        .and(warp::method())
        .and(warp::path::tail())
        .and(request_params())
        .and(with_state(dispatcher))
        .and_then(handlers::dispatch_handler);

    preflight.or(dispatch)
}

/// Query string parameters merged with form body fields
///
/// Query parameters win when a name appears in both. A missing or non-form
/// body contributes nothing.
pub fn request_params(
) -> impl Filter<Extract = (HashMap<String, String>,), Error = warp::Rejection> + Clone {
    warp::query::<HashMap<String, String>>()
        .and(form_body())
        .map(
            |mut params: HashMap<String, String>, form: HashMap<String, String>| {
                for (name, value) in form {
                    params.entry(name).or_insert(value);
                }
                params
            },
        )
}

fn form_body() -> impl Filter<Extract = (HashMap<String, String>,), Error = Infallible> + Clone {
    warp::body::content_length_limit(MAX_FORM_BYTES)
        .and(warp::body::form::<HashMap<String, String>>())
        .or(warp::any().map(HashMap::new))
        .unify()
}

fn with_state<T: Send + Sync + 'static>(
    state: Arc<T>,
) -> impl Filter<Extract = (Arc<T>,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}
