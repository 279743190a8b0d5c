// OPTIONS preflight handlers

use std::convert::Infallible;

/// Preflight for the consumer and producer endpoints
pub async fn service_preflight_handler() -> Result<impl warp::Reply, Infallible> {
    let reply = warp::reply::with_header(warp::reply(), "Access-Control-Allow-Origin", "*");
    let reply = warp::reply::with_header(
        reply,
        "Access-Control-Allow-Methods",
        "GET, POST, OPTIONS",
    );
    Ok(warp::reply::with_header(
        reply,
        "Access-Control-Allow-Headers",
        "Content-Type",
    ))
}

/// Preflight for the dispatcher, which also allows credentials
pub async fn dispatcher_preflight_handler() -> Result<impl warp::Reply, Infallible> {
    let reply = warp::reply::with_header(warp::reply(), "Access-Control-Allow-Origin", "*");
    let reply = warp::reply::with_header(
        reply,
        "Access-Control-Allow-Methods",
        "GET, POST, PUT, OPTIONS",
    );
    let reply = warp::reply::with_header(
        reply,
        "Access-Control-Allow-Headers",
        "Content-Type, Authorization",
    );
    Ok(warp::reply::with_header(
        reply,
        "Access-Control-Allow-Credentials",
        "true",
    ))
}
