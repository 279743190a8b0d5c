// HTTP Server modules
pub mod cli;
pub mod handlers;
pub mod models;
pub mod routes;

// Broker clients
pub mod broker;

// Services
pub mod consumer;
pub mod dispatcher;
pub mod producer;
