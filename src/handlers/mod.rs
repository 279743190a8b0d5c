// Handlers module

pub mod consumer;
pub mod cors;
pub mod dispatcher;
pub mod producer;

pub use consumer::{consumer_action_handler, consumer_status_handler, list_messages_handler};
pub use cors::{dispatcher_preflight_handler, service_preflight_handler};
pub use dispatcher::dispatch_handler;
pub use producer::{liveness_handler, send_message_handler};
