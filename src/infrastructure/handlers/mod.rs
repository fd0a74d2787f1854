pub mod ping_handler;
pub mod pull_request_handler;
pub mod push_handler;
pub mod unhandled_handler;

pub use ping_handler::PingHandler;
pub use pull_request_handler::PullRequestHandler;
pub use push_handler::PushHandler;
pub use unhandled_handler::UnhandledHandler;

use std::sync::Arc;

use serde_json::Value;

use crate::inbound::webhook::EventDispatcher;

/// Dispatcher wired with the built-in `ping`, `push` and `pull_request`
/// handlers; everything else is logged as unhandled.
pub fn default_dispatcher() -> EventDispatcher {
    EventDispatcher::new(Arc::new(UnhandledHandler))
        .register("ping", Arc::new(PingHandler))
        .register("push", Arc::new(PushHandler))
        .register("pull_request", Arc::new(PullRequestHandler))
}

// Payload accessors: a missing or mistyped field reads as empty / zero / false.

pub(crate) fn str_at(payload: &Value, pointer: &str) -> String {
    payload
        .pointer(pointer)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

pub(crate) fn u64_at(payload: &Value, pointer: &str) -> u64 {
    payload
        .pointer(pointer)
        .and_then(Value::as_u64)
        .unwrap_or_default()
}

pub(crate) fn bool_at(payload: &Value, pointer: &str) -> bool {
    payload
        .pointer(pointer)
        .and_then(Value::as_bool)
        .unwrap_or_default()
}
