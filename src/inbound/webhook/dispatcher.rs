use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error};

use crate::domain::ports::EventHandler;

/// Routes a parsed payload to the handler registered for its event name.
///
/// Matching is exact. Anything without a registered handler goes to the
/// fallback handler.
pub struct EventDispatcher {
    handlers: HashMap<String, Arc<dyn EventHandler>>,
    fallback: Arc<dyn EventHandler>,
}

impl EventDispatcher {
    /// Empty registry; every event goes to `fallback`
    pub fn new(fallback: Arc<dyn EventHandler>) -> Self {
        Self {
            handlers: HashMap::new(),
            fallback,
        }
    }

    /// Register a handler for an exact event name, replacing any previous one
    pub fn register(mut self, event: impl Into<String>, handler: Arc<dyn EventHandler>) -> Self {
        self.handlers.insert(event.into(), handler);
        self
    }

    /// Handler that `dispatch` would invoke for `event`
    pub fn handler_for(&self, event: &str) -> &Arc<dyn EventHandler> {
        self.handlers.get(event).unwrap_or(&self.fallback)
    }

    /// Run the matching handler. Failures are logged and go no further.
    pub async fn dispatch(&self, event: &str, payload: &Value) {
        let handler = self.handler_for(event);
        debug!(event, handler = handler.name(), "Dispatching delivery");

        if let Err(e) = handler.handle(event, payload).await {
            error!(event, handler = handler.name(), error = %e, "Handler failed");
        }
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut events: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        events.sort_unstable();
        f.debug_struct("EventDispatcher")
            .field("events", &events)
            .field("fallback", &self.fallback.name())
            .finish()
    }
}
