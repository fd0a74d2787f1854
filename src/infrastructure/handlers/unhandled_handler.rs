use super::str_at;
use crate::domain::ports::{DispatchError, EventHandler};
use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

/// Fallback for event categories without a dedicated handler
pub struct UnhandledHandler;

#[async_trait]
impl EventHandler for UnhandledHandler {
    async fn handle(&self, event: &str, payload: &Value) -> Result<(), DispatchError> {
        let action = str_at(payload, "/action");
        info!(event, action = %action, "Unhandled event");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "UnhandledHandler"
    }
}
