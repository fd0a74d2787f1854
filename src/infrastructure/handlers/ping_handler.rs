use super::{str_at, u64_at};
use crate::domain::ports::{DispatchError, EventHandler};
use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

/// Fields of interest in a `ping` delivery, sent when a hook is created
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PingSummary {
    pub zen: String,
    pub hook_id: u64,
}

/// Connectivity check handler
pub struct PingHandler;

impl PingHandler {
    pub fn summarize(payload: &Value) -> PingSummary {
        PingSummary {
            zen: str_at(payload, "/zen"),
            hook_id: u64_at(payload, "/hook_id"),
        }
    }
}

#[async_trait]
impl EventHandler for PingHandler {
    async fn handle(&self, _event: &str, payload: &Value) -> Result<(), DispatchError> {
        let summary = Self::summarize(payload);
        info!(
            hook_id = summary.hook_id,
            zen = %summary.zen,
            "Ping received"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "PingHandler"
    }
}
