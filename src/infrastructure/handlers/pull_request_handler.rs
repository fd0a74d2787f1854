use super::{bool_at, str_at, u64_at};
use crate::domain::ports::{DispatchError, EventHandler};
use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

/// Fields of interest in a `pull_request` delivery
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PullRequestSummary {
    pub action: String,
    pub number: u64,
    pub title: String,
    pub repository: String,
    pub merged: bool,
}

/// Change request handler
pub struct PullRequestHandler;

impl PullRequestHandler {
    pub fn summarize(payload: &Value) -> PullRequestSummary {
        PullRequestSummary {
            action: str_at(payload, "/action"),
            number: u64_at(payload, "/number"),
            title: str_at(payload, "/pull_request/title"),
            repository: str_at(payload, "/repository/full_name"),
            merged: bool_at(payload, "/pull_request/merged"),
        }
    }
}

#[async_trait]
impl EventHandler for PullRequestHandler {
    async fn handle(&self, _event: &str, payload: &Value) -> Result<(), DispatchError> {
        let summary = Self::summarize(payload);
        info!(
            action = %summary.action,
            number = summary.number,
            title = %summary.title,
            repository = %summary.repository,
            merged = summary.merged,
            "Pull request event received"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "PullRequestHandler"
    }
}
