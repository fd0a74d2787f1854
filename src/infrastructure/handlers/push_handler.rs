use super::str_at;
use crate::domain::ports::{DispatchError, EventHandler};
use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

/// Fields of interest in a `push` delivery
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PushSummary {
    pub repository: String,
    pub git_ref: String,
    pub commits: usize,
    pub pusher: String,
    pub head_commit: String,
}

/// Code push handler
pub struct PushHandler;

impl PushHandler {
    pub fn summarize(payload: &Value) -> PushSummary {
        PushSummary {
            repository: str_at(payload, "/repository/full_name"),
            git_ref: str_at(payload, "/ref"),
            commits: payload
                .get("commits")
                .and_then(Value::as_array)
                .map_or(0, Vec::len),
            pusher: str_at(payload, "/pusher/name"),
            head_commit: str_at(payload, "/head_commit/id"),
        }
    }
}

#[async_trait]
impl EventHandler for PushHandler {
    async fn handle(&self, _event: &str, payload: &Value) -> Result<(), DispatchError> {
        let summary = Self::summarize(payload);
        info!(
            repository = %summary.repository,
            git_ref = %summary.git_ref,
            commits = summary.commits,
            pusher = %summary.pusher,
            head_commit = %summary.head_commit,
            "Push received"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "PushHandler"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summarize_push() {
        let payload = json!({
            "ref": "refs/heads/main",
            "repository": {"full_name": "octo-org/octo-repo"},
            "pusher": {"name": "octocat", "email": null},
            "commits": [{"id": "a1"}, {"id": "b2"}],
            "head_commit": {"id": "b2"}
        });

        let summary = PushHandler::summarize(&payload);
        assert_eq!(summary.repository, "octo-org/octo-repo");
        assert_eq!(summary.git_ref, "refs/heads/main");
        assert_eq!(summary.commits, 2);
        assert_eq!(summary.pusher, "octocat");
        assert_eq!(summary.head_commit, "b2");
    }

    #[test]
    fn test_branch_deletion_has_null_head_commit() {
        let payload = json!({
            "ref": "refs/heads/feature",
            "deleted": true,
            "commits": [],
            "head_commit": null
        });

        let summary = PushHandler::summarize(&payload);
        assert_eq!(summary.commits, 0);
        assert_eq!(summary.head_commit, "");
        assert_eq!(summary.repository, "");
    }

    #[tokio::test]
    async fn test_push_handler_accepts_non_object() {
        assert!(PushHandler.handle("push", &json!([1, 2, 3])).await.is_ok());
    }
}
