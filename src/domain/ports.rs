/*
   This module specifies the API by which the webhook pipeline hands accepted
   deliveries to pluggable side effects.
*/

use crate::domain::delivery::DeliveryRecord;
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;

/// Error raised by an event handler
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Failed to handle event: {0}")]
    Handler(String),
}

/// Error raised while writing a delivery to durable storage
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to format file name: {0}")]
    FileName(#[from] time::error::Format),
}

/// Business logic for one category of webhook event
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, event: &str, payload: &Value) -> Result<(), DispatchError>;
    fn name(&self) -> &'static str {
        "UnnamedHandler"
    }
}

/// Best-effort durable storage for accepted deliveries
#[async_trait]
pub trait PersistenceSink: Send + Sync {
    /// Store the record, returning where it was written
    async fn persist(&self, record: &DeliveryRecord) -> Result<PathBuf, PersistenceError>;
}
