use crate::domain::delivery::DeliveryRecord;
use crate::domain::ports::{PersistenceError, PersistenceSink};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use time::macros::format_description;
use tracing::debug;

/// Writes every delivery to its own pretty-printed JSON file
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `delivery-<YYYYmmdd-HHMMSS-ffffff>-<8 hex>.json`, stamped from `received_at`
    pub fn file_name(record: &DeliveryRecord) -> Result<String, PersistenceError> {
        let stamp = record.received_at.format(format_description!(
            "[year][month][day]-[hour][minute][second]-[subsecond digits:6]"
        ))?;
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        Ok(format!("delivery-{stamp}-{}.json", &suffix[..8]))
    }
}

#[async_trait]
impl PersistenceSink for FileSink {
    async fn persist(&self, record: &DeliveryRecord) -> Result<PathBuf, PersistenceError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.dir.join(Self::file_name(record)?);
        let contents = serde_json::to_vec_pretty(record)?;
        tokio::fs::write(&path, contents).await?;

        debug!(path = %path.display(), "Wrote delivery to disk");
        Ok(path)
    }
}
