// gameplan-core/src/infrastructure/adapters/snapshot_file.rs

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::domain::taxonomy::ReferenceSnapshot;
use crate::error::GameplanError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::reference::ReferenceSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Yaml,
}

impl SnapshotFormat {
    pub fn from_path(path: &Path) -> Result<Self, InfrastructureError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_lowercase();
        match ext.as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(InfrastructureError::UnsupportedFormat(ext)),
        }
    }
}

/// Master-data export on disk (.json / .yaml / .yml).
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
    format: SnapshotFormat,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, InfrastructureError> {
        let path = path.into();
        let format = SnapshotFormat::from_path(&path)?;
        Ok(Self { path, format })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ReferenceSource for SnapshotFile {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load_snapshot(&self) -> Result<ReferenceSnapshot, GameplanError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let snapshot = match self.format {
            SnapshotFormat::Json => ReferenceSnapshot::from_json(&content)?,
            SnapshotFormat::Yaml => ReferenceSnapshot::from_yaml(&content)?,
        };
        info!(
            categories = snapshot.categories.len(),
            ranges = snapshot.ranges.len(),
            campaigns = snapshot.campaigns.len(),
            "Reference snapshot read"
        );
        Ok(snapshot)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Snapshot already in memory (tests, embedding in another service).
#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshot {
    snapshot: ReferenceSnapshot,
    label: String,
}

impl InMemorySnapshot {
    pub fn new(snapshot: ReferenceSnapshot) -> Self {
        Self {
            snapshot,
            label: "in-memory".to_string(),
        }
    }

    pub fn labelled(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

#[async_trait]
impl ReferenceSource for InMemorySnapshot {
    async fn load_snapshot(&self) -> Result<ReferenceSnapshot, GameplanError> {
        Ok(self.snapshot.clone())
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}
