use crate::StoreError;
use core_types::{BotRef, Trade};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::PathBuf;

/// The on-disk document: every known trade plus the bot registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub trades: Vec<Trade>,
    #[serde(default)]
    pub bots: Vec<BotRef>,
}

impl Snapshot {
    /// Parses a snapshot document. Any malformed record fails the whole document.
    pub fn from_json(raw: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// The `SnapshotRepository` provides the application-specific interface to the
/// snapshot file. It is cheap to clone and holds no open handles.
#[derive(Debug, Clone)]
pub struct SnapshotRepository {
    path: PathBuf,
}

impl SnapshotRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads and parses the whole snapshot.
    pub async fn load_snapshot(&self) -> Result<Snapshot, StoreError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => StoreError::NotFound(self.path.clone()),
                _ => StoreError::Io {
                    path: self.path.clone(),
                    source: e,
                },
            })?;

        let snapshot = Snapshot::from_json(&raw)?;
        tracing::debug!(
            path = %self.path.display(),
            trades = snapshot.trades.len(),
            bots = snapshot.bots.len(),
            "Snapshot loaded."
        );
        Ok(snapshot)
    }
}
