// src/store.rs
// File-backed state: the latest snapshot plus a bounded history, both JSON.
// Writes go through a temp file and rename so an interrupted cycle cannot
// leave a half-written state file behind.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;
use tracing::warn;

use crate::model::{History, Snapshot};

#[derive(Debug, Clone)]
pub struct SnapshotStore {
    data_path: PathBuf,
    history_path: PathBuf,
}

impl SnapshotStore {
    pub fn new(data_path: impl Into<PathBuf>, history_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            history_path: history_path.into(),
        }
    }

    /// Load the previously persisted snapshot. A missing file is a normal
    /// first run, not an error; a corrupt file is logged and treated the
    /// same so one bad write cannot wedge the monitor.
    pub async fn load_current(&self) -> Option<Snapshot> {
        match fs::read_to_string(&self.data_path).await {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(snapshot) => Some(snapshot),
                Err(e) => {
                    warn!(path = %self.data_path.display(), error = %e, "snapshot file unreadable");
                    None
                }
            },
            Err(_) => None,
        }
    }

    /// Persist `snapshot` as current and append it to the history file.
    pub async fn save(&self, snapshot: &Snapshot) -> Result<()> {
        write_atomic(&self.data_path, &serde_json::to_vec_pretty(snapshot)?)
            .await
            .with_context(|| format!("write snapshot to {}", self.data_path.display()))?;

        let mut history = self.load_history().await;
        history.push(snapshot.clone());
        write_atomic(&self.history_path, &serde_json::to_vec_pretty(&history)?)
            .await
            .with_context(|| format!("write history to {}", self.history_path.display()))?;
        Ok(())
    }

    pub async fn load_history(&self) -> History {
        match fs::read_to_string(&self.history_path).await {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(history) => history,
                Err(e) => {
                    warn!(path = %self.history_path.display(), error = %e, "history file unreadable, starting fresh");
                    History::default()
                }
            },
            Err(_) => History::default(),
        }
    }
}

async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, bytes).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}
