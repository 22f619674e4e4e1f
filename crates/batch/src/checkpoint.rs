use anyhow::{Context, Result};
use extract::ExtractionResult;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Snapshot writer for the accepted-result set.
#[derive(Debug, Clone)]
pub struct CheckpointStore {
    path: PathBuf,
}

impl CheckpointStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Previously accepted results. A missing file is an empty set; so is a
    /// file that no longer parses, which is logged and then overwritten.
    pub async fn load(&self) -> Result<Vec<ExtractionResult>> {
        if !fs::try_exists(&self.path).await.unwrap_or(false) {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .context(format!("Failed to read checkpoint: {:?}", self.path))?;

        match serde_json::from_str::<Vec<ExtractionResult>>(&content) {
            Ok(results) => {
                tracing::info!(
                    path = %self.path.display(),
                    accepted = results.len(),
                    "Resuming from checkpoint"
                );
                Ok(results)
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Checkpoint unreadable, starting from an empty set"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Overwrite the checkpoint with the whole set via a sibling temp file.
    pub async fn save(&self, results: &[ExtractionResult]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .context(format!("Failed to create directory: {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(results)?;
        let tmp = self.temp_path();
        fs::write(&tmp, json)
            .await
            .context(format!("Failed to write checkpoint: {:?}", tmp))?;
        fs::rename(&tmp, &self.path)
            .await
            .context(format!("Failed to replace checkpoint: {:?}", self.path))?;

        tracing::debug!(
            path = %self.path.display(),
            accepted = results.len(),
            "Checkpoint saved"
        );
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
