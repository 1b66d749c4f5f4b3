use crate::domain::ports::Sink;
use crate::utils::error::{Result, SyncError};
use std::fs;
use std::path::PathBuf;

/// Writes artifacts as files under one directory.
#[derive(Debug, Clone)]
pub struct LocalSink {
    base_path: PathBuf,
}

impl LocalSink {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Sink for LocalSink {
    async fn write_artifact(&self, name: &str, data: &[u8]) -> Result<String> {
        let full_path = self.base_path.join(name);
        let shown = full_path.display().to_string();
        let write_error = |source| SyncError::WriteError {
            path: shown.clone(),
            source,
        };

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(write_error)?;
        }

        fs::write(&full_path, data).map_err(write_error)?;
        tracing::debug!("Wrote {} bytes to {}", data.len(), shown);
        Ok(shown)
    }
}
