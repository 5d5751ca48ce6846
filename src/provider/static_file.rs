//! Snapshot served from a JSON file on disk.

use super::error::ProviderError;
use crate::snapshot::SentimentSnapshot;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticFileProvider {
    path: PathBuf,
}

impl StaticFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the file on every call; the file may be rewritten between reads.
    pub async fn snapshot(&self) -> Result<SentimentSnapshot, ProviderError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| ProviderError::Io {
                path: self.path.clone(),
                source,
            })?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
