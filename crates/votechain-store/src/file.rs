//! File-backed implementation of the ChainStore trait.
//!
//! This is the primary backend: one JSON document on disk, replaced whole
//! on every save. Writes go through a sibling temp file and a rename so a
//! crashed save never leaves a half-written document behind.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::error::Result;
use crate::traits::ChainStore;

/// File-backed store implementation.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store persisting to the given path.
    ///
    /// The file is created on first save; parent directories must exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The document path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl ChainStore for FileStore {
    async fn load(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, document: &[u8]) -> Result<()> {
        let temp = self.temp_path();
        fs::write(&temp, document).await?;
        fs::rename(&temp, &self.path).await?;
        debug!(path = %self.path.display(), bytes = document.len(), "chain document saved");
        Ok(())
    }
}
