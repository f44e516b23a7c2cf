//! Directory-backed video catalog.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{CatalogError, VideoCatalog};

/// Lists the regular files of the video directory.
///
/// The list is cached and only re-read on `refresh`; the directory is never
/// watched. Names are sorted so every viewer sees the same order.
pub struct FsVideoCatalog {
    dir: PathBuf,
    cache: RwLock<Vec<String>>,
}

impl FsVideoCatalog {
    /// Create an empty catalog. Call `refresh` to populate it.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cache: RwLock::new(Vec::new()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn read_dir(&self) -> Result<Vec<String>, CatalogError> {
        let to_error = |source| CatalogError::ReadDir {
            dir: self.dir.clone(),
            source,
        };

        let mut entries = tokio::fs::read_dir(&self.dir).await.map_err(to_error)?;
        let mut names = Vec::new();

        while let Some(entry) = entries.next_entry().await.map_err(to_error)? {
            let file_type = entry.file_type().await.map_err(to_error)?;
            if !file_type.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(name) => tracing::warn!("Skipping non UTF-8 file name {:?}", name),
            }
        }

        names.sort();
        Ok(names)
    }
}

#[async_trait]
impl VideoCatalog for FsVideoCatalog {
    async fn videos(&self) -> Vec<String> {
        self.cache.read().await.clone()
    }

    async fn refresh(&self) -> Vec<String> {
        match self.read_dir().await {
            Ok(names) => {
                tracing::debug!("Video catalog refreshed: {} file(s)", names.len());
                let mut cache = self.cache.write().await;
                *cache = names.clone();
                names
            }
            Err(e) => {
                tracing::warn!("{}; keeping previous catalog", e);
                self.videos().await
            }
        }
    }
}
