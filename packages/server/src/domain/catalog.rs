//! Video catalog interface.

use async_trait::async_trait;

/// Filenames available for selection.
///
/// The catalog is a cache: `videos` returns what was last read, `refresh`
/// re-reads the source. A failed refresh keeps the previous list.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoCatalog: Send + Sync {
    /// Cached list, in display order
    async fn videos(&self) -> Vec<String>;

    /// Re-read the source and return the new list
    async fn refresh(&self) -> Vec<String>;
}
