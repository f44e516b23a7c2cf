//! UseCase: キャッシュ済みカタログの取得

use std::sync::Arc;

use crate::domain::VideoCatalog;

pub struct GetVideosUseCase {
    catalog: Arc<dyn VideoCatalog>,
}

impl GetVideosUseCase {
    pub fn new(catalog: Arc<dyn VideoCatalog>) -> Self {
        Self { catalog }
    }

    /// Cached list; the directory is not re-read.
    pub async fn execute(&self) -> Vec<String> {
        self.catalog.videos().await
    }
}
