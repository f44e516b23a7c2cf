//! UseCase: 再生状態の取得（診断用）

use std::sync::Arc;

use sajiki_shared::time::Clock;

use crate::domain::{PlaybackSnapshot, TheaterRepository, Timestamp};

/// Current playback state plus registry size.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackOverview {
    pub snapshot: PlaybackSnapshot,
    pub user_count: usize,
    /// When the reference position was last recorded
    pub updated_at: Option<Timestamp>,
}

/// 再生状態取得のユースケース
pub struct GetPlaybackStateUseCase {
    repository: Arc<dyn TheaterRepository>,
    clock: Arc<dyn Clock>,
}

impl GetPlaybackStateUseCase {
    pub fn new(repository: Arc<dyn TheaterRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn execute(&self) -> PlaybackOverview {
        let now = Timestamp::new(self.clock.now_millis());
        let playback = self.repository.playback().await;
        let user_count = self.repository.count().await;

        PlaybackOverview {
            snapshot: playback.snapshot(now),
            user_count,
            updated_at: playback.reference().map(|r| r.timestamp),
        }
    }
}
