//! InMemory Theater Repository 実装
//!
//! ドメイン層が定義する TheaterRepository trait の具体的な実装。
//! `Theater` ドメインモデルを Mutex で保護して保持します。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, LeaveOutcome, PlaybackCommand, PlaybackSnapshot, PlaybackState,
    RepositoryError, Theater, TheaterRepository, Timestamp,
};

/// インメモリ Theater Repository 実装
pub struct InMemoryTheaterRepository {
    theater: Arc<Mutex<Theater>>,
}

impl InMemoryTheaterRepository {
    pub fn new(theater: Arc<Mutex<Theater>>) -> Self {
        Self { theater }
    }
}

impl Default for InMemoryTheaterRepository {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(Theater::new())))
    }
}

#[async_trait]
impl TheaterRepository for InMemoryTheaterRepository {
    async fn join(&self, id: ConnectionId) -> Result<usize, RepositoryError> {
        let mut theater = self.theater.lock().await;
        theater
            .join(id)
            .map_err(|_| RepositoryError::DuplicateConnection(id.to_string()))
    }

    async fn leave(&self, id: &ConnectionId) -> LeaveOutcome {
        let mut theater = self.theater.lock().await;
        let outcome = theater.leave(id);
        if outcome.reset {
            tracing::info!("Last viewer left, playback state reset");
        }
        outcome
    }

    async fn connection_ids(&self) -> Vec<ConnectionId> {
        let theater = self.theater.lock().await;
        theater.viewer_ids()
    }

    async fn count(&self) -> usize {
        let theater = self.theater.lock().await;
        theater.viewer_count()
    }

    async fn playback(&self) -> PlaybackState {
        let theater = self.theater.lock().await;
        theater.playback().clone()
    }

    async fn apply(&self, command: &PlaybackCommand, now: Timestamp) -> PlaybackState {
        let mut theater = self.theater.lock().await;
        theater.playback_mut().apply(command, now);
        theater.playback().clone()
    }

    async fn snapshot(&self, now: Timestamp) -> PlaybackSnapshot {
        let theater = self.theater.lock().await;
        theater.playback().snapshot(now)
    }
}
