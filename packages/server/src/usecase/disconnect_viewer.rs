//! UseCase: 視聴者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectViewerUseCase::execute() メソッド
//! - 残りの視聴者への userCount ブロードキャスト
//! - 最後の視聴者の退出による再生状態のリセット

use std::sync::Arc;

use crate::{
    domain::{ConnectionId, LeaveOutcome, MessagePusher, TheaterRepository},
    infrastructure::dto::websocket::{ServerMessage, encode_server_message},
};

use super::sequencer::EventSequencer;

/// 視聴者切断のユースケース
pub struct DisconnectViewerUseCase {
    repository: Arc<dyn TheaterRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: Arc<EventSequencer>,
}

impl DisconnectViewerUseCase {
    pub fn new(
        repository: Arc<dyn TheaterRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        sequencer: Arc<EventSequencer>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            sequencer,
        }
    }

    /// 視聴者切断を実行
    ///
    /// Safe to call more than once for the same connection; only the first
    /// call broadcasts a new userCount.
    pub async fn execute(&self, id: ConnectionId) -> LeaveOutcome {
        let _guard = self.sequencer.lock().await;

        self.message_pusher.unregister_client(&id).await;
        let outcome = self.repository.leave(&id).await;
        if !outcome.removed {
            return outcome;
        }

        tracing::info!(
            "Connection '{}' left, {} viewer(s) remaining",
            id,
            outcome.remaining
        );

        match encode_server_message(&ServerMessage::UserCount {
            count: outcome.remaining,
        }) {
            Ok(json) => {
                let targets = self.repository.connection_ids().await;
                self.message_pusher.broadcast(targets, &json).await;
            }
            Err(e) => tracing::warn!("Failed to encode userCount: {}", e),
        }

        outcome
    }
}
