//! UseCase: 視聴者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectViewerUseCase::execute() メソッド
//! - 接続時の userCount ブロードキャストと init / catalog の送信
//!
//! ### どのような状況を想定しているか
//! - 正常系：最初の視聴者、再生途中に参加する視聴者
//! - 異常系：同じ接続の二重登録

use std::sync::Arc;

use sajiki_shared::time::Clock;

use crate::{
    domain::{
        ConnectionId, MessagePusher, PlaybackSnapshot, PusherChannel, TheaterRepository,
        Timestamp, VideoCatalog,
    },
    infrastructure::dto::websocket::{ServerMessage, encode_server_message},
};

use super::{error::ConnectError, sequencer::EventSequencer};

/// Result of a successful join.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinOutcome {
    pub user_count: usize,
    pub snapshot: PlaybackSnapshot,
}

/// 視聴者接続のユースケース
pub struct ConnectViewerUseCase {
    repository: Arc<dyn TheaterRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    catalog: Arc<dyn VideoCatalog>,
    clock: Arc<dyn Clock>,
    sequencer: Arc<EventSequencer>,
}

impl ConnectViewerUseCase {
    pub fn new(
        repository: Arc<dyn TheaterRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        catalog: Arc<dyn VideoCatalog>,
        clock: Arc<dyn Clock>,
        sequencer: Arc<EventSequencer>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            catalog,
            clock,
            sequencer,
        }
    }

    /// 視聴者接続を実行
    ///
    /// 1. 本人に送るメッセージを全てエンコード
    /// 2. 視聴者を登録
    /// 3. 新しい userCount を全員にブロードキャスト（本人を含む）
    /// 4. 本人に init スナップショットと catalog を送信
    ///
    /// Nothing after the join can fail, so an error never leaves the viewer
    /// half registered.
    ///
    /// # Errors
    ///
    /// * `ConnectError::DuplicateConnection` - 同じ接続が既に登録済み
    pub async fn execute(
        &self,
        id: ConnectionId,
        sender: impl Into<PusherChannel>,
    ) -> Result<JoinOutcome, ConnectError> {
        let _guard = self.sequencer.lock().await;

        // 1. エンコード（membership は sequencer の下でしか変わらないので join 後の人数は確定している）
        let user_count = self.repository.count().await + 1;
        let now = Timestamp::new(self.clock.now_millis());
        let snapshot = self.repository.snapshot(now).await;
        let init: ServerMessage = snapshot.clone().into();
        let videos = self.catalog.videos().await;

        let encode = |message: &ServerMessage| {
            encode_server_message(message).map_err(|e| ConnectError::Encode(e.to_string()))
        };
        let count_json = encode(&ServerMessage::UserCount { count: user_count })?;
        let init_json = encode(&init)?;
        let catalog_json = encode(&ServerMessage::Catalog { videos })?;

        // 2. Repository と MessagePusher に登録
        self.repository
            .join(id)
            .await
            .map_err(|_| ConnectError::DuplicateConnection(id.to_string()))?;
        self.message_pusher.register_client(id, sender.into()).await;

        // 3. userCount を全員にブロードキャスト
        let targets = self.repository.connection_ids().await;
        self.message_pusher.broadcast(targets, &count_json).await;

        // 4. init と catalog を本人に送信
        for json in [init_json, catalog_json] {
            if let Err(e) = self.message_pusher.push_to(&id, &json).await {
                tracing::warn!("Failed to send initial state to '{}': {}", id, e);
            }
        }

        Ok(JoinOutcome {
            user_count,
            snapshot,
        })
    }
}
