//! UseCase: 再生操作（select / play / pause / seek）の適用と中継
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ControlPlaybackUseCase::execute() メソッド
//! - 再生状態への反映と、送信者を含む全員への中継
//!
//! ### どのような状況を想定しているか
//! - 正常系：seek / play / select の中継
//! - 異常系：不正な再生位置、再生操作ではないメッセージ

use std::sync::Arc;

use sajiki_shared::time::Clock;

use crate::{
    domain::{BroadcastReport, MessagePusher, PlaybackCommand, TheaterRepository, Timestamp},
    infrastructure::dto::{
        conversion::CommandConversionError,
        websocket::ClientMessage,
    },
};

use super::{error::PlaybackCommandError, sequencer::EventSequencer};

/// 再生操作のユースケース
pub struct ControlPlaybackUseCase {
    repository: Arc<dyn TheaterRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
    sequencer: Arc<EventSequencer>,
}

impl ControlPlaybackUseCase {
    pub fn new(
        repository: Arc<dyn TheaterRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
        sequencer: Arc<EventSequencer>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
            sequencer,
        }
    }

    /// 再生操作を適用し、受信したフレーム `frame` をそのまま全員に中継する
    ///
    /// `message` is the decoded form of `frame`. Fields this server does not
    /// know about are relayed untouched. The sender is included in the
    /// broadcast and receives its own action back.
    ///
    /// # Errors
    ///
    /// Nothing is mutated or broadcast when an error is returned.
    pub async fn execute(
        &self,
        message: &ClientMessage,
        frame: &str,
    ) -> Result<BroadcastReport, PlaybackCommandError> {
        let command = PlaybackCommand::try_from(message).map_err(|e| match e {
            CommandConversionError::NotPlaybackControl(name) => {
                PlaybackCommandError::NotPlaybackControl(name)
            }
            CommandConversionError::Domain(e) => PlaybackCommandError::Invalid(e),
        })?;

        let _guard = self.sequencer.lock().await;

        let now = Timestamp::new(self.clock.now_millis());
        self.repository.apply(&command, now).await;

        let targets = self.repository.connection_ids().await;
        let report = self.message_pusher.broadcast(targets, frame).await;
        tracing::debug!(
            "Relayed '{}' to {} viewer(s)",
            message.type_name(),
            report.delivered
        );

        Ok(report)
    }
}
