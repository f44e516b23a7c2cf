//! Server state shared by handlers.

use std::sync::Arc;

use crate::usecase::{GetPlaybackStateUseCase, GetVideosUseCase, SessionUseCases};

/// Shared application state
pub struct AppState {
    /// 視聴セッションが使うユースケース群
    pub session_usecases: Arc<SessionUseCases>,
    /// 再生状態取得のユースケース（診断用）
    pub get_playback_state_usecase: Arc<GetPlaybackStateUseCase>,
    /// カタログ取得のユースケース
    pub get_videos_usecase: Arc<GetVideosUseCase>,
    /// 接続ごとの送信キュー容量
    pub send_buffer: usize,
}
