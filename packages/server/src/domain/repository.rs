//! Repository trait 定義
//!
//! ユースケースが必要とする Theater へのアクセスを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    ConnectionId, LeaveOutcome, PlaybackCommand, PlaybackSnapshot, PlaybackState,
    RepositoryError, Timestamp,
};

/// Theater Repository trait
///
/// Holds the connection registry and the shared playback record. Every method
/// observes or mutates both under one exclusion, so a join/leave never sees
/// a half-applied command.
#[async_trait]
pub trait TheaterRepository: Send + Sync {
    /// 視聴者を追加し、追加後の人数を返す
    async fn join(&self, id: ConnectionId) -> Result<usize, RepositoryError>;

    /// 視聴者を削除する（最後の一人なら再生状態をリセット）
    async fn leave(&self, id: &ConnectionId) -> LeaveOutcome;

    /// 接続中の全ての ConnectionId を取得（ブロードキャスト用のスナップショット）
    async fn connection_ids(&self) -> Vec<ConnectionId>;

    /// 接続中の視聴者数を取得
    async fn count(&self) -> usize;

    /// 再生状態のコピーを取得
    async fn playback(&self) -> PlaybackState;

    /// コマンドを再生状態に適用し、適用後の状態を返す
    async fn apply(&self, command: &PlaybackCommand, now: Timestamp) -> PlaybackState;

    /// 新規参加者向けのスナップショットを作成
    async fn snapshot(&self, now: Timestamp) -> PlaybackSnapshot;
}
