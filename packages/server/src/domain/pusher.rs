//! メッセージ送信（通知）の抽象化
//!
//! ユースケースはこの trait を通じて視聴者にメッセージを届けます。
//! 具体的な実装（WebSocket）は Infrastructure 層にあります。

use async_trait::async_trait;
use tokio::sync::{
    mpsc::{self, error::TrySendError},
    oneshot,
};

use super::{ConnectionId, MessagePushError};

/// Outbound side of one connection, as held by the pusher.
///
/// The queue is bounded so a slow viewer cannot grow memory. Dropping the
/// channel closes the queue and fires the eviction signal handed out by
/// `with_eviction_signal`, so the connection can be torn down even while its
/// writer is stuck on a peer that stopped reading.
#[derive(Debug)]
pub struct PusherChannel {
    queue: mpsc::Sender<String>,
    _eviction: Option<oneshot::Sender<()>>,
}

/// Resolves (with `Err`) once the pusher drops the matching `PusherChannel`.
pub type EvictionSignal = oneshot::Receiver<()>;

impl PusherChannel {
    pub fn with_eviction_signal(queue: mpsc::Sender<String>) -> (Self, EvictionSignal) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                queue,
                _eviction: Some(tx),
            },
            rx,
        )
    }

    pub fn try_send(&self, content: String) -> Result<(), TrySendError<String>> {
        self.queue.try_send(content)
    }
}

impl From<mpsc::Sender<String>> for PusherChannel {
    fn from(queue: mpsc::Sender<String>) -> Self {
        Self {
            queue,
            _eviction: None,
        }
    }
}

/// Delivery summary of one broadcast.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Connections the message was queued for
    pub delivered: usize,
    /// Connections that were skipped (unknown or already closed)
    pub skipped: Vec<ConnectionId>,
    /// Connections dropped because their send buffer was full
    pub evicted: Vec<ConnectionId>,
}

/// MessagePusher trait
///
/// `broadcast` is best-effort per recipient and never fails as a whole.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続の送信チャンネルを登録
    async fn register_client(&self, id: ConnectionId, sender: PusherChannel);

    /// 接続の送信チャンネルを削除
    async fn unregister_client(&self, id: &ConnectionId);

    /// 特定の接続にメッセージを送信
    async fn push_to(&self, id: &ConnectionId, content: &str) -> Result<(), MessagePushError>;

    /// 複数の接続に同じメッセージを送信
    async fn broadcast(&self, targets: Vec<ConnectionId>, content: &str) -> BroadcastReport;
}
