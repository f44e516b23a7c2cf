//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの送信キュー（`PusherChannel`）を管理
//! - 視聴者へのメッセージ送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! キューは有界で、送信は `try_send` のみを使います。キューが満杯の接続は
//! 追い出され（`PusherChannel` を破棄）、eviction signal を受けた接続ハンドラが
//! 通常の切断処理を走らせます。ブロードキャストが遅い視聴者を待つことはありません。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc::error::TrySendError};

use crate::domain::{BroadcastReport, ConnectionId, MessagePushError, MessagePusher, PusherChannel};

/// WebSocket を使った MessagePusher 実装
pub struct WebSocketMessagePusher {
    /// 接続中の視聴者の送信キュー
    clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    pub fn new(clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>) -> Self {
        Self { clients }
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(HashMap::new())))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(id, sender);
        tracing::debug!("Connection '{}' registered to MessagePusher", id);
    }

    async fn unregister_client(&self, id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        if clients.remove(id).is_some() {
            tracing::debug!("Connection '{}' unregistered from MessagePusher", id);
        }
    }

    async fn push_to(&self, id: &ConnectionId, content: &str) -> Result<(), MessagePushError> {
        let mut clients = self.clients.lock().await;

        let Some(sender) = clients.get(id) else {
            return Err(MessagePushError::ConnectionNotFound(id.to_string()));
        };

        match sender.try_send(content.to_string()) {
            Ok(()) => {
                tracing::debug!("Pushed message to connection '{}'", id);
                Ok(())
            }
            Err(TrySendError::Full(_)) => {
                clients.remove(id);
                tracing::warn!("Connection '{}' cannot keep up, evicting", id);
                Err(MessagePushError::BufferFull(id.to_string()))
            }
            Err(TrySendError::Closed(_)) => Err(MessagePushError::ChannelClosed(id.to_string())),
        }
    }

    async fn broadcast(&self, targets: Vec<ConnectionId>, content: &str) -> BroadcastReport {
        let mut clients = self.clients.lock().await;
        let mut report = BroadcastReport::default();

        for target in targets {
            let Some(sender) = clients.get(&target) else {
                tracing::warn!("Connection '{}' not found during broadcast, skipping", target);
                report.skipped.push(target);
                continue;
            };

            // ブロードキャストでは一部の送信失敗を許容
            match sender.try_send(content.to_string()) {
                Ok(()) => {
                    tracing::debug!("Broadcasted message to connection '{}'", target);
                    report.delivered += 1;
                }
                Err(TrySendError::Full(_)) => {
                    clients.remove(&target);
                    tracing::warn!(
                        "Connection '{}' send buffer is full, evicting from broadcast",
                        target
                    );
                    report.evicted.push(target);
                }
                Err(TrySendError::Closed(_)) => {
                    tracing::warn!("Connection '{}' is closed, skipping", target);
                    report.skipped.push(target);
                }
            }
        }

        report
    }
}
