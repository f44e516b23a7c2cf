//! UseCase: カタログ再読み込み（送信者のみに返信）

use std::sync::Arc;

use crate::{
    domain::{ConnectionId, MessagePusher, VideoCatalog},
    infrastructure::dto::websocket::{ServerMessage, encode_server_message},
};

use super::error::ReplyError;

/// カタログ再読み込みのユースケース
pub struct RefreshCatalogUseCase {
    catalog: Arc<dyn VideoCatalog>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl RefreshCatalogUseCase {
    pub fn new(catalog: Arc<dyn VideoCatalog>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            catalog,
            message_pusher,
        }
    }

    /// Re-read the catalog and reply to the requester only.
    ///
    /// Returns the list that was sent.
    pub async fn execute(&self, requester: &ConnectionId) -> Result<Vec<String>, ReplyError> {
        let videos = self.catalog.refresh().await;
        let json = encode_server_message(&ServerMessage::Catalog {
            videos: videos.clone(),
        })
        .map_err(|e| ReplyError::Encode(e.to_string()))?;

        self.message_pusher.push_to(requester, &json).await?;
        Ok(videos)
    }
}
