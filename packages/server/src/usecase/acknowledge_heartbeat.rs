//! UseCase: heartbeat への応答

use std::sync::Arc;

use crate::{
    domain::{ConnectionId, MessagePusher},
    infrastructure::dto::websocket::{ServerMessage, encode_server_message},
};

use super::error::ReplyError;

/// heartbeat 応答のユースケース
///
/// The ack goes to the sender only; nothing is broadcast.
pub struct AcknowledgeHeartbeatUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl AcknowledgeHeartbeatUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    pub async fn execute(&self, sender: &ConnectionId) -> Result<(), ReplyError> {
        let json = encode_server_message(&ServerMessage::HeartbeatAck)
            .map_err(|e| ReplyError::Encode(e.to_string()))?;
        self.message_pusher.push_to(sender, &json).await?;
        Ok(())
    }
}
