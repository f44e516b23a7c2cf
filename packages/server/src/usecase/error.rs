//! UseCase error types.

use thiserror::Error;

use crate::domain::{DomainError, MessagePushError};

/// 視聴者接続時のエラー
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConnectError {
    #[error("Connection '{0}' is already registered")]
    DuplicateConnection(String),

    #[error("Session is not in the connecting state")]
    AlreadyOpened,

    #[error("Failed to encode message: {0}")]
    Encode(String),
}

/// 再生操作メッセージの適用時のエラー
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaybackCommandError {
    #[error("'{0}' is not a playback control message")]
    NotPlaybackControl(&'static str),

    #[error(transparent)]
    Invalid(DomainError),
}

/// 送信者への直接返信時のエラー
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReplyError {
    #[error(transparent)]
    Push(#[from] MessagePushError),

    #[error("Failed to encode message: {0}")]
    Encode(String),
}
