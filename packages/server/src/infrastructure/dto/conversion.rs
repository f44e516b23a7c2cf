//! Conversion logic between DTOs and domain entities.

use crate::domain::{
    DomainError, PlaybackCommand, PlaybackPosition, PlaybackSnapshot, PlaybackStatus,
};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// DTO → Domain
// ========================================

impl TryFrom<&dto::ClientMessage> for PlaybackCommand {
    type Error = CommandConversionError;

    fn try_from(message: &dto::ClientMessage) -> Result<Self, Self::Error> {
        let optional = |time: Option<f64>| time.map(PlaybackPosition::new).transpose();

        let command = match message {
            dto::ClientMessage::Select { file_name } => PlaybackCommand::Select {
                file_name: file_name.clone(),
            },
            dto::ClientMessage::Play { current_time } => PlaybackCommand::Play {
                position: optional(*current_time)?,
            },
            dto::ClientMessage::Pause { current_time } => PlaybackCommand::Pause {
                position: optional(*current_time)?,
            },
            dto::ClientMessage::Seek { current_time } => PlaybackCommand::Seek {
                position: PlaybackPosition::new(*current_time)?,
            },
            dto::ClientMessage::Heartbeat | dto::ClientMessage::RefreshCatalog => {
                return Err(CommandConversionError::NotPlaybackControl(
                    message.type_name(),
                ));
            }
        };

        Ok(command)
    }
}

/// Why a viewer message could not become a `PlaybackCommand`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CommandConversionError {
    #[error("'{0}' is not a playback control message")]
    NotPlaybackControl(&'static str),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

// ========================================
// Domain → DTO
// ========================================

impl From<PlaybackStatus> for dto::PlaybackStatusDto {
    fn from(status: PlaybackStatus) -> Self {
        match status {
            PlaybackStatus::Playing => Self::Playing,
            PlaybackStatus::Paused => Self::Paused,
        }
    }
}

impl From<PlaybackSnapshot> for dto::ServerMessage {
    fn from(snapshot: PlaybackSnapshot) -> Self {
        Self::Init {
            status: snapshot.status.into(),
            selected_file: snapshot.selected_file,
            current_position: snapshot.current_position,
        }
    }
}
