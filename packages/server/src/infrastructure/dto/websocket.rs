//! WebSocket message DTOs and codec.
//!
//! Every message is a JSON object discriminated by its `type` field.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Messages sent by viewers.
///
/// Playback controls (`play`, `pause`, `select`, `seek`) are relayed to every
/// viewer exactly as decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    Heartbeat,
    RefreshCatalog,
    Play {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        current_time: Option<f64>,
    },
    Pause {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        current_time: Option<f64>,
    },
    Select {
        file_name: String,
    },
    Seek {
        current_time: f64,
    },
}

impl ClientMessage {
    /// Wire tags this server understands.
    pub const TYPES: [&'static str; 6] = [
        "heartbeat",
        "refreshCatalog",
        "play",
        "pause",
        "select",
        "seek",
    ];

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Heartbeat => "heartbeat",
            Self::RefreshCatalog => "refreshCatalog",
            Self::Play { .. } => "play",
            Self::Pause { .. } => "pause",
            Self::Select { .. } => "select",
            Self::Seek { .. } => "seek",
        }
    }

    /// `true` for messages that mutate playback and get rebroadcast.
    pub fn is_playback_control(&self) -> bool {
        matches!(
            self,
            Self::Play { .. } | Self::Pause { .. } | Self::Select { .. } | Self::Seek { .. }
        )
    }
}

/// Play/pause status on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlaybackStatusDto {
    Playing,
    Paused,
}

/// Messages produced by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    /// Catch-up snapshot for a newly joined viewer
    Init {
        status: PlaybackStatusDto,
        selected_file: String,
        current_position: f64,
    },
    Catalog {
        videos: Vec<String>,
    },
    UserCount {
        count: usize,
    },
    HeartbeatAck,
}

/// Reasons an inbound frame could not be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Malformed message: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Message has no string 'type' field")]
    MissingType,

    #[error("Unknown message type '{0}'")]
    UnknownType(String),
}

/// Decode a viewer frame.
///
/// Unknown `type` tags are reported separately from malformed payloads so the
/// caller can log them differently.
pub fn decode_client_message(text: &str) -> Result<ClientMessage, DecodeError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let tag = value
        .get("type")
        .and_then(serde_json::Value::as_str)
        .ok_or(DecodeError::MissingType)?;

    if !ClientMessage::TYPES.contains(&tag) {
        return Err(DecodeError::UnknownType(tag.to_string()));
    }

    Ok(serde_json::from_value(value)?)
}

pub fn encode_client_message(message: &ClientMessage) -> Result<String, serde_json::Error> {
    serde_json::to_string(message)
}

pub fn encode_server_message(message: &ServerMessage) -> Result<String, serde_json::Error> {
    serde_json::to_string(message)
}

/// Decode a server frame. Used by clients and tests.
pub fn decode_server_message(text: &str) -> Result<ServerMessage, serde_json::Error> {
    serde_json::from_str(text)
}
