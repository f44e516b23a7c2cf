//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use super::websocket::PlaybackStatusDto;

/// Diagnostic view of the shared playback state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackStateDto {
    pub status: PlaybackStatusDto,
    pub selected_file: String,
    pub current_position: f64,
    pub user_count: usize,
    /// RFC 3339 time of the last position report, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoListDto {
    pub videos: Vec<String>,
}
