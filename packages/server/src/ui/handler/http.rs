//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};
use sajiki_shared::time::timestamp_to_rfc3339;

use crate::{
    infrastructure::dto::http::{PlaybackStateDto, VideoListDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Current playback state, extrapolated to now
pub async fn get_playback_state(State(state): State<Arc<AppState>>) -> Json<PlaybackStateDto> {
    let overview = state.get_playback_state_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(PlaybackStateDto {
        status: overview.snapshot.status.into(),
        selected_file: overview.snapshot.selected_file,
        current_position: overview.snapshot.current_position,
        user_count: overview.user_count,
        updated_at: overview
            .updated_at
            .and_then(|t| timestamp_to_rfc3339(t.value())),
    })
}

/// Cached video catalog
pub async fn get_videos(State(state): State<Arc<AppState>>) -> Json<VideoListDto> {
    let videos = state.get_videos_usecase.execute().await;
    Json(VideoListDto { videos })
}
