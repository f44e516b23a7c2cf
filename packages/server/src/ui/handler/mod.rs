//! Request handlers.

mod http;
mod websocket;

pub use http::{get_playback_state, get_videos, health_check};
pub use websocket::websocket_handler;
