//! Data Transfer Objects (DTOs) for the sync server.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket message DTOs and their codec
//! - `http`: HTTP API response DTOs

pub mod conversion;
pub mod http;
pub mod websocket;
