//! Synchronized video playback server library.
//!
//! One shared "now playing" state (selected file, play/pause, position) is kept
//! server-side and pushed to every connected viewer over WebSocket.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// wiring
pub mod app;
pub mod config;
