//! Shared utilities for Sajiki packages.
//!
//! - `logger`: tracing subscriber setup
//! - `time`: clock abstraction used for playback position extrapolation

pub mod logger;
pub mod time;
