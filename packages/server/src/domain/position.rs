//! Playback position extrapolation.
//!
//! The server never ticks playback time. It keeps one `(position, timestamp)`
//! reference pair and derives the current position from the clock whenever a
//! snapshot is needed.

use super::{
    entity::{PlaybackState, PlaybackStatus},
    value_object::Timestamp,
};

/// Seconds elapsed between `reference` and `now`.
///
/// Clock anomalies that would give a negative delta yield `0.0`.
pub fn elapsed_since(reference: Timestamp, now: Timestamp) -> f64 {
    let delta_millis = now.value().saturating_sub(reference.value()).max(0);
    delta_millis as f64 / 1000.0
}

/// Current playback position in seconds.
///
/// - no reference recorded yet: `0.0`
/// - paused: the reference position
/// - playing: the reference position plus the time elapsed since it was recorded
pub fn current_position(state: &PlaybackState, now: Timestamp) -> f64 {
    let Some(reference) = state.reference() else {
        return 0.0;
    };

    match state.status() {
        PlaybackStatus::Paused => reference.position.seconds(),
        PlaybackStatus::Playing => {
            reference.position.seconds() + elapsed_since(reference.timestamp, now)
        }
    }
}
