//! Global event ordering.

use tokio::sync::{Mutex, MutexGuard};

/// Serializes lifecycle events and playback commands.
///
/// A use case holds the guard from its first state mutation until its last
/// message is queued, so broadcasts reach every viewer in the order the
/// triggering events were handled.
#[derive(Debug, Default)]
pub struct EventSequencer {
    gate: Mutex<()>,
}

impl EventSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.gate.lock().await
    }
}
