//! Entities: the shared playback record and the theater aggregate that owns it.

use std::collections::HashSet;

use super::{
    error::DomainError,
    position::current_position,
    value_object::{ConnectionId, PlaybackPosition, Timestamp},
};

/// Play/pause status of the shared playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    Playing,
    #[default]
    Paused,
}

/// A playback position and the instant it was valid at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reference {
    pub position: PlaybackPosition,
    pub timestamp: Timestamp,
}

/// A state-changing playback command, decoded from a viewer message.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackCommand {
    Select { file_name: String },
    Play { position: Option<PlaybackPosition> },
    Pause { position: Option<PlaybackPosition> },
    Seek { position: PlaybackPosition },
}

/// The single shared "now playing" record.
///
/// `reference` is `None` until the first position report arrives, which is
/// how "no position ever recorded" is told apart from "position 0".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaybackState {
    selected_file: String,
    status: PlaybackStatus,
    reference: Option<Reference>,
}

/// What a newly joined viewer needs to catch up.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSnapshot {
    pub status: PlaybackStatus,
    pub selected_file: String,
    pub current_position: f64,
}

impl PlaybackState {
    /// Empty string means nothing is selected.
    pub fn selected_file(&self) -> &str {
        &self.selected_file
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn reference(&self) -> Option<Reference> {
        self.reference
    }

    pub fn select_file(&mut self, file_name: impl Into<String>) {
        self.selected_file = file_name.into();
    }

    /// Record `position` as valid at `now`. Status is left unchanged.
    pub fn seek(&mut self, position: PlaybackPosition, now: Timestamp) {
        self.reference = Some(Reference {
            position,
            timestamp: now,
        });
    }

    /// Change play/pause status only; the reference pair is untouched.
    pub fn set_status(&mut self, status: PlaybackStatus) {
        self.status = status;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Apply a viewer command.
    ///
    /// Play and pause refresh the reference only when the viewer reported its
    /// own position alongside the status change.
    pub fn apply(&mut self, command: &PlaybackCommand, now: Timestamp) {
        match command {
            PlaybackCommand::Select { file_name } => self.select_file(file_name.clone()),
            PlaybackCommand::Play { position } => {
                if let Some(position) = position {
                    self.seek(*position, now);
                }
                self.set_status(PlaybackStatus::Playing);
            }
            PlaybackCommand::Pause { position } => {
                if let Some(position) = position {
                    self.seek(*position, now);
                }
                self.set_status(PlaybackStatus::Paused);
            }
            PlaybackCommand::Seek { position } => self.seek(*position, now),
        }
    }

    pub fn snapshot(&self, now: Timestamp) -> PlaybackSnapshot {
        PlaybackSnapshot {
            status: self.status,
            selected_file: self.selected_file.clone(),
            current_position: current_position(self, now),
        }
    }
}

/// Result of removing a viewer from the theater.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaveOutcome {
    /// `false` when the viewer was not registered
    pub removed: bool,
    /// Viewers still connected after the removal
    pub remaining: usize,
    /// `true` when this removal emptied the theater and playback was reset
    pub reset: bool,
}

/// The single viewing session: who is connected and what they are watching.
#[derive(Debug, Clone, Default)]
pub struct Theater {
    viewers: HashSet<ConnectionId>,
    playback: PlaybackState,
}

impl Theater {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    pub fn playback_mut(&mut self) -> &mut PlaybackState {
        &mut self.playback
    }

    pub fn viewer_count(&self) -> usize {
        self.viewers.len()
    }

    pub fn viewer_ids(&self) -> Vec<ConnectionId> {
        self.viewers.iter().copied().collect()
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.viewers.contains(id)
    }

    /// Add a viewer and return the new viewer count.
    pub fn join(&mut self, id: ConnectionId) -> Result<usize, DomainError> {
        if !self.viewers.insert(id) {
            return Err(DomainError::DuplicateConnection(id.to_string()));
        }
        Ok(self.viewers.len())
    }

    /// Remove a viewer. Playback is reset when the last viewer leaves.
    ///
    /// Removing an unknown viewer is a no-op and never resets playback.
    pub fn leave(&mut self, id: &ConnectionId) -> LeaveOutcome {
        let removed = self.viewers.remove(id);
        let reset = removed && self.viewers.is_empty();
        if reset {
            self.playback.reset();
        }
        LeaveOutcome {
            removed,
            remaining: self.viewers.len(),
            reset,
        }
    }
}
