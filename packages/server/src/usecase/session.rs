//! Viewer session state machine.
//!
//! One `ViewerSession` drives one connection:
//!
//! ```text
//! Connecting --open--> Active --close--> Closed
//!      \__________________close________/
//! ```
//!
//! Only an `Active` session processes inbound frames. `Closed` is terminal.

use std::sync::Arc;

use crate::{
    domain::{BroadcastReport, ConnectionId, LeaveOutcome, PusherChannel},
    infrastructure::dto::websocket::{ClientMessage, DecodeError, decode_client_message},
};

use super::{
    AcknowledgeHeartbeatUseCase, ConnectViewerUseCase, ControlPlaybackUseCase,
    DisconnectViewerUseCase, RefreshCatalogUseCase,
    connect_viewer::JoinOutcome,
    error::ConnectError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connecting,
    Active,
    Closed,
}

/// Why an inbound frame had no effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Not valid JSON, missing `type`, or wrong field types
    Malformed,
    UnknownType(String),
    /// Decoded, but the command was rejected (e.g. negative position)
    InvalidCommand,
    /// A direct reply could not be queued
    ReplyFailed,
    /// The session is not `Active`
    NotActive,
}

/// Effect of one inbound frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageOutcome {
    /// Answered to the sender only
    Replied,
    /// Applied to playback and relayed to every viewer
    Broadcast(BroadcastReport),
    Ignored(IgnoreReason),
}

/// Use cases a session needs, shared by all sessions.
pub struct SessionUseCases {
    pub connect_viewer: Arc<ConnectViewerUseCase>,
    pub disconnect_viewer: Arc<DisconnectViewerUseCase>,
    pub control_playback: Arc<ControlPlaybackUseCase>,
    pub refresh_catalog: Arc<RefreshCatalogUseCase>,
    pub acknowledge_heartbeat: Arc<AcknowledgeHeartbeatUseCase>,
}

pub struct ViewerSession {
    id: ConnectionId,
    state: SessionState,
    usecases: Arc<SessionUseCases>,
}

impl ViewerSession {
    pub fn new(id: ConnectionId, usecases: Arc<SessionUseCases>) -> Self {
        Self {
            id,
            state: SessionState::Connecting,
            usecases,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// `Connecting -> Active`: join the theater and queue the catch-up messages.
    ///
    /// A failed join closes the session.
    pub async fn open(
        &mut self,
        sender: impl Into<PusherChannel>,
    ) -> Result<JoinOutcome, ConnectError> {
        if self.state != SessionState::Connecting {
            return Err(ConnectError::AlreadyOpened);
        }

        match self.usecases.connect_viewer.execute(self.id, sender).await {
            Ok(outcome) => {
                self.state = SessionState::Active;
                tracing::info!(
                    "Connection '{}' joined, {} viewer(s) connected",
                    self.id,
                    outcome.user_count
                );
                Ok(outcome)
            }
            Err(e) => {
                self.state = SessionState::Closed;
                Err(e)
            }
        }
    }

    /// Handle one inbound text frame.
    ///
    /// Never fails: problems are logged and reported as `Ignored`, and the
    /// session stays `Active`.
    pub async fn handle_text(&mut self, text: &str) -> MessageOutcome {
        if self.state != SessionState::Active {
            tracing::debug!(
                "Dropping frame for connection '{}' in state {:?}",
                self.id,
                self.state
            );
            return MessageOutcome::Ignored(IgnoreReason::NotActive);
        }

        let message = match decode_client_message(text) {
            Ok(message) => message,
            Err(DecodeError::UnknownType(name)) => {
                tracing::debug!("Ignoring unknown message type '{}' from '{}'", name, self.id);
                return MessageOutcome::Ignored(IgnoreReason::UnknownType(name));
            }
            Err(e) => {
                tracing::warn!("Ignoring message from '{}': {}", self.id, e);
                return MessageOutcome::Ignored(IgnoreReason::Malformed);
            }
        };

        self.handle_message(&message, text).await
    }

    /// `text` is the frame as received; playback controls are relayed as is.
    async fn handle_message(&self, message: &ClientMessage, text: &str) -> MessageOutcome {
        let reply = match message {
            ClientMessage::Heartbeat => {
                self.usecases.acknowledge_heartbeat.execute(&self.id).await
            }
            ClientMessage::RefreshCatalog => self
                .usecases
                .refresh_catalog
                .execute(&self.id)
                .await
                .map(|_| ()),
            _ => {
                return match self.usecases.control_playback.execute(message, text).await {
                    Ok(report) => MessageOutcome::Broadcast(report),
                    Err(e) => {
                        tracing::warn!(
                            "Rejected '{}' from '{}': {}",
                            message.type_name(),
                            self.id,
                            e
                        );
                        MessageOutcome::Ignored(IgnoreReason::InvalidCommand)
                    }
                };
            }
        };

        match reply {
            Ok(()) => MessageOutcome::Replied,
            Err(e) => {
                tracing::warn!(
                    "Failed to reply to '{}' from '{}': {}",
                    message.type_name(),
                    self.id,
                    e
                );
                MessageOutcome::Ignored(IgnoreReason::ReplyFailed)
            }
        }
    }

    /// `* -> Closed`. Leaves the theater if the session was `Active`.
    ///
    /// Returns `None` when there was nothing to leave.
    pub async fn close(&mut self) -> Option<LeaveOutcome> {
        let previous = std::mem::replace(&mut self.state, SessionState::Closed);
        if previous != SessionState::Active {
            return None;
        }
        Some(self.usecases.disconnect_viewer.execute(self.id).await)
    }
}
