//! Domain error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by domain invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Playback position is negative or not a finite number
    #[error("Invalid playback position: {0}")]
    InvalidPosition(f64),

    /// The connection is already part of the theater
    #[error("Connection '{0}' is already registered")]
    DuplicateConnection(String),
}

/// Errors raised by the theater repository.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Connection '{0}' is already registered")]
    DuplicateConnection(String),
}

/// Errors raised while pushing a message to a single connection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("Connection '{0}' not found")]
    ConnectionNotFound(String),

    #[error("Connection '{0}' send buffer is full")]
    BufferFull(String),

    #[error("Connection '{0}' channel is closed")]
    ChannelClosed(String),
}

/// Errors raised while listing the video directory.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read video directory '{}': {source}", dir.display())]
    ReadDir {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
