//! Value objects.

use std::fmt;

use uuid::Uuid;

use super::error::DomainError;

/// Identity of one live viewer connection.
///
/// Generated by the server on upgrade; equality is identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unix timestamp in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Playback position in seconds.
///
/// Always finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct PlaybackPosition(f64);

impl PlaybackPosition {
    pub const ZERO: Self = Self(0.0);

    /// Create a position from seconds.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPosition` for negative, NaN or infinite values.
    pub fn new(seconds: f64) -> Result<Self, DomainError> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(DomainError::InvalidPosition(seconds));
        }
        Ok(Self(seconds))
    }

    pub fn seconds(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for PlaybackPosition {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
