//! Factories for identifiers.

use uuid::Uuid;

use super::value_object::ConnectionId;

/// Generates connection identities for newly upgraded sockets.
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    pub fn generate() -> ConnectionId {
        ConnectionId::new(Uuid::new_v4())
    }
}
