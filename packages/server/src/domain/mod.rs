//! Domain layer: the shared playback state, the viewer registry and the
//! interfaces (repository, pusher, catalog) that the use cases depend on.

pub mod catalog;
pub mod entity;
pub mod error;
pub mod factory;
pub mod position;
pub mod pusher;
pub mod repository;
pub mod value_object;

pub use catalog::VideoCatalog;
pub use entity::{
    LeaveOutcome, PlaybackCommand, PlaybackSnapshot, PlaybackState, PlaybackStatus, Reference,
    Theater,
};
pub use error::{CatalogError, DomainError, MessagePushError, RepositoryError};
pub use factory::ConnectionIdFactory;
pub use position::{current_position, elapsed_since};
pub use pusher::{BroadcastReport, EvictionSignal, MessagePusher, PusherChannel};
pub use repository::TheaterRepository;
pub use value_object::{ConnectionId, PlaybackPosition, Timestamp};
