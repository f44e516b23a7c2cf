//! UseCase layer.
//!
//! Each use case owns one step of a viewer session. State-changing use cases
//! share one `EventSequencer`, which gives every mutation and its broadcast a
//! single global order.

mod acknowledge_heartbeat;
mod connect_viewer;
mod control_playback;
mod disconnect_viewer;
mod error;
mod get_playback_state;
mod get_videos;
mod refresh_catalog;
mod sequencer;
mod session;

#[cfg(test)]
mod test_support;

pub use acknowledge_heartbeat::AcknowledgeHeartbeatUseCase;
pub use connect_viewer::{ConnectViewerUseCase, JoinOutcome};
pub use control_playback::ControlPlaybackUseCase;
pub use disconnect_viewer::DisconnectViewerUseCase;
pub use error::{ConnectError, PlaybackCommandError, ReplyError};
pub use get_playback_state::{GetPlaybackStateUseCase, PlaybackOverview};
pub use get_videos::GetVideosUseCase;
pub use refresh_catalog::RefreshCatalogUseCase;
pub use sequencer::EventSequencer;
pub use session::{IgnoreReason, MessageOutcome, SessionState, SessionUseCases, ViewerSession};
