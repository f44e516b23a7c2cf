//! Shared fixtures for use case tests.

use std::sync::Arc;

use sajiki_shared::time::ManualClock;
use tokio::sync::mpsc;

use crate::{
    domain::catalog::MockVideoCatalog,
    infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemoryTheaterRepository,
    },
};

use super::{
    AcknowledgeHeartbeatUseCase, ConnectViewerUseCase, ControlPlaybackUseCase,
    DisconnectViewerUseCase, EventSequencer, RefreshCatalogUseCase, SessionUseCases,
};

pub const START_MILLIS: i64 = 1_700_000_000_000;

/// Real in-memory repository and pusher, mocked catalog, manual clock.
pub struct Fixture {
    pub repository: Arc<InMemoryTheaterRepository>,
    pub message_pusher: Arc<WebSocketMessagePusher>,
    pub catalog: Arc<MockVideoCatalog>,
    pub clock: Arc<ManualClock>,
    pub sequencer: Arc<EventSequencer>,
}

impl Fixture {
    pub fn new(videos: Vec<String>) -> Self {
        let mut catalog = MockVideoCatalog::new();
        let cached = videos.clone();
        catalog.expect_videos().returning(move || cached.clone());
        catalog.expect_refresh().returning(move || videos.clone());

        Self {
            repository: Arc::new(InMemoryTheaterRepository::default()),
            message_pusher: Arc::new(WebSocketMessagePusher::default()),
            catalog: Arc::new(catalog),
            clock: Arc::new(ManualClock::new(START_MILLIS)),
            sequencer: Arc::new(EventSequencer::new()),
        }
    }

    pub fn connect_usecase(&self) -> ConnectViewerUseCase {
        ConnectViewerUseCase::new(
            self.repository.clone(),
            self.message_pusher.clone(),
            self.catalog.clone(),
            self.clock.clone(),
            self.sequencer.clone(),
        )
    }

    pub fn disconnect_usecase(&self) -> DisconnectViewerUseCase {
        DisconnectViewerUseCase::new(
            self.repository.clone(),
            self.message_pusher.clone(),
            self.sequencer.clone(),
        )
    }

    pub fn control_playback_usecase(&self) -> ControlPlaybackUseCase {
        ControlPlaybackUseCase::new(
            self.repository.clone(),
            self.message_pusher.clone(),
            self.clock.clone(),
            self.sequencer.clone(),
        )
    }

    pub fn refresh_catalog_usecase(&self) -> RefreshCatalogUseCase {
        RefreshCatalogUseCase::new(self.catalog.clone(), self.message_pusher.clone())
    }

    pub fn acknowledge_heartbeat_usecase(&self) -> AcknowledgeHeartbeatUseCase {
        AcknowledgeHeartbeatUseCase::new(self.message_pusher.clone())
    }

    pub fn session_usecases(&self) -> Arc<SessionUseCases> {
        Arc::new(SessionUseCases {
            connect_viewer: Arc::new(self.connect_usecase()),
            disconnect_viewer: Arc::new(self.disconnect_usecase()),
            control_playback: Arc::new(self.control_playback_usecase()),
            refresh_catalog: Arc::new(self.refresh_catalog_usecase()),
            acknowledge_heartbeat: Arc::new(self.acknowledge_heartbeat_usecase()),
        })
    }
}

/// Collect everything currently queued on a connection.
pub fn drain(rx: &mut mpsc::Receiver<String>) -> Vec<String> {
    let mut messages = Vec::new();
    while let Ok(message) = rx.try_recv() {
        messages.push(message);
    }
    messages
}
