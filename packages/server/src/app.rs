//! Dependency wiring.

use std::{collections::HashMap, sync::Arc};

use sajiki_shared::time::Clock;
use tokio::sync::Mutex;

use crate::{
    config::ServerConfig,
    domain::{Theater, VideoCatalog},
    infrastructure::{
        catalog::FsVideoCatalog, message_pusher::WebSocketMessagePusher,
        repository::InMemoryTheaterRepository,
    },
    ui::Server,
    usecase::{
        AcknowledgeHeartbeatUseCase, ConnectViewerUseCase, ControlPlaybackUseCase,
        DisconnectViewerUseCase, EventSequencer, GetPlaybackStateUseCase, GetVideosUseCase,
        RefreshCatalogUseCase, SessionUseCases,
    },
};

/// Build a ready-to-run server from configuration.
///
/// Loads the video catalog once before returning.
pub async fn build_server(config: ServerConfig, clock: Arc<dyn Clock>) -> Server {
    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. Catalog
    // 4. UseCases
    // 5. Server

    // 1. Create Repository (in-memory)
    let theater = Arc::new(Mutex::new(Theater::new()));
    let repository = Arc::new(InMemoryTheaterRepository::new(theater));

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher_clients = Arc::new(Mutex::new(HashMap::new()));
    let message_pusher = Arc::new(WebSocketMessagePusher::new(message_pusher_clients));

    // 3. Create Catalog and load it once
    let catalog = Arc::new(FsVideoCatalog::new(config.videos_dir.clone()));
    let videos = catalog.refresh().await;
    tracing::info!(
        "Loaded {} video(s) from {}",
        videos.len(),
        catalog.dir().display()
    );

    // 4. Create UseCases
    let sequencer = Arc::new(EventSequencer::new());
    let session_usecases = Arc::new(SessionUseCases {
        connect_viewer: Arc::new(ConnectViewerUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            catalog.clone(),
            clock.clone(),
            sequencer.clone(),
        )),
        disconnect_viewer: Arc::new(DisconnectViewerUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            sequencer.clone(),
        )),
        control_playback: Arc::new(ControlPlaybackUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            clock.clone(),
            sequencer,
        )),
        refresh_catalog: Arc::new(RefreshCatalogUseCase::new(
            catalog.clone(),
            message_pusher.clone(),
        )),
        acknowledge_heartbeat: Arc::new(AcknowledgeHeartbeatUseCase::new(message_pusher)),
    });
    let get_playback_state_usecase = Arc::new(GetPlaybackStateUseCase::new(repository, clock));
    let get_videos_usecase = Arc::new(GetVideosUseCase::new(catalog));

    // 5. Create the server
    Server::new(
        config,
        session_usecases,
        get_playback_state_usecase,
        get_videos_usecase,
    )
}
