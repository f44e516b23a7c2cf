//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    config::ServerConfig,
    infrastructure::public_ip::announce_public_ip,
    usecase::{GetPlaybackStateUseCase, GetVideosUseCase, SessionUseCases},
};

use super::{
    handler::{get_playback_state, get_videos, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Synchronized playback server
///
/// # Example
///
/// ```ignore
/// let server = build_server(ServerConfig::default(), Arc::new(SystemClock)).await;
/// server.run().await?;
/// ```
pub struct Server {
    config: ServerConfig,
    /// 視聴セッションのユースケース群
    session_usecases: Arc<SessionUseCases>,
    /// GetPlaybackStateUseCase（再生状態取得のユースケース）
    get_playback_state_usecase: Arc<GetPlaybackStateUseCase>,
    /// GetVideosUseCase（カタログ取得のユースケース）
    get_videos_usecase: Arc<GetVideosUseCase>,
}

impl Server {
    pub fn new(
        config: ServerConfig,
        session_usecases: Arc<SessionUseCases>,
        get_playback_state_usecase: Arc<GetPlaybackStateUseCase>,
        get_videos_usecase: Arc<GetVideosUseCase>,
    ) -> Self {
        Self {
            config,
            session_usecases,
            get_playback_state_usecase,
            get_videos_usecase,
        }
    }

    /// Build the router with all endpoints.
    pub fn router(&self) -> Router {
        let app_state = Arc::new(AppState {
            session_usecases: self.session_usecases.clone(),
            get_playback_state_usecase: self.get_playback_state_usecase.clone(),
            get_videos_usecase: self.get_videos_usecase.clone(),
            send_buffer: self.config.send_buffer_capacity(),
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/playback", get(get_playback_state))
            .route("/api/videos", get(get_videos))
            // 動画ファイルの配信
            .nest_service("/videos", ServeDir::new(&self.config.videos_dir))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Bind to the configured address and serve until Ctrl+C / SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the configured address
    /// or if there's an error during server execution.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = self.config.bind_addr();
        let listener = TcpListener::bind(&bind_addr).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Sync server listening on {}", local_addr);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        if self.config.announce_public_ip {
            tokio::spawn(announce_public_ip(local_addr.port(), local_addr.is_ipv6()));
        }

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
    }
}
