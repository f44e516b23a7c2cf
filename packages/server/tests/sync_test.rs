//! End-to-end tests: a real server on an ephemeral port, driven by WebSocket clients.

use std::{net::SocketAddr, path::Path, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use sajiki_server::{app::build_server, config::ServerConfig};
use sajiki_shared::time::SystemClock;
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::{net::TcpStream, sync::oneshot, time::timeout};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};

const RECV_TIMEOUT: Duration = Duration::from_secs(2);

/// Helper struct to manage an in-process server
struct TestServer {
    addr: SocketAddr,
    videos: TempDir,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    async fn start(videos: &[&str]) -> Self {
        Self::start_with_send_buffer(videos, ServerConfig::default().send_buffer).await
    }

    async fn start_with_send_buffer(videos: &[&str], send_buffer: usize) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create video dir");
        for name in videos {
            std::fs::write(dir.path().join(name), name.as_bytes()).unwrap();
        }

        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            videos_dir: dir.path().to_path_buf(),
            send_buffer,
            ..ServerConfig::default()
        };
        let server = build_server(config, Arc::new(SystemClock)).await;

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();
        tokio::spawn(server.serve(listener, async {
            let _ = rx.await;
        }));

        TestServer {
            addr,
            videos: dir,
            shutdown: Some(tx),
        }
    }

    fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    fn http_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    fn videos_dir(&self) -> &Path {
        self.videos.path()
    }

    async fn playback(&self) -> Value {
        reqwest::get(self.http_url("/api/playback"))
            .await
            .unwrap()
            .json::<Value>()
            .await
            .unwrap()
    }

    /// Poll the diagnostic endpoint until the server has processed all leaves.
    async fn wait_for_user_count(&self, expected: u64) {
        for _ in 0..100 {
            if self.playback().await["userCount"] == json!(expected) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("userCount never reached {}", expected);
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// Helper struct wrapping one WebSocket viewer
struct Viewer {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl Viewer {
    async fn connect(server: &TestServer) -> Self {
        let (ws, _response) = connect_async(server.ws_url())
            .await
            .expect("Failed to connect");
        Viewer { ws }
    }

    /// Connect and consume the userCount / init / catalog greeting.
    async fn join(server: &TestServer) -> (Self, Value, Value) {
        let mut viewer = Self::connect(server).await;
        let count = viewer.recv().await;
        assert_eq!(count["type"], "userCount");
        let init = viewer.recv().await;
        assert_eq!(init["type"], "init");
        let catalog = viewer.recv().await;
        assert_eq!(catalog["type"], "catalog");
        (viewer, init, catalog)
    }

    async fn send(&mut self, value: Value) {
        self.send_raw(&value.to_string()).await;
    }

    async fn send_raw(&mut self, text: &str) {
        self.ws
            .send(Message::Text(text.to_string().into()))
            .await
            .expect("Failed to send");
    }

    async fn recv(&mut self) -> Value {
        serde_json::from_str(&self.recv_text().await).expect("Server sent invalid JSON")
    }

    async fn recv_text(&mut self) -> String {
        loop {
            let frame = timeout(RECV_TIMEOUT, self.ws.next())
                .await
                .expect("Timed out waiting for a message")
                .expect("Stream ended")
                .expect("WebSocket error");
            if let Message::Text(text) = frame {
                return text.as_str().to_string();
            }
        }
    }

    async fn expect_silence(&mut self, window: Duration) {
        if let Ok(Some(Ok(Message::Text(text)))) = timeout(window, self.ws.next()).await {
            panic!("Unexpected message: {}", text.as_str());
        }
    }

    async fn close(mut self) {
        let _ = self.ws.close(None).await;
    }
}

#[tokio::test]
async fn test_first_viewer_receives_initial_state_and_catalog() {
    // テスト項目: 最初の視聴者は userCount=1、初期状態の init、ソート済みの catalog を受け取る
    // given (前提条件):
    let server = TestServer::start(&["b.mp4", "a.mp4"]).await;

    // when (操作):
    let mut viewer = Viewer::connect(&server).await;
    let count = viewer.recv().await;
    let init = viewer.recv().await;
    let catalog = viewer.recv().await;

    // then (期待する結果):
    assert_eq!(count, json!({"type": "userCount", "count": 1}));
    assert_eq!(
        init,
        json!({"type": "init", "status": "paused", "selectedFile": "", "currentPosition": 0.0})
    );
    assert_eq!(catalog, json!({"type": "catalog", "videos": ["a.mp4", "b.mp4"]}));
}

#[tokio::test]
async fn test_user_count_follows_joins_and_leaves() {
    // テスト項目: 参加・退出のたびに全員へ最新の userCount が届く
    // given (前提条件):
    let server = TestServer::start(&[]).await;
    let (mut alice, _, _) = Viewer::join(&server).await;

    // when (操作):
    let (bob, _, _) = Viewer::join(&server).await;
    let after_join = alice.recv().await;
    bob.close().await;
    let after_leave = alice.recv().await;

    // then (期待する結果):
    assert_eq!(after_join, json!({"type": "userCount", "count": 2}));
    assert_eq!(after_leave, json!({"type": "userCount", "count": 1}));
}

#[tokio::test]
async fn test_seek_is_relayed_to_all_including_sender() {
    // テスト項目: seek は受信したテキストのまま送信者を含む全員に中継され、後から参加した視聴者の位置に反映される
    // given (前提条件):
    let server = TestServer::start(&["movie.mp4"]).await;
    let (mut alice, _, _) = Viewer::join(&server).await;
    let (mut bob, _, _) = Viewer::join(&server).await;
    alice.recv().await; // userCount 2
    let frame = r#"{"type":"seek","currentTime":75.5,"sentBy":"alice"}"#;

    // when (操作):
    alice.send_raw(frame).await;

    // then (期待する結果):
    assert_eq!(alice.recv_text().await, frame);
    assert_eq!(bob.recv_text().await, frame);

    let (_carol, init, _) = Viewer::join(&server).await;
    assert_eq!(init["status"], "paused");
    assert_eq!(init["currentPosition"], json!(75.5));
}

#[tokio::test]
async fn test_viewer_that_stops_reading_is_dropped() {
    // テスト項目: 受信をやめた視聴者は送信キューが溢れた時点で切断され、残りの視聴者に人数の減少が届く
    // given (前提条件):
    let server = TestServer::start_with_send_buffer(&[], 2).await;
    let (mut alice, _, _) = Viewer::join(&server).await;
    let (_stalled_bob, _, _) = Viewer::join(&server).await;
    assert_eq!(alice.recv().await, json!({"type": "userCount", "count": 2}));
    let pad = "x".repeat(512 * 1024);

    // when (操作):
    // bob は以後一切読まないので、ソケットのバッファが埋まると送信キューも溢れる
    let mut dropped = false;
    for i in 0..256 {
        alice
            .send(json!({"type": "seek", "currentTime": i, "pad": pad}))
            .await;
        loop {
            let message = alice.recv().await;
            if message["type"] == "userCount" {
                assert_eq!(message["count"], 1);
                dropped = true;
            } else if message["type"] == "seek" {
                break;
            }
        }
        if dropped {
            break;
        }
    }

    // then (期待する結果):
    assert!(dropped, "stalled viewer was never dropped");
    server.wait_for_user_count(1).await;
}

#[tokio::test]
async fn test_mid_playback_joiner_gets_extrapolated_position() {
    // テスト項目: 再生途中に参加した視聴者は経過時間を加算した位置を受け取る
    // given (前提条件):
    let server = TestServer::start(&["movie.mp4"]).await;
    let (mut alice, _, _) = Viewer::join(&server).await;
    alice
        .send(json!({"type": "select", "fileName": "movie.mp4"}))
        .await;
    alice.send(json!({"type": "play", "currentTime": 30.0})).await;
    alice.recv().await;
    alice.recv().await;

    // when (操作):
    tokio::time::sleep(Duration::from_millis(300)).await;
    let (_bob, init, _) = Viewer::join(&server).await;

    // then (期待する結果):
    assert_eq!(init["status"], "playing");
    assert_eq!(init["selectedFile"], "movie.mp4");
    let position = init["currentPosition"].as_f64().unwrap();
    assert!(
        (30.25..32.0).contains(&position),
        "unexpected position {}",
        position
    );
}

#[tokio::test]
async fn test_state_resets_after_last_viewer_leaves() {
    // テスト項目: 最後の視聴者が退出すると、次の参加者は初期状態を受け取る
    // given (前提条件):
    let server = TestServer::start(&["movie.mp4"]).await;
    let (mut alice, _, _) = Viewer::join(&server).await;
    alice
        .send(json!({"type": "select", "fileName": "movie.mp4"}))
        .await;
    alice.send(json!({"type": "play", "currentTime": 10.0})).await;
    alice.recv().await;
    alice.recv().await;

    // when (操作):
    alice.close().await;
    server.wait_for_user_count(0).await;
    let (_bob, init, _) = Viewer::join(&server).await;

    // then (期待する結果):
    assert_eq!(
        init,
        json!({"type": "init", "status": "paused", "selectedFile": "", "currentPosition": 0.0})
    );
}

#[tokio::test]
async fn test_malformed_input_keeps_connection_and_state() {
    // テスト項目: 壊れた入力・未知の type は無視され、接続も再生状態も維持される
    // given (前提条件):
    let server = TestServer::start(&[]).await;
    let (mut alice, _, _) = Viewer::join(&server).await;
    let (mut bob, _, _) = Viewer::join(&server).await;
    alice.recv().await; // userCount 2
    let before = server.playback().await;

    // when (操作):
    alice.send_raw("not json at all").await;
    alice.send_raw(r#"{"type":"seek","currentTi"#).await;
    alice.send_raw(r#"{"type":"seek","currentTime":-4}"#).await;
    alice.send(json!({"type": "hreatcheck"})).await;
    alice.send(json!({"type": "heartbeat"})).await;

    // then (期待する結果):
    assert_eq!(alice.recv().await, json!({"type": "heartbeatAck"}));
    bob.expect_silence(Duration::from_millis(200)).await;
    assert_eq!(server.playback().await, before);
}

#[tokio::test]
async fn test_refresh_catalog_replies_to_requester_only() {
    // テスト項目: refreshCatalog は最新のファイル一覧を要求者にのみ返す
    // given (前提条件):
    let server = TestServer::start(&["a.mp4"]).await;
    let (mut alice, _, catalog) = Viewer::join(&server).await;
    let (mut bob, _, _) = Viewer::join(&server).await;
    alice.recv().await; // userCount 2
    assert_eq!(catalog["videos"], json!(["a.mp4"]));
    std::fs::write(server.videos_dir().join("c.mp4"), b"c").unwrap();

    // when (操作):
    alice.send(json!({"type": "refreshCatalog"})).await;

    // then (期待する結果):
    assert_eq!(
        alice.recv().await,
        json!({"type": "catalog", "videos": ["a.mp4", "c.mp4"]})
    );
    bob.expect_silence(Duration::from_millis(200)).await;
}

#[tokio::test]
async fn test_http_endpoints() {
    // テスト項目: ヘルスチェック・カタログ・動画ファイル配信の HTTP エンドポイントが動作する
    // given (前提条件):
    let server = TestServer::start(&["movie.mp4"]).await;

    // when (操作):
    let health: Value = reqwest::get(server.http_url("/api/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let videos: Value = reqwest::get(server.http_url("/api/videos"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let file = reqwest::get(server.http_url("/videos/movie.mp4"))
        .await
        .unwrap();
    let status = file.status();
    let body = file.text().await.unwrap();

    // then (期待する結果):
    assert_eq!(health, json!({"status": "ok"}));
    assert_eq!(videos, json!({"videos": ["movie.mp4"]}));
    assert!(status.is_success());
    assert_eq!(body, "movie.mp4");
}
