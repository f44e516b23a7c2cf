//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, ConnectionIdFactory, PusherChannel},
    ui::state::AppState,
    usecase::ViewerSession,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let id = ConnectionIdFactory::generate();
    tracing::debug!("Upgrading connection '{}'", id);
    ws.on_upgrade(move |socket| handle_socket(socket, state, id))
}

/// Spawns a task that drains the connection's queue into the WebSocket sink.
///
/// The task ends when the queue is closed (the pusher dropped the sender)
/// or when a write fails. A write to a peer that stopped reading may never
/// finish, so eviction is observed through the `EvictionSignal` instead.
fn pusher_loop(
    mut rx: mpsc::Receiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
        let _ = sender.close().await;
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, id: ConnectionId) {
    let (sender, mut receiver) = socket.split();

    // Start the writer first so the catch-up messages queued by `open` drain
    // immediately.
    let (tx, rx) = mpsc::channel(state.send_buffer);
    let mut send_task = pusher_loop(rx, sender);
    let (channel, mut evicted) = PusherChannel::with_eviction_signal(tx);

    let mut session = ViewerSession::new(id, state.session_usecases.clone());
    if let Err(e) = session.open(channel).await {
        tracing::warn!("Connection '{}' could not join: {}", id, e);
        send_task.abort();
        return;
    }

    loop {
        tokio::select! {
            frame = receiver.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    tracing::debug!("Received text from '{}': {}", id, text.as_str());
                    session.handle_text(text.as_str()).await;
                }
                Some(Ok(Message::Binary(bytes))) => match std::str::from_utf8(&bytes) {
                    Ok(text) => {
                        session.handle_text(text).await;
                    }
                    Err(e) => tracing::warn!("Ignoring non UTF-8 binary frame from '{}': {}", id, e),
                },
                Some(Ok(Message::Close(_))) => {
                    tracing::info!("Connection '{}' requested close", id);
                    break;
                }
                Some(Ok(_)) => {
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Some(Err(e)) => {
                    tracing::warn!("WebSocket error on '{}': {}", id, e);
                    break;
                }
                None => break,
            },
            _ = &mut send_task => {
                tracing::info!("Outbound stream for '{}' ended", id);
                break;
            }
            _ = &mut evicted => {
                tracing::warn!("Connection '{}' was evicted for falling behind", id);
                break;
            }
        }
    }

    send_task.abort();
    if let Some(outcome) = session.close().await {
        tracing::info!(
            "Connection '{}' closed, {} viewer(s) remaining",
            id,
            outcome.remaining
        );
    }
}
