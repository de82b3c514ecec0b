//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::SessionId, infrastructure::dto::websocket::ClientMessage, ui::state::AppState,
    usecase::EventRouter,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives events from the rx channel and pushes them to the WebSocket sender.
///
/// Every event addressed to this session by any use case arrives through `rx`
/// already encoded as JSON.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

/// Parses one text frame and hands it to the router.
async fn handle_text(router: &EventRouter, session_id: &SessionId, text: &str) {
    tracing::debug!("Received from '{}': {}", session_id, text);

    match serde_json::from_str::<ClientMessage>(text) {
        Ok(message) => router.dispatch(session_id, message.into()).await,
        Err(e) => {
            tracing::warn!("Failed to parse event from '{}': {}", session_id, e);
            router.reject_malformed(session_id, e.to_string()).await;
        }
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, mut receiver) = socket.split();

    // Register the session before reading any frame so that replies have a destination
    let (tx, rx) = mpsc::unbounded_channel();
    let session_id = state.event_router.connect(tx).await;

    let router = state.event_router.clone();

    // Spawn a task to receive events from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", session_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => handle_text(&router, &session_id, text.as_str()).await,
                Message::Binary(_) => {
                    tracing::debug!("Ignored binary frame from '{}'", session_id);
                }
                Message::Close(_) => {
                    tracing::info!("Session '{}' requested close", session_id);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                _ => {}
            }
        }
    });

    // Spawn a task to push events addressed to this session
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state.event_router.disconnect(&session_id).await;
}
