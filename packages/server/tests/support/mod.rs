//! Helpers for in-process integration tests.
//!
//! The server is bound to an ephemeral port on 127.0.0.1 and driven over real
//! WebSocket / HTTP connections.

#![allow(dead_code)]

use std::{collections::HashMap, net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use hiroma_server::{
    domain::{Lobby, RoomId, RoomRegistry},
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryChatRepository},
    ui::Server,
    usecase::{EventRouter, GetRoomMessagesUseCase, ListRoomsUseCase},
};
use hiroma_shared::time::SystemClock;
use serde_json::Value;
use tokio::{
    net::{TcpListener, TcpStream},
    sync::Mutex,
};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

const RECV_TIMEOUT: Duration = Duration::from_secs(2);

/// Start a server with the rooms general / tech and return its address
pub async fn spawn_app() -> SocketAddr {
    let rooms = RoomRegistry::provision([
        (RoomId::new("general").unwrap(), "General".to_string()),
        (RoomId::new("tech").unwrap(), "Tech Talk".to_string()),
    ]);
    let repository = Arc::new(InMemoryChatRepository::new(Arc::new(Mutex::new(
        Lobby::new(rooms),
    ))));
    let message_pusher = Arc::new(WebSocketMessagePusher::new(Arc::new(Mutex::new(
        HashMap::new(),
    ))));
    let clock = Arc::new(SystemClock);

    let server = Server::new(
        Arc::new(EventRouter::new(
            repository.clone(),
            message_pusher.clone(),
            clock.clone(),
        )),
        Arc::new(ListRoomsUseCase::new(repository.clone(), message_pusher)),
        Arc::new(GetRoomMessagesUseCase::new(repository)),
        clock,
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        server
            .serve(listener, std::future::pending())
            .await
            .unwrap();
    });

    addr
}

/// A WebSocket client speaking the JSON event protocol
pub struct TestClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    pub async fn connect(addr: SocketAddr) -> Self {
        let (stream, _) = connect_async(format!("ws://{}/ws", addr)).await.unwrap();
        Self { stream }
    }

    pub async fn send(&mut self, event: Value) {
        self.stream
            .send(Message::Text(event.to_string().into()))
            .await
            .unwrap();
    }

    pub async fn send_raw(&mut self, raw: &str) {
        self.stream
            .send(Message::Text(raw.to_string().into()))
            .await
            .unwrap();
    }

    /// Next text frame as JSON (panics after a timeout)
    pub async fn recv(&mut self) -> Value {
        self.try_recv(RECV_TIMEOUT)
            .await
            .expect("timed out waiting for an event")
    }

    /// Next text frame as JSON, or `None` if nothing arrives within `timeout`
    pub async fn try_recv(&mut self, timeout: Duration) -> Option<Value> {
        loop {
            let next = tokio::time::timeout(timeout, self.stream.next()).await.ok()??;
            if let Message::Text(text) = next.unwrap() {
                return Some(serde_json::from_str(text.as_str()).unwrap());
            }
        }
    }

    /// Skip frames until one with the given event name arrives
    pub async fn recv_event(&mut self, name: &str) -> Value {
        loop {
            let event = self.recv().await;
            if event["event"] == name {
                return event;
            }
        }
    }

    /// identify and wait for the acknowledgement
    pub async fn identify(&mut self, name: &str) -> Value {
        self.send(serde_json::json!({"event": "identify", "name": name}))
            .await;
        self.recv().await
    }

    /// join and wait for both the snapshot and the presence broadcast
    pub async fn join(&mut self, room_id: &str) -> Value {
        self.send(serde_json::json!({"event": "join", "room_id": room_id}))
            .await;
        let snapshot = self.recv_event("joined_room").await;
        self.recv_event("user_joined").await;
        snapshot
    }

    pub async fn close(mut self) {
        self.stream.close(None).await.unwrap();
    }
}
