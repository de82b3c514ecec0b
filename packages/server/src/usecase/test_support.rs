//! ユースケースのテスト用ヘルパー

use std::{collections::HashMap, sync::Arc};

use tokio::sync::{Mutex, mpsc};

use crate::{
    domain::{ChatRepository, Lobby, MessagePusher, RoomId, RoomRegistry, SessionId, Timestamp},
    infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemoryChatRepository,
    },
};

/// general / tech の 2 部屋を持つ Repository
pub fn create_test_repository() -> Arc<InMemoryChatRepository> {
    let rooms = RoomRegistry::provision([
        (RoomId::new("general").unwrap(), "General".to_string()),
        (RoomId::new("tech").unwrap(), "Tech Talk".to_string()),
    ]);
    Arc::new(InMemoryChatRepository::new(Arc::new(Mutex::new(
        Lobby::new(rooms),
    ))))
}

pub fn create_test_message_pusher() -> Arc<WebSocketMessagePusher> {
    let clients = Arc::new(Mutex::new(HashMap::new()));
    Arc::new(WebSocketMessagePusher::new(clients))
}

/// セッションを作成して送信チャンネルを登録する
pub async fn connect(
    repository: &Arc<InMemoryChatRepository>,
    message_pusher: &Arc<WebSocketMessagePusher>,
) -> (SessionId, mpsc::UnboundedReceiver<String>) {
    let session_id = repository.create_session(Timestamp::new(0)).await;
    let (tx, rx) = mpsc::unbounded_channel();
    message_pusher.register_client(session_id, tx).await;
    (session_id, rx)
}

/// identify して join まで済ませる
pub async fn enter_room(
    repository: &Arc<InMemoryChatRepository>,
    message_pusher: &Arc<WebSocketMessagePusher>,
    name: &str,
    room_id: &str,
) -> (SessionId, mpsc::UnboundedReceiver<String>) {
    let (session_id, rx) = connect(repository, message_pusher).await;
    repository.identify(&session_id, name).await.unwrap();
    repository
        .join_room(&session_id, &RoomId::new(room_id).unwrap())
        .await
        .unwrap();
    (session_id, rx)
}

/// 受信済みのイベントをすべて取り出す
pub fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<serde_json::Value> {
    let mut events = Vec::new();
    while let Ok(raw) = rx.try_recv() {
        events.push(serde_json::from_str(&raw).unwrap());
    }
    events
}
