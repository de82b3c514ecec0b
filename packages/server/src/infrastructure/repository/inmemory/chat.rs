//! InMemory Chat Repository 実装
//!
//! ドメイン層が定義する ChatRepository trait の具体的な実装。
//! `Lobby` 集約を 1 つの Mutex で保護し、インメモリ DB として使用します。
//!
//! ## 排他制御
//!
//! 全てのメソッドはロックを 1 回だけ取得し、ロック中に `.await` しない。
//! そのため、接続側のタスクが途中で abort されても状態遷移が中途半端に
//! 適用されることはなく、切断時のクリーンアップは常に最新の状態に対して行われる。

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ChatError, ChatMessage, ChatRepository, Delivery, Departure, DisplayName, JoinOutcome, Lobby,
    MessageId, RoomId, RoomSummary, Session, SessionId, Timestamp, TypingNotice,
};

/// インメモリ Chat Repository 実装
pub struct InMemoryChatRepository {
    /// Lobby 集約（Session Table + Room Registry）
    lobby: Arc<Mutex<Lobby>>,
}

impl InMemoryChatRepository {
    /// 新しい InMemoryChatRepository を作成
    pub fn new(lobby: Arc<Mutex<Lobby>>) -> Self {
        Self { lobby }
    }
}

#[async_trait]
impl ChatRepository for InMemoryChatRepository {
    async fn create_session(&self, connected_at: Timestamp) -> SessionId {
        let mut lobby = self.lobby.lock().await;
        lobby.connect(connected_at)
    }

    async fn get_session(&self, id: &SessionId) -> Result<Session, ChatError> {
        let lobby = self.lobby.lock().await;
        lobby.session(id)
    }

    async fn identify(&self, id: &SessionId, raw_name: &str) -> Result<DisplayName, ChatError> {
        let mut lobby = self.lobby.lock().await;
        lobby.identify(id, raw_name)
    }

    async fn join_room(
        &self,
        id: &SessionId,
        room_id: &RoomId,
    ) -> Result<JoinOutcome, ChatError> {
        let mut lobby = self.lobby.lock().await;
        lobby.join(id, room_id)
    }

    async fn post_message(
        &self,
        id: &SessionId,
        text: &str,
        message_id: MessageId,
        sent_at: Timestamp,
    ) -> Result<Option<Delivery>, ChatError> {
        let mut lobby = self.lobby.lock().await;
        lobby.post_message(id, text, message_id, sent_at)
    }

    async fn typing(&self, id: &SessionId) -> Result<TypingNotice, ChatError> {
        let lobby = self.lobby.lock().await;
        lobby.typing(id)
    }

    async fn remove_session(&self, id: &SessionId) -> Result<Option<Departure>, ChatError> {
        let mut lobby = self.lobby.lock().await;
        lobby.disconnect(id)
    }

    async fn list_rooms(&self) -> BTreeMap<RoomId, RoomSummary> {
        let lobby = self.lobby.lock().await;
        lobby.list_rooms()
    }

    async fn recent_history(
        &self,
        room_id: &RoomId,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, ChatError> {
        let lobby = self.lobby.lock().await;
        lobby.recent_history(room_id, limit)
    }

    async fn count_sessions(&self) -> usize {
        let lobby = self.lobby.lock().await;
        lobby.session_count()
    }
}
