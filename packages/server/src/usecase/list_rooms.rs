//! UseCase: Room 一覧の取得
//!
//! WebSocket の `list_rooms` と HTTP の `GET /api/rooms` の両方から使われる。

use std::{collections::BTreeMap, sync::Arc};

use crate::domain::{ChatRepository, MessagePusher, RoomId, RoomSummary, ServerEvent, SessionId};

/// Room 一覧取得のユースケース
pub struct ListRoomsUseCase {
    repository: Arc<dyn ChatRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl ListRoomsUseCase {
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 全 Room の集計を返す
    pub async fn execute(&self) -> BTreeMap<RoomId, RoomSummary> {
        self.repository.list_rooms().await
    }

    /// 集計を `rooms_list` として要求元にだけ返信する
    ///
    /// 状態の有無にかかわらず、どのセッションからでも要求できる。
    pub async fn reply_to(&self, session_id: &SessionId) {
        let event = ServerEvent::RoomsList(self.execute().await);
        if let Err(e) = self.message_pusher.push_to(session_id, &event).await {
            tracing::warn!("Failed to push rooms_list to '{}': {}", session_id, e);
        }
    }
}
