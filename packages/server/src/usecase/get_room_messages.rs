//! UseCase: Room の直近メッセージ取得（HTTP API 用）

use std::sync::Arc;

use crate::domain::{ChatError, ChatMessage, ChatRepository, JOIN_HISTORY_LIMIT, RoomId};

/// 直近メッセージ取得のユースケース
pub struct GetRoomMessagesUseCase {
    repository: Arc<dyn ChatRepository>,
}

impl GetRoomMessagesUseCase {
    pub fn new(repository: Arc<dyn ChatRepository>) -> Self {
        Self { repository }
    }

    /// 古い順に最大 `limit` 件（省略時は join 時と同じ件数）を返す
    ///
    /// # Errors
    ///
    /// * `ChatError::RoomUnknown` - 用意されていない Room
    pub async fn execute(
        &self,
        raw_room_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<ChatMessage>, ChatError> {
        let room_id = RoomId::new(raw_room_id)
            .map_err(|_| ChatError::RoomUnknown(raw_room_id.trim().to_string()))?;
        self.repository
            .recent_history(&room_id, limit.unwrap_or(JOIN_HISTORY_LIMIT))
            .await
    }
}
