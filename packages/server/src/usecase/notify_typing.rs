//! UseCase: 入力中通知
//!
//! 状態は変えず、履歴にも残さない。送信者本人には届かない。

use std::sync::Arc;

use crate::domain::{ChatError, ChatRepository, MessagePusher, ServerEvent, SessionId};

/// 入力中通知のユースケース
pub struct NotifyTypingUseCase {
    repository: Arc<dyn ChatRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl NotifyTypingUseCase {
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    pub async fn execute(&self, session_id: &SessionId, flag: bool) -> Result<(), ChatError> {
        let notice = self.repository.typing(session_id).await?;

        let event = ServerEvent::UserTyping {
            name: notice.name,
            flag,
        };
        if let Err(e) = self.message_pusher.broadcast(notice.audience, &event).await {
            tracing::warn!("Failed to broadcast user_typing: {}", e);
        }

        Ok(())
    }
}
