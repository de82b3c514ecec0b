//! UseCase: 表示名の設定
//!
//! 成功時は本人にだけ `identified` を返す。Room にはまだ入っていないので
//! 他のセッションへの通知はない。

use std::sync::Arc;

use crate::domain::{ChatError, ChatRepository, DisplayName, MessagePusher, ServerEvent, SessionId};

/// 表示名設定のユースケース
pub struct IdentifyUseCase {
    repository: Arc<dyn ChatRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl IdentifyUseCase {
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 表示名を設定し、`identified` を返信する
    ///
    /// # Errors
    ///
    /// * `ChatError::NameEmpty` - 空白のみの名前
    /// * `ChatError::AlreadyIdentified` - 別の名前を設定済み
    /// * `ChatError::NameTaken` - 他のセッションが使用中
    /// * `ChatError::SessionUnknown` - セッションが既に切断されている
    pub async fn execute(
        &self,
        session_id: &SessionId,
        raw_name: &str,
    ) -> Result<DisplayName, ChatError> {
        let name = self.repository.identify(session_id, raw_name).await?;
        tracing::info!("Session '{}' identified as '{}'", session_id, name);

        let event = ServerEvent::Identified { name: name.clone() };
        if let Err(e) = self.message_pusher.push_to(session_id, &event).await {
            tracing::warn!("Failed to push identified to '{}': {}", session_id, e);
        }

        Ok(name)
    }
}
