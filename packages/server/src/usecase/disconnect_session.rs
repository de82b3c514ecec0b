//! UseCase: セッション切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectSessionUseCase::execute() メソッド
//! - セッションの削除、送信チャンネルの登録解除、退出通知
//!
//! ### なぜこのテストが必要か
//! - 切断後は表示名が解放され、Room の参加者からも消えることを保証
//! - 同じ Room の残りの参加者にだけ user_left が届くことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：Room に入っているセッションの切断
//! - エッジケース：Room に入る前の切断、二重の切断

use std::sync::Arc;

use crate::domain::{ChatRepository, Departure, MessagePusher, ServerEvent, SessionId};

/// セッション切断のユースケース
pub struct DisconnectSessionUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ChatRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectSessionUseCase {
    /// 新しい DisconnectSessionUseCase を作成
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// セッション切断を実行
    ///
    /// 既に削除済みのセッションに対しては何もしない。
    ///
    /// # Returns
    ///
    /// Room に入っていた場合はその退出内容
    pub async fn execute(&self, session_id: &SessionId) -> Option<Departure> {
        // 1. MessagePusher から送信チャンネルを登録解除
        self.message_pusher.unregister_client(session_id).await;

        // 2. Repository からセッションを削除（Room からの退出を含む）
        let departure = match self.repository.remove_session(session_id).await {
            Ok(departure) => departure,
            Err(e) => {
                tracing::debug!("Session '{}' already removed: {}", session_id, e);
                return None;
            }
        };

        // 3. 残りの参加者に退出を通知
        if let Some(departure) = &departure {
            tracing::info!(
                "'{}' left room '{}' on disconnect ({} remaining)",
                departure.name,
                departure.room_id,
                departure.occupant_count
            );
            let event = ServerEvent::user_left(departure);
            if let Err(e) = self
                .message_pusher
                .broadcast(departure.audience.clone(), &event)
                .await
            {
                tracing::warn!("Failed to broadcast user_left: {}", e);
            }
        }

        departure
    }
}
