//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - メッセージの履歴への追加と Room 全員へのブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 送信者自身にも new_message が届く（送信の確認になる）ことを保証
//! - 空白のみのメッセージは履歴にも残らず、誰にも配信されないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：メッセージ送信とブロードキャスト
//! - 異常系：Room 未参加、長すぎる本文
//! - エッジケース：空白のみの本文

use std::sync::Arc;

use hiroma_shared::time::Clock;

use crate::domain::{
    ChatError, ChatMessage, ChatRepository, MessageId, MessagePusher, ServerEvent, SessionId,
    Timestamp,
};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ChatRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// 送信時刻の取得
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `session_id` - 送信者のセッション
    /// * `text` - クライアントから届いた本文（未検証）
    ///
    /// # Returns
    ///
    /// * `Ok(Some(ChatMessage))` - 送信成功
    /// * `Ok(None)` - 空白のみのため何もしなかった
    /// * `Err(ChatError)` - 送信失敗
    pub async fn execute(
        &self,
        session_id: &SessionId,
        text: &str,
    ) -> Result<Option<ChatMessage>, ChatError> {
        let message_id = MessageId::generate();
        let sent_at = Timestamp::new(self.clock.now_millis());

        // 1. Repository 経由でメッセージを Room の履歴に追加
        let Some(delivery) = self
            .repository
            .post_message(session_id, text, message_id, sent_at)
            .await?
        else {
            tracing::debug!("Dropped blank message from '{}'", session_id);
            return Ok(None);
        };

        // 2. Room の全員（送信者を含む）にブロードキャスト
        let event = ServerEvent::NewMessage(delivery.message.clone());
        if let Err(e) = self
            .message_pusher
            .broadcast(delivery.audience, &event)
            .await
        {
            tracing::warn!("Failed to broadcast new_message: {}", e);
        }

        Ok(Some(delivery.message))
    }
}
