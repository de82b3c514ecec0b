//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! 各メソッドは [`Lobby`](super::Lobby) の 1 つの状態遷移に対応し、
//! 実装は 1 回の排他区間の中でその遷移を完了させなければならない。

use std::collections::BTreeMap;

use async_trait::async_trait;

use super::{
    ChatError, ChatMessage, Delivery, Departure, DisplayName, JoinOutcome, MessageId, RoomId,
    RoomSummary, Session, SessionId, Timestamp, TypingNotice,
};

#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// セッションを作成
    async fn create_session(&self, connected_at: Timestamp) -> SessionId;

    /// セッションを取得
    async fn get_session(&self, id: &SessionId) -> Result<Session, ChatError>;

    /// 表示名を設定
    async fn identify(&self, id: &SessionId, raw_name: &str) -> Result<DisplayName, ChatError>;

    /// Room に join（直前の Room からは退出）
    async fn join_room(&self, id: &SessionId, room_id: &RoomId)
    -> Result<JoinOutcome, ChatError>;

    /// メッセージを投稿（空白のみなら `Ok(None)`）
    async fn post_message(
        &self,
        id: &SessionId,
        text: &str,
        message_id: MessageId,
        sent_at: Timestamp,
    ) -> Result<Option<Delivery>, ChatError>;

    /// 入力中通知の配信先を取得
    async fn typing(&self, id: &SessionId) -> Result<TypingNotice, ChatError>;

    /// セッションを削除（Room に入っていれば退出も行う）
    async fn remove_session(&self, id: &SessionId) -> Result<Option<Departure>, ChatError>;

    /// 全 Room の集計
    async fn list_rooms(&self) -> BTreeMap<RoomId, RoomSummary>;

    /// 直近のメッセージ履歴
    async fn recent_history(
        &self,
        room_id: &RoomId,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, ChatError>;

    /// 接続中のセッション数
    async fn count_sessions(&self) -> usize;
}
