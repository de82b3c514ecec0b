//! MessagePusher trait 定義
//!
//! クライアントへのイベント送信のインターフェース。
//! 具体的な実装（WebSocket など）は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{error::MessagePushError, event::ServerEvent, value_object::SessionId};

/// 接続ごとの送信チャンネル（シリアライズ済みの JSON を流す）
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// イベント送信の抽象化
///
/// 送信は fire-and-forget。遅い・切断済みの相手がいても他の相手への
/// 送信を妨げず、再送も行わない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 送信チャンネルを登録
    async fn register_client(&self, session_id: SessionId, sender: PusherChannel);

    /// 送信チャンネルを登録解除
    async fn unregister_client(&self, session_id: &SessionId);

    /// 特定のセッションに送信
    async fn push_to(
        &self,
        session_id: &SessionId,
        event: &ServerEvent,
    ) -> Result<(), MessagePushError>;

    /// 複数のセッションに送信（一部の失敗は許容）
    async fn broadcast(
        &self,
        targets: Vec<SessionId>,
        event: &ServerEvent,
    ) -> Result<(), MessagePushError>;
}
