//! Event Router
//!
//! 接続のライフサイクルとクライアント操作を各ユースケースに振り分ける。
//!
//! ```text
//! connect ──> Connected ──identify──> Identified ──join──> InRoom ──┐
//!                 │                       │                 ▲  │    │ send_message / typing
//!                 │                       │                 └──┘    │ (join で Room を移動)
//!                 └───────────────────────┴──── disconnect ─────────┘
//! ```
//!
//! 操作が失敗した場合は要求元にだけ `error` イベントを返し、
//! 他の接続の状態には一切影響させない。
//!
//! 状態遷移とその通知の送信キューへの投入は `delivery_order` を保持したまま
//! 行う。どの受信者にもイベントは遷移が確定した順に届き、`joined_room` の
//! 履歴とそれ以降の `new_message` の間に欠落や重複は生じない。

use std::sync::Arc;

use hiroma_shared::time::Clock;
use tokio::sync::Mutex;

use crate::domain::{
    ChatError, ChatRepository, ClientAction, MessagePusher, PusherChannel, ServerEvent, SessionId,
};

use super::{
    ConnectSessionUseCase, DisconnectSessionUseCase, IdentifyUseCase, JoinRoomUseCase,
    ListRoomsUseCase, NotifyTypingUseCase, SendMessageUseCase,
};

/// クライアント操作の振り分け
pub struct EventRouter {
    connect_session: ConnectSessionUseCase,
    identify: IdentifyUseCase,
    join_room: JoinRoomUseCase,
    send_message: SendMessageUseCase,
    notify_typing: NotifyTypingUseCase,
    list_rooms: ListRoomsUseCase,
    disconnect_session: DisconnectSessionUseCase,
    /// エラー返信用
    message_pusher: Arc<dyn MessagePusher>,
    /// 遷移と通知の投入を直列化する
    delivery_order: Mutex<()>,
}

impl EventRouter {
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            connect_session: ConnectSessionUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                clock.clone(),
            ),
            identify: IdentifyUseCase::new(repository.clone(), message_pusher.clone()),
            join_room: JoinRoomUseCase::new(repository.clone(), message_pusher.clone()),
            send_message: SendMessageUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                clock,
            ),
            notify_typing: NotifyTypingUseCase::new(repository.clone(), message_pusher.clone()),
            list_rooms: ListRoomsUseCase::new(repository.clone(), message_pusher.clone()),
            disconnect_session: DisconnectSessionUseCase::new(repository, message_pusher.clone()),
            message_pusher,
            delivery_order: Mutex::new(()),
        }
    }

    /// 新しい接続をセッションとして登録する
    pub async fn connect(&self, sender: PusherChannel) -> SessionId {
        let session_id = self.connect_session.execute(sender).await;
        tracing::info!("Session '{}' connected", session_id);
        session_id
    }

    /// クライアント操作を実行する
    pub async fn dispatch(&self, session_id: &SessionId, action: ClientAction) {
        let _order = self.delivery_order.lock().await;
        let result = match action {
            ClientAction::Identify { name } => {
                self.identify.execute(session_id, &name).await.map(|_| ())
            }
            ClientAction::Join { room_id } => {
                self.join_room.execute(session_id, &room_id).await.map(|_| ())
            }
            ClientAction::SendMessage { text } => {
                self.send_message.execute(session_id, &text).await.map(|_| ())
            }
            ClientAction::Typing { flag } => self.notify_typing.execute(session_id, flag).await,
            ClientAction::ListRooms => {
                self.list_rooms.reply_to(session_id).await;
                Ok(())
            }
        };

        if let Err(error) = result {
            self.reject(session_id, &error).await;
        }
    }

    /// 解釈できなかったフレームを要求元にエラーとして返す
    pub async fn reject_malformed(&self, session_id: &SessionId, detail: impl Into<String>) {
        self.reject(session_id, &ChatError::MalformedEvent(detail.into()))
            .await;
    }

    /// 接続の終了。何度呼ばれても安全。
    pub async fn disconnect(&self, session_id: &SessionId) {
        let _order = self.delivery_order.lock().await;
        self.disconnect_session.execute(session_id).await;
        tracing::info!("Session '{}' disconnected", session_id);
    }

    async fn reject(&self, session_id: &SessionId, error: &ChatError) {
        tracing::debug!("Rejected request from '{}': {}", session_id, error);
        let event = ServerEvent::from(error);
        if let Err(e) = self.message_pusher.push_to(session_id, &event).await {
            tracing::warn!("Failed to push error to '{}': {}", session_id, e);
        }
    }
}
