//! UseCase: Room への参加
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - 暗黙の退出 → 参加 → スナップショット返信 → 参加通知 の順序
//!
//! ### なぜこのテストが必要か
//! - 参加者数は退出・参加のたびに更新された値で通知されなければならない
//! - 別の Room に移ったセッションには元の Room のイベントが届かないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：初めての join、Room の移動
//! - 異常系：名前未設定、存在しない Room
//! - エッジケース：空の room_id

use std::sync::Arc;

use crate::domain::{
    ChatError, ChatRepository, JoinOutcome, MessagePusher, RoomId, ServerEvent, SessionId,
};

/// Room 参加のユースケース
pub struct JoinRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ChatRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// Room への参加を実行
    ///
    /// # Arguments
    ///
    /// * `session_id` - 参加するセッション
    /// * `raw_room_id` - クライアントから届いた Room ID（未検証）
    ///
    /// # Returns
    ///
    /// * `Ok(JoinOutcome)` - 参加成功（通知は送信済み）
    /// * `Err(ChatError)` - 参加失敗（状態は変わらない）
    pub async fn execute(
        &self,
        session_id: &SessionId,
        raw_room_id: &str,
    ) -> Result<JoinOutcome, ChatError> {
        let room_id = RoomId::new(raw_room_id)
            .map_err(|_| ChatError::RoomUnknown(raw_room_id.trim().to_string()))?;

        // 1. Repository で退出と参加をまとめて適用
        let outcome = self.repository.join_room(session_id, &room_id).await?;

        // 2. 元の Room の残りの参加者に退出を通知
        if let Some(departure) = &outcome.departure {
            tracing::info!(
                "'{}' left room '{}' ({} remaining)",
                departure.name,
                departure.room_id,
                departure.occupant_count
            );
            self.broadcast(departure.audience.clone(), &ServerEvent::user_left(departure))
                .await;
        }

        // 3. 本人に Room のスナップショットを返信
        let joined = ServerEvent::JoinedRoom(outcome.snapshot.clone());
        if let Err(e) = self.message_pusher.push_to(session_id, &joined).await {
            tracing::warn!("Failed to push joined_room to '{}': {}", session_id, e);
        }

        // 4. 参加先の全員（本人を含む）に参加を通知
        tracing::info!(
            "'{}' joined room '{}' ({} occupants)",
            outcome.name,
            room_id,
            outcome.occupant_count
        );
        let user_joined = ServerEvent::UserJoined {
            name: outcome.name.clone(),
            room_id,
            occupant_count: outcome.occupant_count,
        };
        self.broadcast(outcome.audience.clone(), &user_joined).await;

        Ok(outcome)
    }

    async fn broadcast(&self, targets: Vec<SessionId>, event: &ServerEvent) {
        if let Err(e) = self.message_pusher.broadcast(targets, event).await {
            tracing::warn!("Failed to broadcast {}: {}", event.name(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::{
        connect, create_test_message_pusher, create_test_repository, drain, enter_room,
    };

    #[tokio::test]
    async fn test_join_room_first_time() {
        // テスト項目: 初めての join で joined_room と user_joined が本人に届く
        // given (前提条件):
        let repository = create_test_repository();
        let message_pusher = create_test_message_pusher();
        let (alice, mut rx) = connect(&repository, &message_pusher).await;
        repository.identify(&alice, "alice").await.unwrap();
        let usecase = JoinRoomUseCase::new(repository.clone(), message_pusher);

        // when (操作):
        let outcome = usecase.execute(&alice, "general").await.unwrap();

        // then (期待する結果):
        assert!(outcome.departure.is_none());
        assert_eq!(outcome.occupant_count, 1);
        let events = drain(&mut rx);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["event"], "joined_room");
        assert_eq!(events[0]["room_id"], "general");
        assert_eq!(events[0]["room_name"], "General");
        assert_eq!(events[0]["history"], serde_json::json!([]));
        assert_eq!(events[0]["occupants"], serde_json::json!(["alice"]));
        assert_eq!(events[1]["event"], "user_joined");
        assert_eq!(events[1]["occupant_count"], 1);
    }

    #[tokio::test]
    async fn test_join_room_notifies_existing_occupants() {
        // テスト項目: 既存の参加者にも更新後の参加者数で user_joined が届く
        // given (前提条件):
        let repository = create_test_repository();
        let message_pusher = create_test_message_pusher();
        let (_alice, mut alice_rx) =
            enter_room(&repository, &message_pusher, "alice", "general").await;
        let (bob, _bob_rx) = connect(&repository, &message_pusher).await;
        repository.identify(&bob, "bob").await.unwrap();
        let usecase = JoinRoomUseCase::new(repository, message_pusher);

        // when (操作):
        usecase.execute(&bob, "general").await.unwrap();

        // then (期待する結果):
        let events = drain(&mut alice_rx);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["event"], "user_joined");
        assert_eq!(events[0]["name"], "bob");
        assert_eq!(events[0]["occupant_count"], 2);
    }

    #[tokio::test]
    async fn test_switch_room_notifies_old_room() {
        // テスト項目: Room を移ると元の Room に user_left が届き、移動先だけが本人の Room になる
        // given (前提条件):
        let repository = create_test_repository();
        let message_pusher = create_test_message_pusher();
        let (_alice, mut alice_rx) =
            enter_room(&repository, &message_pusher, "alice", "general").await;
        let (bob, mut bob_rx) = enter_room(&repository, &message_pusher, "bob", "general").await;
        drain(&mut alice_rx);
        drain(&mut bob_rx);
        let usecase = JoinRoomUseCase::new(repository.clone(), message_pusher);

        // when (操作):
        let outcome = usecase.execute(&bob, "tech").await.unwrap();

        // then (期待する結果):
        let departure = outcome.departure.unwrap();
        assert_eq!(departure.room_id.as_str(), "general");
        assert_eq!(departure.occupant_count, 1);

        let alice_events = drain(&mut alice_rx);
        assert_eq!(alice_events.len(), 1);
        assert_eq!(alice_events[0]["event"], "user_left");
        assert_eq!(alice_events[0]["name"], "bob");
        assert_eq!(alice_events[0]["occupant_count"], 1);

        let bob_events = drain(&mut bob_rx);
        assert_eq!(bob_events[0]["event"], "joined_room");
        assert_eq!(bob_events[0]["room_id"], "tech");

        let session = repository.get_session(&bob).await.unwrap();
        assert_eq!(session.current_room.unwrap().as_str(), "tech");
    }

    #[tokio::test]
    async fn test_join_room_not_identified() {
        // テスト項目: 名前未設定のセッションは NotIdentified になり、状態は変わらない
        // given (前提条件):
        let repository = create_test_repository();
        let message_pusher = create_test_message_pusher();
        let (anon, mut rx) = connect(&repository, &message_pusher).await;
        let usecase = JoinRoomUseCase::new(repository.clone(), message_pusher);

        // when (操作):
        let result = usecase.execute(&anon, "general").await;

        // then (期待する結果):
        assert_eq!(result, Err(ChatError::NotIdentified));
        assert!(drain(&mut rx).is_empty());
        assert!(repository.get_session(&anon).await.unwrap().current_room.is_none());
    }

    #[tokio::test]
    async fn test_join_unknown_room_keeps_current_room() {
        // テスト項目: 存在しない Room への join は RoomUnknown になり、今いる Room に留まる
        // given (前提条件):
        let repository = create_test_repository();
        let message_pusher = create_test_message_pusher();
        let (alice, mut rx) = enter_room(&repository, &message_pusher, "alice", "general").await;
        drain(&mut rx);
        let usecase = JoinRoomUseCase::new(repository.clone(), message_pusher);

        // when (操作):
        let result = usecase.execute(&alice, "cooking").await;

        // then (期待する結果):
        assert_eq!(result, Err(ChatError::RoomUnknown("cooking".to_string())));
        assert!(drain(&mut rx).is_empty());
        let session = repository.get_session(&alice).await.unwrap();
        assert_eq!(session.current_room.unwrap().as_str(), "general");
    }

    #[tokio::test]
    async fn test_join_empty_room_id() {
        // テスト項目: 空の room_id は RoomUnknown として扱われる
        // given (前提条件):
        let repository = create_test_repository();
        let message_pusher = create_test_message_pusher();
        let (alice, _rx) = connect(&repository, &message_pusher).await;
        repository.identify(&alice, "alice").await.unwrap();
        let usecase = JoinRoomUseCase::new(repository, message_pusher);

        // when (操作):
        let result = usecase.execute(&alice, "  ").await;

        // then (期待する結果):
        assert_eq!(result, Err(ChatError::RoomUnknown(String::new())));
    }
}
