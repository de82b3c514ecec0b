//! UseCase: セッション接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectSessionUseCase::execute() メソッド
//! - セッションの作成と送信チャンネルの登録
//!
//! ### なぜこのテストが必要か
//! - 接続直後のセッションは名前も Room も持たない（Connected 状態）ことを保証
//! - 登録したチャンネルにイベントが届くことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規セッションの接続
//! - エッジケース：複数の接続がそれぞれ別のセッションになる

use std::sync::Arc;

use hiroma_shared::time::Clock;

use crate::domain::{ChatRepository, MessagePusher, PusherChannel, SessionId, Timestamp};

/// セッション接続のユースケース
pub struct ConnectSessionUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ChatRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// 接続時刻の取得
    clock: Arc<dyn Clock>,
}

impl ConnectSessionUseCase {
    /// 新しい ConnectSessionUseCase を作成
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

    /// セッション接続を実行
    ///
    /// # Arguments
    ///
    /// * `sender` - クライアントへのイベント送信用チャンネル
    ///
    /// # Returns
    ///
    /// 新しく採番されたセッション ID
    pub async fn execute(&self, sender: PusherChannel) -> SessionId {
        let connected_at = Timestamp::new(self.clock.now_millis());

        // 1. Repository にセッションを追加
        let session_id = self.repository.create_session(connected_at).await;

        // 2. MessagePusher に送信チャンネルを登録
        self.message_pusher.register_client(session_id, sender).await;

        session_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ServerEvent, SessionState},
        usecase::test_support::{create_test_message_pusher, create_test_repository},
    };
    use hiroma_shared::time::FixedClock;

    #[tokio::test]
    async fn test_connect_session_success() {
        // テスト項目: 新しいセッションが Connected 状態で作成される
        // given (前提条件):
        let repository = create_test_repository();
        let message_pusher = create_test_message_pusher();
        let usecase = ConnectSessionUseCase::new(
            repository.clone(),
            message_pusher,
            Arc::new(FixedClock::new(1672498800000)),
        );

        // when (操作):
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        let session_id = usecase.execute(tx).await;

        // then (期待する結果):
        let session = repository.get_session(&session_id).await.unwrap();
        assert_eq!(session.state(), SessionState::Connected);
        assert_eq!(session.connected_at, Timestamp::new(1672498800000));
        assert_eq!(repository.count_sessions().await, 1);
    }

    #[tokio::test]
    async fn test_connect_session_registers_channel() {
        // テスト項目: 接続したセッションに MessagePusher からイベントが届く
        // given (前提条件):
        let repository = create_test_repository();
        let message_pusher = create_test_message_pusher();
        let usecase = ConnectSessionUseCase::new(
            repository,
            message_pusher.clone(),
            Arc::new(FixedClock::new(0)),
        );
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let session_id = usecase.execute(tx).await;

        // when (操作):
        let event = ServerEvent::Error {
            code: "NotIdentified",
            message: "Please set a username first".to_string(),
        };
        message_pusher.push_to(&session_id, &event).await.unwrap();

        // then (期待する結果):
        assert!(rx.recv().await.unwrap().contains("NotIdentified"));
    }

    #[tokio::test]
    async fn test_each_connection_gets_its_own_session() {
        // テスト項目: 接続ごとに別のセッション ID が採番される
        // given (前提条件):
        let repository = create_test_repository();
        let usecase = ConnectSessionUseCase::new(
            repository.clone(),
            create_test_message_pusher(),
            Arc::new(FixedClock::new(0)),
        );

        // when (操作):
        let (tx1, _rx1) = tokio::sync::mpsc::unbounded_channel();
        let (tx2, _rx2) = tokio::sync::mpsc::unbounded_channel();
        let first = usecase.execute(tx1).await;
        let second = usecase.execute(tx2).await;

        // then (期待する結果):
        assert_ne!(first, second);
        assert_eq!(repository.count_sessions().await, 2);
    }
}
