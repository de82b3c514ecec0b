//! Shared application state.

use std::sync::Arc;

use hiroma_shared::time::Clock;

use crate::usecase::{EventRouter, GetRoomMessagesUseCase, ListRoomsUseCase};

/// ハンドラ間で共有する状態
pub struct AppState {
    /// EventRouter（WebSocket のクライアント操作の振り分け）
    pub event_router: Arc<EventRouter>,
    /// ListRoomsUseCase（Room 一覧取得のユースケース）
    pub list_rooms_usecase: Arc<ListRoomsUseCase>,
    /// GetRoomMessagesUseCase（直近メッセージ取得のユースケース）
    pub get_room_messages_usecase: Arc<GetRoomMessagesUseCase>,
    /// ヘルスチェックの時刻
    pub clock: Arc<dyn Clock>,
}
