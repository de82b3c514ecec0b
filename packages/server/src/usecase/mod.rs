//! UseCase 層
//!
//! 1 つのクライアント操作につき 1 つのユースケースを置く。
//! 状態遷移は `ChatRepository` に、通知は `MessagePusher` に任せ、
//! ユースケースは「どのイベントを誰に送るか」だけを決める。

mod connect_session;
mod disconnect_session;
mod get_room_messages;
mod identify;
mod join_room;
mod list_rooms;
mod notify_typing;
mod router;
mod send_message;

#[cfg(test)]
mod test_support;

pub use connect_session::ConnectSessionUseCase;
pub use disconnect_session::DisconnectSessionUseCase;
pub use get_room_messages::GetRoomMessagesUseCase;
pub use identify::IdentifyUseCase;
pub use join_room::JoinRoomUseCase;
pub use list_rooms::ListRoomsUseCase;
pub use notify_typing::NotifyTypingUseCase;
pub use router::EventRouter;
pub use send_message::SendMessageUseCase;
