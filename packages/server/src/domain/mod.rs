//! ドメイン層
//!
//! Value Object・Entity・集約（Lobby）と、外部への依存を表す trait
//! （`ChatRepository`, `MessagePusher`）を定義します。

pub mod entity;
pub mod error;
pub mod event;
pub mod lobby;
pub mod message_pusher;
pub mod repository;
pub mod room_registry;
pub mod session_table;
pub mod value_object;

pub use entity::{
    ChatMessage, HISTORY_CAPACITY, JOIN_HISTORY_LIMIT, Room, RoomSnapshot, RoomSummary, Session,
    SessionState,
};
pub use error::{ChatError, MessagePushError, ValueObjectError};
pub use event::{ClientAction, ServerEvent};
pub use lobby::{Delivery, Departure, JoinOutcome, Lobby, TypingNotice};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::ChatRepository;
pub use room_registry::RoomRegistry;
pub use session_table::SessionTable;
pub use value_object::{
    DisplayName, MAX_MESSAGE_LENGTH, MessageBody, MessageId, RoomId, SessionId, Timestamp,
};
