//! ドメイン層のエラー定義

use thiserror::Error;

/// Value Object の生成時エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("display name cannot be empty")]
    DisplayNameEmpty,

    #[error("room id cannot be empty")]
    RoomIdEmpty,

    #[error("message body cannot be empty")]
    MessageBodyEmpty,

    #[error("message body is {length} characters long (max {max})")]
    MessageBodyTooLong { length: usize, max: usize },
}

/// チャット操作のエラー
///
/// いずれもクライアント側で回復可能なエラーで、要求元の接続にのみ
/// `error` イベントとして通知される。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("Username cannot be empty")]
    NameEmpty,

    #[error("Username already taken")]
    NameTaken,

    #[error("Username is already set for this session")]
    AlreadyIdentified,

    #[error("User session not found. Please refresh the page.")]
    SessionUnknown,

    #[error("Room not found: {0}")]
    RoomUnknown(String),

    #[error("Please set a username first")]
    NotIdentified,

    #[error("Please join a room first")]
    NotInRoom,

    #[error("Message is too long ({length} characters, max {max})")]
    MessageTooLong { length: usize, max: usize },

    #[error("Malformed event: {0}")]
    MalformedEvent(String),
}

impl ChatError {
    /// `error` イベントの `code` フィールドに載せるエラー種別名
    pub fn code(&self) -> &'static str {
        match self {
            ChatError::NameEmpty => "NameEmpty",
            ChatError::NameTaken => "NameTaken",
            ChatError::AlreadyIdentified => "AlreadyIdentified",
            ChatError::SessionUnknown => "SessionUnknown",
            ChatError::RoomUnknown(_) => "RoomUnknown",
            ChatError::NotIdentified => "NotIdentified",
            ChatError::NotInRoom => "NotInRoom",
            ChatError::MessageTooLong { .. } => "MessageTooLong",
            ChatError::MalformedEvent(_) => "MalformedEvent",
        }
    }
}

/// MessagePusher のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("Client '{0}' is not registered")]
    ClientNotFound(String),

    #[error("Failed to push message: {0}")]
    PushFailed(String),

    #[error("Failed to encode event: {0}")]
    EncodeFailed(String),
}
