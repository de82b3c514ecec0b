//! クライアントとサーバーの間でやり取りするイベント
//!
//! ドメイン層ではワイヤーフォーマットを意識せず、内容だけを表す。
//! JSON との変換は Infrastructure 層の DTO が担当する。

use std::collections::BTreeMap;

use super::{
    entity::{ChatMessage, RoomSnapshot, RoomSummary},
    error::ChatError,
    lobby::Departure,
    value_object::{DisplayName, RoomId},
};

/// クライアントから届く操作
///
/// 値はまだ検証されていない生の入力で、検証はユースケース側で行う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientAction {
    Identify { name: String },
    Join { room_id: String },
    SendMessage { text: String },
    Typing { flag: bool },
    ListRooms,
}

/// サーバーから送るイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    Identified {
        name: DisplayName,
    },
    JoinedRoom(RoomSnapshot),
    UserJoined {
        name: DisplayName,
        room_id: RoomId,
        occupant_count: usize,
    },
    UserLeft {
        name: DisplayName,
        room_id: RoomId,
        occupant_count: usize,
    },
    NewMessage(ChatMessage),
    UserTyping {
        name: DisplayName,
        flag: bool,
    },
    RoomsList(BTreeMap<RoomId, RoomSummary>),
    Error {
        code: &'static str,
        message: String,
    },
}

impl ServerEvent {
    /// ワイヤー上のイベント名
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::Identified { .. } => "identified",
            ServerEvent::JoinedRoom(_) => "joined_room",
            ServerEvent::UserJoined { .. } => "user_joined",
            ServerEvent::UserLeft { .. } => "user_left",
            ServerEvent::NewMessage(_) => "new_message",
            ServerEvent::UserTyping { .. } => "user_typing",
            ServerEvent::RoomsList(_) => "rooms_list",
            ServerEvent::Error { .. } => "error",
        }
    }

    pub fn user_left(departure: &Departure) -> Self {
        ServerEvent::UserLeft {
            name: departure.name.clone(),
            room_id: departure.room_id.clone(),
            occupant_count: departure.occupant_count,
        }
    }
}

impl From<&ChatError> for ServerEvent {
    fn from(error: &ChatError) -> Self {
        ServerEvent::Error {
            code: error.code(),
            message: error.to_string(),
        }
    }
}
