//! WebSocket event DTOs.
//!
//! Every frame is a JSON object tagged by `event`, with the payload fields
//! flattened next to the tag:
//!
//! ```text
//! {"event":"identify","name":"alice"}
//! {"event":"user_joined","name":"alice","room_id":"general","occupant_count":1}
//! {"event":"rooms_list","general":{"name":"General","occupant_count":1,"message_count":0}}
//! ```
//!
//! `rooms_list` carries the room map itself as its payload, so a room id may
//! never be `event` (rejected when the rooms are configured).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Events sent by clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ClientMessage {
    Identify { name: String },
    Join { room_id: String },
    SendMessage { text: String },
    Typing { flag: bool },
    ListRooms,
}

/// Events sent by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ServerMessage {
    Identified {
        name: String,
    },
    JoinedRoom {
        room_id: String,
        room_name: String,
        history: Vec<MessageDto>,
        occupants: Vec<String>,
    },
    UserJoined {
        name: String,
        room_id: String,
        occupant_count: usize,
    },
    UserLeft {
        name: String,
        room_id: String,
        occupant_count: usize,
    },
    NewMessage(MessageDto),
    UserTyping {
        name: String,
        flag: bool,
    },
    /// Room ids are the top-level keys next to `event`
    RoomsList(BTreeMap<String, RoomSummaryDto>),
    Error {
        code: String,
        message: String,
    },
}

/// A chat message as rendered for clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDto {
    pub id: String,
    pub author: String,
    pub body: String,
    /// RFC 3339 (JST)
    pub sent_at: String,
    /// `%Y-%m-%d`
    pub date: String,
    /// `%H:%M:%S`
    pub time: String,
}

/// Per-room counters shown in room listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub name: String,
    pub occupant_count: usize,
    pub message_count: usize,
}
