//! Conversion logic between DTOs and domain types.

use hiroma_shared::time::{timestamp_to_display, timestamp_to_rfc3339};

use crate::domain::{ChatMessage, ClientAction, RoomSummary, ServerEvent};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// DTO → Domain
// ========================================

impl From<dto::ClientMessage> for ClientAction {
    fn from(message: dto::ClientMessage) -> Self {
        match message {
            dto::ClientMessage::Identify { name } => ClientAction::Identify { name },
            dto::ClientMessage::Join { room_id } => ClientAction::Join { room_id },
            dto::ClientMessage::SendMessage { text } => ClientAction::SendMessage { text },
            dto::ClientMessage::Typing { flag } => ClientAction::Typing { flag },
            dto::ClientMessage::ListRooms => ClientAction::ListRooms,
        }
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<&ChatMessage> for dto::MessageDto {
    fn from(message: &ChatMessage) -> Self {
        let sent_at = message.sent_at.value();
        let (date, time) = timestamp_to_display(sent_at);
        Self {
            id: message.id.to_string(),
            author: message.author.as_str().to_string(),
            body: message.body.as_str().to_string(),
            sent_at: timestamp_to_rfc3339(sent_at),
            date,
            time,
        }
    }
}

impl From<&RoomSummary> for dto::RoomSummaryDto {
    fn from(summary: &RoomSummary) -> Self {
        Self {
            name: summary.name.clone(),
            occupant_count: summary.occupant_count,
            message_count: summary.message_count,
        }
    }
}

impl From<&ServerEvent> for dto::ServerMessage {
    fn from(event: &ServerEvent) -> Self {
        match event {
            ServerEvent::Identified { name } => dto::ServerMessage::Identified {
                name: name.as_str().to_string(),
            },
            ServerEvent::JoinedRoom(snapshot) => dto::ServerMessage::JoinedRoom {
                room_id: snapshot.room_id.as_str().to_string(),
                room_name: snapshot.room_name.clone(),
                history: snapshot.history.iter().map(dto::MessageDto::from).collect(),
                occupants: snapshot
                    .occupants
                    .iter()
                    .map(|name| name.as_str().to_string())
                    .collect(),
            },
            ServerEvent::UserJoined {
                name,
                room_id,
                occupant_count,
            } => dto::ServerMessage::UserJoined {
                name: name.as_str().to_string(),
                room_id: room_id.as_str().to_string(),
                occupant_count: *occupant_count,
            },
            ServerEvent::UserLeft {
                name,
                room_id,
                occupant_count,
            } => dto::ServerMessage::UserLeft {
                name: name.as_str().to_string(),
                room_id: room_id.as_str().to_string(),
                occupant_count: *occupant_count,
            },
            ServerEvent::NewMessage(message) => dto::ServerMessage::NewMessage(message.into()),
            ServerEvent::UserTyping { name, flag } => dto::ServerMessage::UserTyping {
                name: name.as_str().to_string(),
                flag: *flag,
            },
            ServerEvent::RoomsList(rooms) => dto::ServerMessage::RoomsList(
                rooms
                    .iter()
                    .map(|(id, summary)| (id.as_str().to_string(), summary.into()))
                    .collect(),
            ),
            ServerEvent::Error { code, message } => dto::ServerMessage::Error {
                code: code.to_string(),
                message: message.clone(),
            },
        }
    }
}
