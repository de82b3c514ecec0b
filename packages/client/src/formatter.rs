//! Message formatting utilities for client display.

use std::collections::BTreeMap;

use hiroma_server::infrastructure::dto::websocket::{MessageDto, RoomSummaryDto, ServerMessage};

const RULE: &str = "============================================================";
const THIN_RULE: &str = "------------------------------------------------------------";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format any event received from the server
    ///
    /// # Arguments
    ///
    /// * `event` - The decoded server event
    /// * `me` - The current display name (to mark as "me"), if any
    pub fn format_event(event: &ServerMessage, me: Option<&str>) -> String {
        match event {
            ServerMessage::Identified { name } => Self::format_identified(name),
            ServerMessage::JoinedRoom {
                room_id,
                room_name,
                history,
                occupants,
            } => Self::format_joined_room(room_id, room_name, history, occupants, me),
            ServerMessage::UserJoined {
                name,
                room_id,
                occupant_count,
            } => Self::format_user_joined(name, room_id, *occupant_count),
            ServerMessage::UserLeft {
                name,
                room_id,
                occupant_count,
            } => Self::format_user_left(name, room_id, *occupant_count),
            ServerMessage::NewMessage(message) => Self::format_chat_message(message),
            ServerMessage::UserTyping { name, flag } => Self::format_typing(name, *flag),
            ServerMessage::RoomsList(rooms) => Self::format_rooms(rooms),
            ServerMessage::Error { code, message } => Self::format_error(code, message),
        }
    }

    pub fn format_identified(name: &str) -> String {
        format!("\nYou are now '{}'.\n", name)
    }

    /// Format the room snapshot showing occupants and recent history
    pub fn format_joined_room(
        room_id: &str,
        room_name: &str,
        history: &[MessageDto],
        occupants: &[String],
        me: Option<&str>,
    ) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n\n{}\n", RULE));
        output.push_str(&format!("#{} ({})\n", room_id, room_name));
        output.push_str("Occupants:\n");

        for occupant in occupants {
            let me_suffix = if Some(occupant.as_str()) == me {
                " (me)"
            } else {
                ""
            };
            output.push_str(&format!("  {}{}\n", occupant, me_suffix));
        }

        if history.is_empty() {
            output.push_str("(No messages yet)\n");
        } else {
            output.push_str("Recent messages:\n");
            for message in history {
                output.push_str(&format!(
                    "  [{} {}] @{}: {}\n",
                    message.date, message.time, message.author, message.body
                ));
            }
        }

        output.push_str(RULE);
        output.push('\n');
        output
    }

    pub fn format_user_joined(name: &str, room_id: &str, occupant_count: usize) -> String {
        format!(
            "\n+ {} joined #{} ({} online)\n",
            name, room_id, occupant_count
        )
    }

    pub fn format_user_left(name: &str, room_id: &str, occupant_count: usize) -> String {
        format!("\n- {} left #{} ({} online)\n", name, room_id, occupant_count)
    }

    /// Format a chat message
    pub fn format_chat_message(message: &MessageDto) -> String {
        format!(
            "\n\n{rule}\n\
             @{}: {}\n\
             sent at {} {}\n\
             {rule}\n",
            message.author,
            message.body,
            message.date,
            message.time,
            rule = THIN_RULE
        )
    }

    pub fn format_typing(name: &str, flag: bool) -> String {
        if flag {
            format!("\n{} is typing...\n", name)
        } else {
            format!("\n{} stopped typing\n", name)
        }
    }

    /// Format the room list as one line per room
    pub fn format_rooms(rooms: &BTreeMap<String, RoomSummaryDto>) -> String {
        let mut output = String::from("\nRooms:\n");
        if rooms.is_empty() {
            output.push_str("(No rooms)\n");
        }
        for (room_id, summary) in rooms {
            output.push_str(&format!(
                "  #{} {} - {} online, {} messages\n",
                room_id, summary.name, summary.occupant_count, summary.message_count
            ));
        }
        output
    }

    pub fn format_error(code: &str, message: &str) -> String {
        format!("\n! {} ({})\n", message, code)
    }

    /// Format a binary message notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\n← Received {} bytes of binary data\n", byte_count)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(author: &str, body: &str) -> MessageDto {
        MessageDto {
            id: "m-1".to_string(),
            author: author.to_string(),
            body: body.to_string(),
            sent_at: "2023-01-01T00:00:00+09:00".to_string(),
            date: "2023-01-01".to_string(),
            time: "00:00:00".to_string(),
        }
    }

    #[test]
    fn test_format_joined_room_empty_history() {
        // テスト項目: 履歴が空の場合、その旨が表示され自分にはマークが付く
        // given (前提条件):
        let occupants = vec!["alice".to_string(), "bob".to_string()];

        // when (操作):
        let result =
            MessageFormatter::format_joined_room("general", "General", &[], &occupants, Some("bob"));

        // then (期待する結果):
        assert!(result.contains("#general (General)"));
        assert!(result.contains("  alice\n"));
        assert!(result.contains("bob (me)"));
        assert!(result.contains("(No messages yet)"));
        assert!(result.contains(RULE));
    }

    #[test]
    fn test_format_joined_room_with_history() {
        // テスト項目: 履歴がある場合、日時と送信者付きで古い順に表示される
        // given (前提条件):
        let history = vec![message("alice", "first"), message("bob", "second")];

        // when (操作):
        let result = MessageFormatter::format_joined_room(
            "general",
            "General",
            &history,
            &["carol".to_string()],
            None,
        );

        // then (期待する結果):
        let first = result.find("@alice: first").unwrap();
        let second = result.find("@bob: second").unwrap();
        assert!(first < second);
        assert!(result.contains("[2023-01-01 00:00:00]"));
        assert!(!result.contains("(me)"));
    }

    #[test]
    fn test_format_presence() {
        // テスト項目: 参加・退出通知に Room と人数が表示される
        // given (前提条件):
        let joined = ServerMessage::UserJoined {
            name: "bob".to_string(),
            room_id: "general".to_string(),
            occupant_count: 2,
        };
        let left = ServerMessage::UserLeft {
            name: "bob".to_string(),
            room_id: "general".to_string(),
            occupant_count: 1,
        };

        // when (操作):
        let joined = MessageFormatter::format_event(&joined, Some("alice"));
        let left = MessageFormatter::format_event(&left, Some("alice"));

        // then (期待する結果):
        assert_eq!(joined, "\n+ bob joined #general (2 online)\n");
        assert_eq!(left, "\n- bob left #general (1 online)\n");
    }

    #[test]
    fn test_format_chat_message() {
        // テスト項目: チャットメッセージが送信者と時刻付きで表示される
        // given (前提条件):
        let event = ServerMessage::NewMessage(message("alice", "Hello, world!"));

        // when (操作):
        let result = MessageFormatter::format_event(&event, None);

        // then (期待する結果):
        assert!(result.contains("@alice: Hello, world!"));
        assert!(result.contains("sent at 2023-01-01 00:00:00"));
        assert!(result.contains(THIN_RULE));
    }

    #[test]
    fn test_format_typing() {
        // テスト項目: 入力中・入力終了がそれぞれ表示される
        // given (前提条件):
        let name = "bob";

        // when (操作):
        let on = MessageFormatter::format_typing(name, true);
        let off = MessageFormatter::format_typing(name, false);

        // then (期待する結果):
        assert!(on.contains("bob is typing"));
        assert!(off.contains("bob stopped typing"));
    }

    #[test]
    fn test_format_rooms() {
        // テスト項目: Room 一覧が 1 行に 1 部屋ずつ表示される
        // given (前提条件):
        let mut rooms = BTreeMap::new();
        rooms.insert(
            "general".to_string(),
            RoomSummaryDto {
                name: "General".to_string(),
                occupant_count: 2,
                message_count: 10,
            },
        );

        // when (操作):
        let result = MessageFormatter::format_rooms(&rooms);

        // then (期待する結果):
        assert!(result.contains("#general General - 2 online, 10 messages"));
    }

    #[test]
    fn test_format_error() {
        // テスト項目: エラーがメッセージとコード付きで表示される
        // given (前提条件):
        let event = ServerMessage::Error {
            code: "NotInRoom".to_string(),
            message: "Please join a room first".to_string(),
        };

        // when (操作):
        let result = MessageFormatter::format_event(&event, None);

        // then (期待する結果):
        assert_eq!(result, "\n! Please join a room first (NotInRoom)\n");
    }

    #[test]
    fn test_format_raw_and_binary() {
        // テスト項目: 解釈できないテキストとバイナリの受信が表示される
        // given (前提条件):
        let text = "unknown message format";

        // when (操作):
        let raw = MessageFormatter::format_raw_message(text);
        let binary = MessageFormatter::format_binary_message(1024);

        // then (期待する結果):
        assert!(raw.contains("Received: unknown message format"));
        assert!(binary.contains("1024 bytes"));
    }
}
