//! Lobby 集約
//!
//! Session Table と Room Registry をまとめて扱う集約ルート。
//! connect → identify → join → message/typing → leave/disconnect の状態遷移を
//! 1 回のメソッド呼び出しで完結させ、Room の参加者集合が
//! 「その Room に bind されているセッションの表示名の集合」と常に一致するようにする。
//!
//! 各遷移は通知先のセッション ID も同時に返す。通知先を同じ排他区間で
//! 決めることで、並行する join / disconnect による取りこぼしを防ぐ。

use std::collections::BTreeMap;

use super::{
    entity::{ChatMessage, RoomSnapshot, RoomSummary, Session},
    error::{ChatError, ValueObjectError},
    room_registry::RoomRegistry,
    session_table::SessionTable,
    value_object::{DisplayName, MessageBody, MessageId, RoomId, SessionId, Timestamp},
};

/// Room から抜けたことの通知内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub name: DisplayName,
    pub room_id: RoomId,
    /// 退出後の参加者数
    pub occupant_count: usize,
    /// 退出した Room に残っているセッション
    pub audience: Vec<SessionId>,
}

/// join の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    pub name: DisplayName,
    /// 直前の Room からの暗黙の退出
    pub departure: Option<Departure>,
    pub snapshot: RoomSnapshot,
    /// join 後の参加者数
    pub occupant_count: usize,
    /// join した Room の全セッション（本人を含む）
    pub audience: Vec<SessionId>,
}

/// 投稿されたメッセージと配信先
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub message: ChatMessage,
    /// Room の全セッション（送信者を含む）
    pub audience: Vec<SessionId>,
}

/// 入力中通知と配信先
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingNotice {
    pub name: DisplayName,
    /// 送信者以外の Room のセッション
    pub audience: Vec<SessionId>,
}

#[derive(Debug, Default)]
pub struct Lobby {
    sessions: SessionTable,
    rooms: RoomRegistry,
}

impl Lobby {
    pub fn new(rooms: RoomRegistry) -> Self {
        Self {
            sessions: SessionTable::new(),
            rooms,
        }
    }

    pub fn connect(&mut self, connected_at: Timestamp) -> SessionId {
        self.sessions.create(connected_at)
    }

    pub fn identify(&mut self, id: &SessionId, raw_name: &str) -> Result<DisplayName, ChatError> {
        self.sessions.set_display_name(id, raw_name)
    }

    pub fn join(&mut self, id: &SessionId, room_id: &RoomId) -> Result<JoinOutcome, ChatError> {
        let name = self.identified_name(id)?;
        if !self.rooms.contains(room_id) {
            return Err(ChatError::RoomUnknown(room_id.as_str().to_string()));
        }

        let departure = match self.sessions.bind(id, room_id.clone())? {
            Some(previous) => Some(self.release(&previous, &name)?),
            None => None,
        };

        let snapshot = self.rooms.join(room_id, name.clone())?;
        let occupant_count = snapshot.occupants.len();
        let audience = self.audience(room_id, None);

        Ok(JoinOutcome {
            name,
            departure,
            snapshot,
            occupant_count,
            audience,
        })
    }

    /// メッセージを投稿する
    ///
    /// 空白のみの本文は何もせず `Ok(None)` を返す。
    pub fn post_message(
        &mut self,
        id: &SessionId,
        text: &str,
        message_id: MessageId,
        sent_at: Timestamp,
    ) -> Result<Option<Delivery>, ChatError> {
        let (author, room_id) = self.bound_room(id)?;

        let body = match MessageBody::new(text) {
            Ok(body) => body,
            Err(ValueObjectError::MessageBodyTooLong { length, max }) => {
                return Err(ChatError::MessageTooLong { length, max });
            }
            Err(_) => return Ok(None),
        };

        let message = ChatMessage::new(message_id, author, body, sent_at);
        self.rooms.append_message(&room_id, message.clone())?;
        let audience = self.audience(&room_id, None);

        Ok(Some(Delivery { message, audience }))
    }

    pub fn typing(&self, id: &SessionId) -> Result<TypingNotice, ChatError> {
        let (name, room_id) = self.bound_room(id)?;
        let audience = self.audience(&room_id, Some(id));
        Ok(TypingNotice { name, audience })
    }

    /// セッションを削除する。Room に入っていた場合は退出も行う。
    pub fn disconnect(&mut self, id: &SessionId) -> Result<Option<Departure>, ChatError> {
        let session = self.sessions.remove(id)?;
        match session {
            Session {
                display_name: Some(name),
                current_room: Some(room_id),
                ..
            } => Ok(Some(self.release(&room_id, &name)?)),
            _ => Ok(None),
        }
    }

    pub fn session(&self, id: &SessionId) -> Result<Session, ChatError> {
        self.sessions.get(id).cloned()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn list_rooms(&self) -> BTreeMap<RoomId, RoomSummary> {
        self.rooms.snapshot()
    }

    pub fn recent_history(
        &self,
        room_id: &RoomId,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, ChatError> {
        self.rooms.recent_history(room_id, limit)
    }

    fn identified_name(&self, id: &SessionId) -> Result<DisplayName, ChatError> {
        self.sessions
            .get(id)?
            .display_name
            .clone()
            .ok_or(ChatError::NotIdentified)
    }

    fn bound_room(&self, id: &SessionId) -> Result<(DisplayName, RoomId), ChatError> {
        let session = self.sessions.get(id)?;
        let name = session
            .display_name
            .clone()
            .ok_or(ChatError::NotIdentified)?;
        let room_id = session.current_room.clone().ok_or(ChatError::NotInRoom)?;
        Ok((name, room_id))
    }

    fn release(&mut self, room_id: &RoomId, name: &DisplayName) -> Result<Departure, ChatError> {
        let occupant_count = self.rooms.leave(room_id, name)?;
        Ok(Departure {
            name: name.clone(),
            room_id: room_id.clone(),
            occupant_count,
            audience: self.audience(room_id, None),
        })
    }

    fn audience(&self, room_id: &RoomId, exclude: Option<&SessionId>) -> Vec<SessionId> {
        let mut targets: Vec<SessionId> = self
            .sessions
            .sessions_in_room(room_id)
            .into_iter()
            .filter(|target| Some(target) != exclude)
            .collect();
        targets.sort();
        targets
    }

    /// 各 Room の参加者集合が bind 済みセッションの表示名と一致しているか
    #[cfg(test)]
    pub(crate) fn membership_is_consistent(&self) -> bool {
        self.rooms.room_ids().iter().all(|room_id| {
            let mut expected: Vec<DisplayName> = self
                .sessions
                .sessions_in_room(room_id)
                .iter()
                .filter_map(|id| self.sessions.get(id).ok()?.display_name.clone())
                .collect();
            expected.sort();
            self.rooms.occupants(room_id).ok() == Some(expected)
        })
    }
}
