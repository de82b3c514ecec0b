//! Session Table
//!
//! 接続ごとのセッションを保持し、表示名の一意性を保証する唯一の場所。
//! 排他制御は呼び出し側（Repository）の責務で、この型自体は同期的な
//! 純粋ロジックのみを持つ。

use std::collections::HashMap;

use super::{
    entity::Session,
    error::ChatError,
    value_object::{DisplayName, RoomId, SessionId, Timestamp},
};

#[derive(Debug, Default)]
pub struct SessionTable {
    sessions: HashMap<SessionId, Session>,
}

impl SessionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 表示名・Room 未設定のセッションを作成する
    pub fn create(&mut self, connected_at: Timestamp) -> SessionId {
        let mut id = SessionId::generate();
        while self.sessions.contains_key(&id) {
            id = SessionId::generate();
        }
        self.sessions.insert(id, Session::new(id, connected_at));
        id
    }

    /// 表示名を設定する
    ///
    /// 検証順: 空文字 → セッション不明 → 設定済み → 重複。
    /// 同じ名前での再設定は成功扱いになる。
    pub fn set_display_name(
        &mut self,
        id: &SessionId,
        raw_name: &str,
    ) -> Result<DisplayName, ChatError> {
        let name = DisplayName::new(raw_name).map_err(|_| ChatError::NameEmpty)?;

        let current = self
            .sessions
            .get(id)
            .ok_or(ChatError::SessionUnknown)?
            .display_name
            .clone();
        match current {
            Some(existing) if existing == name => return Ok(existing),
            Some(_) => return Err(ChatError::AlreadyIdentified),
            None => {}
        }

        if self.is_name_taken(&name, id) {
            return Err(ChatError::NameTaken);
        }

        let session = self.sessions.get_mut(id).ok_or(ChatError::SessionUnknown)?;
        session.display_name = Some(name.clone());
        Ok(name)
    }

    /// 現在の Room を記録し、直前の Room を返す
    ///
    /// 直前の Room からの退出処理は呼び出し側が行う。
    pub fn bind(&mut self, id: &SessionId, room_id: RoomId) -> Result<Option<RoomId>, ChatError> {
        let session = self.sessions.get_mut(id).ok_or(ChatError::SessionUnknown)?;
        Ok(session.current_room.replace(room_id))
    }

    pub fn get(&self, id: &SessionId) -> Result<&Session, ChatError> {
        self.sessions.get(id).ok_or(ChatError::SessionUnknown)
    }

    /// セッションを削除し、最後の状態を返す
    pub fn remove(&mut self, id: &SessionId) -> Result<Session, ChatError> {
        self.sessions.remove(id).ok_or(ChatError::SessionUnknown)
    }

    /// 指定した Room に所属しているセッション ID（順序は不定）
    pub fn sessions_in_room(&self, room_id: &RoomId) -> Vec<SessionId> {
        self.sessions
            .values()
            .filter(|session| session.current_room.as_ref() == Some(room_id))
            .map(|session| session.id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn is_name_taken(&self, name: &DisplayName, except: &SessionId) -> bool {
        self.sessions
            .values()
            .any(|session| &session.id != except && session.display_name.as_ref() == Some(name))
    }
}
