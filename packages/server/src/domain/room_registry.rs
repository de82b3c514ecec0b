//! Room Registry
//!
//! 起動時に用意された固定の Room 群。実行中に Room が増減することはない。

use std::collections::BTreeMap;

use super::{
    entity::{ChatMessage, Room, RoomSnapshot, RoomSummary},
    error::ChatError,
    value_object::{DisplayName, RoomId},
};

#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: BTreeMap<RoomId, Room>,
}

impl RoomRegistry {
    /// `(room_id, 表示名)` の組から Room を用意する
    ///
    /// 同じ ID が複数回現れた場合は後のものが優先される。
    pub fn provision(definitions: impl IntoIterator<Item = (RoomId, String)>) -> Self {
        Self::from_rooms(
            definitions
                .into_iter()
                .map(|(id, name)| Room::new(id, name)),
        )
    }

    /// 作成済みの Room から作成する（履歴上限を Room ごとに変えられる）
    pub fn from_rooms(rooms: impl IntoIterator<Item = Room>) -> Self {
        let rooms = rooms.into_iter().map(|room| (room.id.clone(), room)).collect();
        Self { rooms }
    }

    pub fn contains(&self, room_id: &RoomId) -> bool {
        self.rooms.contains_key(room_id)
    }

    /// 参加者を追加し、join したセッションに返すスナップショットを返す
    pub fn join(
        &mut self,
        room_id: &RoomId,
        name: DisplayName,
    ) -> Result<RoomSnapshot, ChatError> {
        let room = self.room_mut(room_id)?;
        room.add_occupant(name);
        Ok(room.snapshot())
    }

    /// 参加者を削除し、残りの参加者数を返す（参加していなくてもエラーにしない）
    pub fn leave(&mut self, room_id: &RoomId, name: &DisplayName) -> Result<usize, ChatError> {
        let room = self.room_mut(room_id)?;
        room.remove_occupant(name);
        Ok(room.occupant_count())
    }

    /// 履歴にメッセージを追加する（上限を超えた分は古い順に捨てられる）
    pub fn append_message(
        &mut self,
        room_id: &RoomId,
        message: ChatMessage,
    ) -> Result<(), ChatError> {
        self.room_mut(room_id)?.push_message(message);
        Ok(())
    }

    pub fn snapshot(&self) -> BTreeMap<RoomId, RoomSummary> {
        self.rooms
            .iter()
            .map(|(id, room)| (id.clone(), room.summary()))
            .collect()
    }

    /// 直近 `limit` 件のメッセージ（古い順）
    pub fn recent_history(
        &self,
        room_id: &RoomId,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, ChatError> {
        Ok(self.room(room_id)?.recent_messages(limit))
    }

    pub fn occupant_count(&self, room_id: &RoomId) -> Result<usize, ChatError> {
        Ok(self.room(room_id)?.occupant_count())
    }

    pub fn occupants(&self, room_id: &RoomId) -> Result<Vec<DisplayName>, ChatError> {
        Ok(self.room(room_id)?.occupants())
    }

    pub fn room_ids(&self) -> Vec<RoomId> {
        self.rooms.keys().cloned().collect()
    }

    fn room(&self, room_id: &RoomId) -> Result<&Room, ChatError> {
        self.rooms
            .get(room_id)
            .ok_or_else(|| ChatError::RoomUnknown(room_id.as_str().to_string()))
    }

    fn room_mut(&mut self, room_id: &RoomId) -> Result<&mut Room, ChatError> {
        self.rooms
            .get_mut(room_id)
            .ok_or_else(|| ChatError::RoomUnknown(room_id.as_str().to_string()))
    }
}
