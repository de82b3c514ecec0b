//! Entity 定義
//!
//! - `Session`: 1 接続につき 1 つ。表示名と現在の Room を保持する
//! - `Room`: 起動時に用意される固定の Room。参加者と履歴を保持する
//! - `ChatMessage`: 作成後は不変のチャットメッセージ

use std::collections::{BTreeSet, VecDeque};

use super::value_object::{DisplayName, MessageBody, MessageId, RoomId, SessionId, Timestamp};

/// Room ごとに保持するメッセージ履歴の上限
pub const HISTORY_CAPACITY: usize = 100;

/// join 時に返す履歴の件数
pub const JOIN_HISTORY_LIMIT: usize = 50;

/// セッションの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// 表示名なし、Room なし
    Connected,
    /// 表示名あり、Room なし
    Identified,
    /// 表示名あり、Room あり
    InRoom,
}

/// セッション Entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: SessionId,
    pub display_name: Option<DisplayName>,
    pub current_room: Option<RoomId>,
    pub connected_at: Timestamp,
}

impl Session {
    pub fn new(id: SessionId, connected_at: Timestamp) -> Self {
        Self {
            id,
            display_name: None,
            current_room: None,
            connected_at,
        }
    }

    pub fn state(&self) -> SessionState {
        match (&self.display_name, &self.current_room) {
            (Some(_), Some(_)) => SessionState::InRoom,
            (Some(_), None) => SessionState::Identified,
            (None, _) => SessionState::Connected,
        }
    }
}

/// チャットメッセージ Entity
///
/// どの Room に属するかはメッセージ自身では持たず、Room の履歴に
/// 含まれていることで表す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub author: DisplayName,
    pub body: MessageBody,
    pub sent_at: Timestamp,
}

impl ChatMessage {
    pub fn new(id: MessageId, author: DisplayName, body: MessageBody, sent_at: Timestamp) -> Self {
        Self {
            id,
            author,
            body,
            sent_at,
        }
    }
}

/// join したセッションに返す Room のスナップショット
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSnapshot {
    pub room_id: RoomId,
    pub room_name: String,
    pub history: Vec<ChatMessage>,
    pub occupants: Vec<DisplayName>,
}

/// Room 一覧に表示する集計値
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSummary {
    pub name: String,
    pub occupant_count: usize,
    pub message_count: usize,
}

/// Room Entity
#[derive(Debug, Clone)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    occupants: BTreeSet<DisplayName>,
    history: VecDeque<ChatMessage>,
    history_capacity: usize,
}

impl Room {
    pub fn new(id: RoomId, name: impl Into<String>) -> Self {
        Self::with_capacity(id, name, HISTORY_CAPACITY)
    }

    pub fn with_capacity(id: RoomId, name: impl Into<String>, history_capacity: usize) -> Self {
        Self {
            id,
            name: name.into(),
            occupants: BTreeSet::new(),
            history: VecDeque::with_capacity(history_capacity),
            history_capacity,
        }
    }

    /// 参加者を追加する。既に参加している場合は何もしない。
    ///
    /// 追加した場合に `true` を返す。
    pub fn add_occupant(&mut self, name: DisplayName) -> bool {
        self.occupants.insert(name)
    }

    /// 参加者を削除する。参加していない場合は何もしない。
    pub fn remove_occupant(&mut self, name: &DisplayName) -> bool {
        self.occupants.remove(name)
    }

    pub fn has_occupant(&self, name: &DisplayName) -> bool {
        self.occupants.contains(name)
    }

    pub fn occupants(&self) -> Vec<DisplayName> {
        self.occupants.iter().cloned().collect()
    }

    pub fn occupant_count(&self) -> usize {
        self.occupants.len()
    }

    /// 履歴にメッセージを追加する
    ///
    /// 上限を超えた場合は古いものから捨て、直近 `history_capacity` 件を残す。
    pub fn push_message(&mut self, message: ChatMessage) {
        self.history.push_back(message);
        while self.history.len() > self.history_capacity {
            self.history.pop_front();
        }
    }

    /// 直近 `limit` 件のメッセージ（古い順）
    pub fn recent_messages(&self, limit: usize) -> Vec<ChatMessage> {
        let skip = self.history.len().saturating_sub(limit);
        self.history.iter().skip(skip).cloned().collect()
    }

    pub fn message_count(&self) -> usize {
        self.history.len()
    }

    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            room_id: self.id.clone(),
            room_name: self.name.clone(),
            history: self.recent_messages(JOIN_HISTORY_LIMIT),
            occupants: self.occupants(),
        }
    }

    pub fn summary(&self) -> RoomSummary {
        RoomSummary {
            name: self.name.clone(),
            occupant_count: self.occupant_count(),
            message_count: self.message_count(),
        }
    }
}
