//! Server configuration.
//!
//! コマンドライン引数で指定し、省略時は環境変数、それもなければ既定値を使う。
//!
//! ```not_rust
//! hiroma-server --host 0.0.0.0 --port 3000 --room general=General --room dev="Dev Ops"
//! HIROMA_ROOMS="general=General,dev=Dev Ops" PORT=3000 hiroma-server
//! ```

use std::str::FromStr;

use clap::Parser;
use thiserror::Error;

use crate::domain::RoomId;

/// 既定で用意する Room
pub const DEFAULT_ROOMS: [(&str, &str); 3] = [
    ("general", "General"),
    ("tech", "Tech Talk"),
    ("random", "Random"),
];

/// 設定値のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Room spec '{0}' must be in the form id=Display Name")]
    MissingSeparator(String),

    #[error("Room spec '{0}' has an empty room id")]
    EmptyRoomId(String),

    #[error("Room id '{0}' is reserved")]
    ReservedRoomId(String),
}

/// `rooms_list` で room_id と並ぶタグ名のため Room ID には使えない
const RESERVED_ROOM_ID: &str = "event";

/// `id=Display Name` 形式の Room 定義
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSpec {
    pub id: RoomId,
    pub name: String,
}

impl FromStr for RoomSpec {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (id, name) = raw
            .split_once('=')
            .ok_or_else(|| ConfigError::MissingSeparator(raw.to_string()))?;
        let id = RoomId::new(id).map_err(|_| ConfigError::EmptyRoomId(raw.to_string()))?;
        if id.as_str() == RESERVED_ROOM_ID {
            return Err(ConfigError::ReservedRoomId(id.into_string()));
        }

        // 表示名が空なら ID をそのまま表示名にする
        let name = match name.trim() {
            "" => id.as_str().to_string(),
            name => name.to_string(),
        };

        Ok(Self { id, name })
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "hiroma-server")]
#[command(about = "Multi-room chat relay server over WebSocket", long_about = None)]
pub struct ServerConfig {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HIROMA_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Room to provision, as id=Display Name (repeatable)
    #[arg(
        short = 'r',
        long = "room",
        env = "HIROMA_ROOMS",
        value_delimiter = ','
    )]
    pub rooms: Vec<RoomSpec>,
}

impl ServerConfig {
    /// 起動時に用意する Room の一覧（指定がなければ既定の 3 部屋）
    pub fn room_definitions(&self) -> Vec<(RoomId, String)> {
        if self.rooms.is_empty() {
            return DEFAULT_ROOMS
                .iter()
                .filter_map(|(id, name)| RoomId::new(id).ok().map(|id| (id, name.to_string())))
                .collect();
        }

        self.rooms
            .iter()
            .map(|spec| (spec.id.clone(), spec.name.clone()))
            .collect()
    }
}
