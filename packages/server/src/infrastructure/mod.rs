//! Infrastructure 層
//!
//! ドメイン層の trait（`ChatRepository`, `MessagePusher`）の具体的な実装と、
//! ワイヤーフォーマット（DTO）を提供します。

pub mod dto;
pub mod message_pusher;
pub mod repository;
