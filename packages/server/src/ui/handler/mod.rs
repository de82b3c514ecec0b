//! Request handlers.

mod http;
mod websocket;

pub use http::{get_room_messages, get_rooms, health_check};
pub use websocket::websocket_handler;
