//! Hiroma multi-room chat relay server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroma-server
//! cargo run --bin hiroma-server -- --host 0.0.0.0 --port 3000 --room general=General
//! ```

use std::{collections::HashMap, sync::Arc};

use clap::Parser;
use hiroma_server::{
    config::ServerConfig,
    domain::{Lobby, RoomRegistry},
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryChatRepository},
    ui::Server,
    usecase::{EventRouter, GetRoomMessagesUseCase, ListRoomsUseCase},
};
use hiroma_shared::{logger::setup_logger, time::SystemClock};
use tokio::sync::Mutex;

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let config = ServerConfig::parse();

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. Create Repository (in-memory database)
    let rooms = RoomRegistry::provision(config.room_definitions());
    for room_id in rooms.room_ids() {
        tracing::info!("Room '{}' provisioned", room_id);
    }
    let lobby = Arc::new(Mutex::new(Lobby::new(rooms)));
    let repository = Arc::new(InMemoryChatRepository::new(lobby));

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher_clients = Arc::new(Mutex::new(HashMap::new()));
    let message_pusher = Arc::new(WebSocketMessagePusher::new(message_pusher_clients));

    // 3. Create UseCases
    let clock = Arc::new(SystemClock);
    let event_router = Arc::new(EventRouter::new(
        repository.clone(),
        message_pusher.clone(),
        clock.clone(),
    ));
    let list_rooms_usecase = Arc::new(ListRoomsUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let get_room_messages_usecase = Arc::new(GetRoomMessagesUseCase::new(repository.clone()));

    // 4. Create and run the server
    let server = Server::new(
        event_router,
        list_rooms_usecase,
        get_room_messages_usecase,
        clock,
    );
    if let Err(e) = server.run(config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
