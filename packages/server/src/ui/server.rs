//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use hiroma_shared::time::Clock;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::usecase::{EventRouter, GetRoomMessagesUseCase, ListRoomsUseCase};

use super::{
    handler::{get_room_messages, get_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Multi-room chat relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(event_router, list_rooms_usecase, get_room_messages_usecase, clock);
/// server.run("127.0.0.1".to_string(), 5000).await?;
/// ```
pub struct Server {
    /// EventRouter（WebSocket のクライアント操作の振り分け）
    event_router: Arc<EventRouter>,
    /// ListRoomsUseCase（Room 一覧取得のユースケース）
    list_rooms_usecase: Arc<ListRoomsUseCase>,
    /// GetRoomMessagesUseCase（直近メッセージ取得のユースケース）
    get_room_messages_usecase: Arc<GetRoomMessagesUseCase>,
    clock: Arc<dyn Clock>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(
        event_router: Arc<EventRouter>,
        list_rooms_usecase: Arc<ListRoomsUseCase>,
        get_room_messages_usecase: Arc<GetRoomMessagesUseCase>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            event_router,
            list_rooms_usecase,
            get_room_messages_usecase,
            clock,
        }
    }

    /// Build the axum application with all routes
    pub fn app(self) -> Router {
        let app_state = Arc::new(AppState {
            event_router: self.event_router,
            list_rooms_usecase: self.list_rooms_usecase,
            get_room_messages_usecase: self.get_room_messages_usecase,
            clock: self.clock,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/", get(health_check))
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .route("/api/rooms/{room_id}/messages", get(get_room_messages))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, self.app())
            .with_graceful_shutdown(shutdown)
            .await
    }

    /// Run the chat server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 5000)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Hiroma chat server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
