//! HTTP API endpoint handlers.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use hiroma_shared::time::timestamp_to_rfc3339;

use crate::{
    domain::ChatError,
    infrastructure::dto::{
        http::{ErrorDto, HealthDto, HistoryQuery, RoomMessagesDto},
        websocket::{MessageDto, RoomSummaryDto},
    },
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthDto> {
    Json(HealthDto {
        status: "healthy".to_string(),
        service: "hiroma".to_string(),
        timestamp: timestamp_to_rfc3339(state.clock.now_millis()),
    })
}

/// Get list of rooms
pub async fn get_rooms(
    State(state): State<Arc<AppState>>,
) -> Json<BTreeMap<String, RoomSummaryDto>> {
    let rooms = state.list_rooms_usecase.execute().await;

    // Domain Model から DTO への変換
    let rooms = rooms
        .iter()
        .map(|(id, summary)| (id.as_str().to_string(), summary.into()))
        .collect();

    Json(rooms)
}

/// Get recent messages of a room
pub async fn get_room_messages(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<RoomMessagesDto>, (StatusCode, Json<ErrorDto>)> {
    match state
        .get_room_messages_usecase
        .execute(&room_id, query.limit)
        .await
    {
        Ok(messages) => Ok(Json(RoomMessagesDto {
            messages: messages.iter().map(MessageDto::from).collect(),
        })),
        Err(ChatError::RoomUnknown(_)) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorDto {
                error: "Room not found".to_string(),
            }),
        )),
        Err(e) => {
            tracing::error!("Failed to read history of '{}': {}", room_id, e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorDto {
                    error: e.to_string(),
                }),
            ))
        }
    }
}
