use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures::{sink::SinkExt, stream::StreamExt};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::handlers::AppState;
use crate::models::Room;

/// Upgrades to a per-room event feed: whatever the room broadcasts goes out
/// to every subscriber until the client hangs up.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Response {
    match state.rooms.get(&code).await {
        Some(room) => ws.on_upgrade(move |socket| room_feed(socket, room)),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn room_feed(ws: WebSocket, room: Arc<Mutex<Room>>) {
    let (mut tx, _) = ws.split();
    let mut events = {
        let room = room.lock().await;
        room.tx.subscribe()
    };

    while let Ok(event) = events.recv().await {
        if tx.send(Message::Text(event)).await.is_err() {
            break;
        }
    }
}
