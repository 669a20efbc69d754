use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use maud::html;
use serde::Deserialize;
use std::sync::Arc;

use crate::models::{
    Language, Move, MoveError, Placement, PlayerId, RoomError, RoomStatus, TileId,
};
use crate::rooms::Rooms;
use crate::service::GameService;

#[derive(Clone)]
pub struct AppState {
    pub rooms: Arc<Rooms>,
    pub service: Arc<GameService>,
    pub language: Language,
}

#[derive(Deserialize, Debug)]
pub struct JoinBody {
    pub name: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct NameBody {
    pub player_id: PlayerId,
    pub name: String,
}

/// Wire shape of a move request; decoded into a `Move` before it reaches
/// the engine.
#[derive(Deserialize, Debug)]
pub struct MoveBody {
    pub player_id: PlayerId,
    pub action: String,
    #[serde(default)]
    pub placements: Option<Vec<Placement>>,
    #[serde(default)]
    pub tile_ids: Option<Vec<TileId>>,
}

impl MoveBody {
    fn decode(&self) -> Option<Move> {
        match self.action.as_str() {
            "pass" => Some(Move::Pass),
            "exchange" => Some(Move::Exchange(self.tile_ids.clone().unwrap_or_default())),
            "play" => Some(Move::Place(self.placements.clone().unwrap_or_default())),
            _ => None,
        }
    }
}

fn error_body(status: StatusCode, code: &str) -> Response {
    (status, Json(serde_json::json!({ "error": code }))).into_response()
}

fn room_error(err: RoomError) -> Response {
    error_body(StatusCode::BAD_REQUEST, err.code())
}

fn move_error(err: &MoveError) -> Response {
    let mut body = serde_json::json!({ "error": err.code() });
    if let Some(word) = err.word() {
        body["word"] = serde_json::json!(word);
    }
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

fn room_not_found() -> Response {
    error_body(StatusCode::NOT_FOUND, "ROOM_NOT_FOUND")
}

pub struct Handle {}

impl Handle {
    pub async fn index() -> Html<String> {
        let markup = html! {
            (maud::DOCTYPE)
            html {
                head {
                    title { "Scrabble Server" }
                }
                body {
                    h1 { "Scrabble Server" }
                    p {
                        "POST /rooms to create a room, join it, start a game \
                         and play moves over the JSON API. Subscribe to \
                         /rooms/{code}/ws for live events."
                    }
                }
            }
        };
        Html(markup.into_string())
    }

    pub async fn create_room(
        State(state): State<AppState>,
        Json(body): Json<JoinBody>,
    ) -> Response {
        let (code, handle) = state.rooms.create().await;
        let mut room = handle.lock().await;
        match room.add_player(body.name) {
            Ok(player_id) => Json(serde_json::json!({
                "room": code,
                "player_id": player_id,
            }))
            .into_response(),
            Err(e) => {
                // do not leave an unjoinable room behind
                drop(room);
                state.rooms.remove(&code).await;
                room_error(e)
            }
        }
    }

    pub async fn join_room(
        Path(code): Path<String>,
        State(state): State<AppState>,
        Json(body): Json<JoinBody>,
    ) -> Response {
        let Some(handle) = state.rooms.get(&code).await else {
            return room_not_found();
        };
        let mut room = handle.lock().await;
        match room.add_player(body.name) {
            Ok(player_id) => {
                let name = room.player(&player_id).map(|p| p.name.clone());
                room.broadcast(
                    serde_json::json!({ "type": "player_joined", "name": name }).to_string(),
                );
                Json(serde_json::json!({
                    "room": code,
                    "player_id": player_id,
                }))
                .into_response()
            }
            Err(e) => room_error(e),
        }
    }

    pub async fn rename_player(
        Path(code): Path<String>,
        State(state): State<AppState>,
        Json(body): Json<NameBody>,
    ) -> Response {
        let Some(handle) = state.rooms.get(&code).await else {
            return room_not_found();
        };
        let mut room = handle.lock().await;
        match room.rename_player(&body.player_id, &body.name) {
            Ok(()) => {
                room.broadcast(
                    serde_json::json!({ "type": "player_renamed", "name": body.name })
                        .to_string(),
                );
                StatusCode::NO_CONTENT.into_response()
            }
            Err(e) => room_error(e),
        }
    }

    pub async fn start_game(
        Path(code): Path<String>,
        State(state): State<AppState>,
    ) -> Response {
        let Some(handle) = state.rooms.get(&code).await else {
            return room_not_found();
        };
        let mut room = handle.lock().await;
        if room.status == RoomStatus::Playing {
            return room_error(RoomError::AlreadyStarted);
        }
        if room.players.len() < 2 {
            return room_error(RoomError::NotEnoughPlayers);
        }
        match state.service.start_new_game(&mut room, state.language) {
            Ok(()) => {
                room.broadcast(serde_json::json!({ "type": "game_started" }).to_string());
                StatusCode::NO_CONTENT.into_response()
            }
            Err(e) => move_error(&e),
        }
    }

    pub async fn post_move(
        Path(code): Path<String>,
        State(state): State<AppState>,
        Json(body): Json<MoveBody>,
    ) -> Response {
        let Some(mv) = body.decode() else {
            return error_body(StatusCode::BAD_REQUEST, "UNKNOWN_ACTION");
        };
        let Some(handle) = state.rooms.get(&code).await else {
            return room_not_found();
        };
        let mut room = handle.lock().await;
        match state.service.play_move(&mut room, &body.player_id, mv).await {
            Ok(outcome) => {
                room.broadcast(outcome.event_json());
                Json(serde_json::json!({
                    "move": outcome.record,
                    "summary": outcome.record.summary(),
                    "ended": outcome.ended,
                }))
                .into_response()
            }
            Err(e) => move_error(&e),
        }
    }

    pub async fn get_state(
        Path((code, player_id)): Path<(String, String)>,
        State(state): State<AppState>,
    ) -> Response {
        let Some(handle) = state.rooms.get(&code).await else {
            return room_not_found();
        };
        let room = handle.lock().await;
        match room.snapshot_for(&PlayerId(player_id)) {
            Ok(snapshot) => Json(snapshot).into_response(),
            Err(e) => room_error(e),
        }
    }
}
