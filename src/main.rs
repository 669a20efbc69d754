use axum::{
    routing::{get, post},
    Router,
};
use dotenv::dotenv;
use std::{env, net::SocketAddr, sync::Arc, time::Duration};

mod dictionary;
mod handlers;
mod models;
mod rooms;
mod service;

use dictionary::Dictionary;
use handlers::{AppState, Handle};
use models::Language;
use rooms::Rooms;
use service::GameService;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let turn_duration = env::var("TURN_DURATION_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or(models::Game::DEFAULT_TURN_DURATION);
    let dictionary_path = env::var("DICTIONARY_PATH")
        .unwrap_or_else(|_| "static/scrabble-dictionary.txt".to_string());
    let language = Language::from_env();

    let dictionary = Arc::new(Dictionary::new(&dictionary_path));
    let service = Arc::new(GameService::new(dictionary, turn_duration));
    let rooms = Arc::new(Rooms::new());

    // the turn clock force-passes any expired turn, once per second
    let _clock = rooms::spawn_turn_clock(Arc::clone(&rooms), Arc::clone(&service));

    let state = AppState {
        rooms,
        service,
        language,
    };

    let app = Router::new()
        .route("/", get(Handle::index))
        .route("/rooms", post(Handle::create_room))
        .route("/rooms/:code/join", post(Handle::join_room))
        .route("/rooms/:code/name", post(Handle::rename_player))
        .route("/rooms/:code/start", post(Handle::start_game))
        .route("/rooms/:code/move", post(Handle::post_move))
        .route("/rooms/:code/state/:player_id", get(Handle::get_state))
        .route("/rooms/:code/ws", get(handlers::ws_handler))
        .with_state(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
