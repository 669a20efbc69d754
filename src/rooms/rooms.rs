//! Room registry and the turn clock. Each room is its own lockable unit;
//! the registry lock only guards the map and is never held across a move.

use rand::seq::SliceRandom;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::models::{Move, Room, RoomStatus};
use crate::service::GameService;

// no lookalike characters in room codes
const ROOM_CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const ROOM_CODE_LEN: usize = 4;

fn room_code() -> String {
    let mut rng = rand::thread_rng();
    (0..ROOM_CODE_LEN)
        .map(|_| *ROOM_CODE_ALPHABET.choose(&mut rng).unwrap_or(&b'A') as char)
        .collect()
}

#[derive(Debug, Default)]
pub struct Rooms {
    inner: Mutex<HashMap<String, Arc<Mutex<Room>>>>,
}

impl Rooms {
    pub fn new() -> Self {
        Rooms {
            inner: Mutex::new(HashMap::new()),
        }
    }

    pub async fn create(&self) -> (String, Arc<Mutex<Room>>) {
        let mut map = self.inner.lock().await;
        let code = loop {
            let candidate = room_code();
            if !map.contains_key(&candidate) {
                break candidate;
            }
        };
        let room = Arc::new(Mutex::new(Room::new(code.clone())));
        map.insert(code.clone(), Arc::clone(&room));
        (code, room)
    }

    pub async fn get(&self, code: &str) -> Option<Arc<Mutex<Room>>> {
        self.inner.lock().await.get(code).cloned()
    }

    pub async fn remove(&self, code: &str) {
        self.inner.lock().await.remove(code);
    }

    /// Handles to every room, for the clock sweep. Cloned out so the map
    /// lock is released before any room lock is taken.
    pub async fn handles(&self) -> Vec<Arc<Mutex<Room>>> {
        self.inner.lock().await.values().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }
}

/// One pass of the turn clock. Any playing room whose deadline has elapsed
/// gets a pass forced on the active player, through the same serialized
/// commit path as a client move.
pub async fn sweep_expired_turns(rooms: &Rooms, service: &GameService) {
    let now = SystemTime::now();
    for handle in rooms.handles().await {
        let mut room = handle.lock().await;
        if room.status != RoomStatus::Playing {
            continue;
        }
        let expired = room
            .game
            .as_ref()
            .map_or(false, |game| game.deadline_elapsed(now));
        if !expired {
            continue;
        }
        let Some(active) = room.game.as_ref().map(|g| g.active_player_id.clone()) else {
            continue;
        };
        match service.play_move(&mut room, &active, Move::Pass).await {
            Ok(outcome) => room.broadcast(outcome.event_json()),
            Err(e) => eprintln!("Forced pass failed in room {}: {}", room.code, e),
        }
    }
}

pub fn spawn_turn_clock(rooms: Arc<Rooms>, service: Arc<GameService>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(1));
        loop {
            ticker.tick().await;
            sweep_expired_turns(&rooms, &service).await;
        }
    })
}
