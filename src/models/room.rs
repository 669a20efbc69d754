use serde::Serialize;
use std::fmt;
use tokio::sync::broadcast;

use crate::models::{
    unix_millis, Game, GameSnapshot, MoveRecord, Player, PlayerId, PlayerPublic, SnapshotCell,
};

pub const MAX_PLAYERS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Lobby,
    Playing,
    Finished,
}

/// Room lifecycle failures, outside the move taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomError {
    RoomFull,
    AlreadyStarted,
    NotEnoughPlayers,
    InvalidName,
    PlayerNotInRoom,
    NoGame,
}

impl RoomError {
    pub fn code(&self) -> &'static str {
        match self {
            RoomError::RoomFull => "ROOM_FULL",
            RoomError::AlreadyStarted => "ALREADY_STARTED",
            RoomError::NotEnoughPlayers => "NOT_ENOUGH_PLAYERS",
            RoomError::InvalidName => "INVALID_NAME",
            RoomError::PlayerNotInRoom => "PLAYER_NOT_IN_ROOM",
            RoomError::NoGame => "NO_GAME",
        }
    }
}

impl fmt::Display for RoomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::error::Error for RoomError {}

/// One room: an ordered player list, at most one game, and a broadcast
/// channel feeding the room's WebSocket subscribers.
#[derive(Debug)]
pub struct Room {
    pub code: String,
    pub players: Vec<Player>,
    pub status: RoomStatus,
    pub game: Option<Game>,
    pub tx: broadcast::Sender<String>,
}

impl Room {
    pub fn new(code: String) -> Self {
        let (tx, _) = broadcast::channel(32);
        Self {
            code,
            players: Vec::new(),
            status: RoomStatus::Lobby,
            game: None,
            tx,
        }
    }

    /// Adds a player while the room is still in the lobby. A provided name
    /// must be 1-12 alphanumeric characters; omitted names get a pseudonym.
    pub fn add_player(&mut self, name: Option<String>) -> Result<PlayerId, RoomError> {
        if self.status != RoomStatus::Lobby {
            return Err(RoomError::AlreadyStarted);
        }
        if self.players.len() >= MAX_PLAYERS {
            return Err(RoomError::RoomFull);
        }
        if let Some(ref name) = name {
            if !valid_name(name) {
                return Err(RoomError::InvalidName);
            }
        }
        let player = Player::new(name);
        let id = player.id.clone();
        self.players.push(player);
        Ok(id)
    }

    pub fn rename_player(&mut self, id: &PlayerId, name: &str) -> Result<(), RoomError> {
        if !valid_name(name) {
            return Err(RoomError::InvalidName);
        }
        let player = self
            .players
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or(RoomError::PlayerNotInRoom)?;
        player.name = name.to_string();
        Ok(())
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    /// Per-player view: public board and scores, the viewer's own rack.
    pub fn snapshot_for(&self, viewer: &PlayerId) -> Result<GameSnapshot, RoomError> {
        let player = self.player(viewer).ok_or(RoomError::PlayerNotInRoom)?;
        let game = self.game.as_ref().ok_or(RoomError::NoGame)?;

        let mut board = Vec::with_capacity(15 * 15);
        for row in game.board.rows() {
            for cell in row {
                board.push(SnapshotCell {
                    x: cell.x,
                    y: cell.y,
                    bonus: cell.bonus,
                    bonus_used: cell.bonus_used,
                    letter: cell.tile.as_ref().map(|t| t.tile.display_letter()),
                    points: cell.tile.as_ref().map(|t| t.tile.value),
                    is_joker: cell.tile.as_ref().map(|t| t.tile.is_joker),
                });
            }
        }

        Ok(GameSnapshot {
            room: self.code.clone(),
            status: self.status,
            board,
            rack: player.rack.clone(),
            players: self
                .players
                .iter()
                .map(|p| PlayerPublic {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    score: p.score,
                    rack_count: p.rack.len(),
                    stats: p.stats.clone(),
                })
                .collect(),
            active_player_id: game.active_player_id.clone(),
            turn_ends_at_ms: unix_millis(game.turn_ends_at),
            turn_duration_ms: game.turn_duration.as_millis() as u64,
            bag_remaining: game.bag.len(),
            log: game.log.iter().map(MoveRecord::summary).collect(),
            version: game.version,
        })
    }

    /// Pushes an event to the room's subscribers; nobody listening is fine.
    pub fn broadcast(&self, event: String) {
        let _ = self.tx.send(event);
    }
}

fn valid_name(name: &str) -> bool {
    !name.is_empty() && name.len() <= 12 && name.chars().all(|c| c.is_ascii_alphanumeric())
}
