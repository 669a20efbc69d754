use serde::Serialize;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::models::{
    Bag, Board, Bonus, Move, MoveKind, Placement, Player, PlayerId, PlayerStats, RoomStatus, Tile,
};

/// Rack capacity; also the tile count that triggers the bingo bonus.
pub const RACK_SIZE: usize = 7;

pub fn unix_millis(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// One match. Created at game start, mutated only through the game service,
/// done once the end condition fires.
#[derive(Debug)]
pub struct Game {
    pub board: Board,
    pub bag: Bag,
    pub turn_index: usize,
    pub active_player_id: PlayerId,
    pub turn_ends_at: SystemTime,
    pub turn_duration: Duration,
    pub consecutive_passes: u32,
    /// Monotonic; doubles as the turn number stamped onto placed tiles.
    pub version: u64,
    pub log: Vec<MoveRecord>,
    pub started_at: SystemTime,
}

impl Game {
    pub const MAX_CONSECUTIVE_PASSES: u32 = 6;
    pub const DEFAULT_TURN_DURATION: Duration = Duration::from_secs(180);

    pub fn new(first_player: PlayerId, bag: Bag, turn_duration: Duration) -> Self {
        let now = SystemTime::now();
        Self {
            board: Board::new(),
            bag,
            turn_index: 0,
            active_player_id: first_player,
            turn_ends_at: now + turn_duration,
            turn_duration,
            consecutive_passes: 0,
            version: 1,
            log: Vec::new(),
            started_at: now,
        }
    }

    pub fn deadline_elapsed(&self, now: SystemTime) -> bool {
        now >= self.turn_ends_at
    }
}

/// Append-only log entry for a committed move.
#[derive(Debug, Clone, Serialize)]
pub struct MoveRecord {
    pub player_id: PlayerId,
    pub player_name: String,
    pub action: MoveKind,
    pub words: Vec<String>,
    pub score: u32,
    pub placements: Vec<Placement>,
    pub turn_number: u64,
    pub created_at_ms: u64,
}

impl MoveRecord {
    pub fn new(
        player: &Player,
        mv: &Move,
        words: Vec<String>,
        score: u32,
        version: u64,
    ) -> Self {
        let (action, placements) = match mv {
            Move::Pass => (MoveKind::Pass, Vec::new()),
            Move::Exchange(_) => (MoveKind::Exchange, Vec::new()),
            Move::Place(placements) => (MoveKind::Play, placements.clone()),
        };
        Self {
            player_id: player.id.clone(),
            player_name: player.name.clone(),
            action,
            words,
            score,
            placements,
            turn_number: version + 1,
            created_at_ms: unix_millis(SystemTime::now()),
        }
    }

    /// Short human-readable line for the move log.
    pub fn summary(&self) -> String {
        match self.action {
            MoveKind::Pass => format!("{} passed", self.player_name),
            MoveKind::Exchange => format!("{} exchanged tiles", self.player_name),
            MoveKind::Play => format!(
                "{} played {} for {} points",
                self.player_name,
                self.words.join(", "),
                self.score
            ),
        }
    }
}

/// One board cell as a viewer sees it. Occupied cells expose the tile's
/// letter and points; racks never appear here.
#[derive(Debug, Serialize)]
pub struct SnapshotCell {
    pub x: usize,
    pub y: usize,
    pub bonus: Option<Bonus>,
    pub bonus_used: bool,
    pub letter: Option<char>,
    pub points: Option<u32>,
    pub is_joker: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct PlayerPublic {
    pub id: PlayerId,
    pub name: String,
    pub score: i32,
    pub rack_count: usize,
    pub stats: PlayerStats,
}

/// Serializable per-player view of a game: public board and scores, plus
/// the viewer's own rack only.
#[derive(Debug, Serialize)]
pub struct GameSnapshot {
    pub room: String,
    pub status: RoomStatus,
    pub board: Vec<SnapshotCell>,
    pub rack: Vec<Tile>,
    pub players: Vec<PlayerPublic>,
    pub active_player_id: PlayerId,
    pub turn_ends_at_ms: u64,
    pub turn_duration_ms: u64,
    pub bag_remaining: usize,
    pub log: Vec<String>,
    pub version: u64,
}
