use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::models::{Tile, TileId};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn fresh() -> Self {
        PlayerId(format!("p_{}", Uuid::new_v4().simple()))
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PlayerStats {
    pub words_played: u32,
    pub best_word_score: u32,
    pub best_word: Option<String>,
    pub total_turns: u32,
    pub passes: u32,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub rack: Vec<Tile>,
    pub score: i32,
    pub stats: PlayerStats,
}

const FALLBACK_NAMES: [&str; 10] = [
    "EagleEye",
    "StormRider",
    "ShadowHunter",
    "FireFury",
    "IceBreaker",
    "ThunderClap",
    "NightWolf",
    "BladeRunner",
    "WindWalker",
    "LoneWolf",
];

impl Player {
    pub fn new(name: Option<String>) -> Self {
        Self {
            id: PlayerId::fresh(),
            name: name.unwrap_or_else(Player::random_name),
            rack: Vec::new(),
            score: 0,
            stats: PlayerStats::default(),
        }
    }

    pub fn random_name() -> String {
        FALLBACK_NAMES
            .choose(&mut rand::thread_rng())
            .unwrap_or(&FALLBACK_NAMES[0])
            .to_string()
    }

    pub fn reset_for_new_game(&mut self) {
        self.score = 0;
        self.rack.clear();
        self.stats = PlayerStats::default();
    }

    pub fn has_tile(&self, id: &TileId) -> bool {
        self.rack.iter().any(|t| &t.id == id)
    }

    /// Removes and returns the rack tiles with the given ids. Ownership must
    /// have been validated beforehand.
    pub fn take_tiles(&mut self, ids: &[TileId]) -> Vec<Tile> {
        let (taken, kept) = self
            .rack
            .drain(..)
            .partition(|tile: &Tile| ids.contains(&tile.id));
        self.rack = kept;
        taken
    }

    /// Sum of the rack's face values, the end-game penalty.
    pub fn rack_value(&self) -> u32 {
        self.rack.iter().map(|t| t.value).sum()
    }
}
