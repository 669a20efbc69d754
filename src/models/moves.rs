use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::TileId;

/// One newly placed tile in a play request. Coordinates are signed so that
/// out-of-range input is rejected rather than wrapped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Placement {
    pub x: i32,
    pub y: i32,
    pub tile_id: TileId,
}

/// A move, decoded once at the transport boundary.
#[derive(Debug, Clone)]
pub enum Move {
    Pass,
    Exchange(Vec<TileId>),
    Place(Vec<Placement>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveKind {
    Pass,
    Exchange,
    Play,
}

/// Everything a move can be rejected for. Validation never mutates game
/// state, so any of these leaves the game exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    NoPlayers,
    NoGame,
    PlayerNotInRoom,
    NotYourTurn,
    NoTilesToExchange,
    BagTooSmall,
    TileNotInRack,
    NoPlacements,
    OutOfBounds,
    CellOccupied,
    DuplicateTile,
    NotAligned,
    MustCoverCenter,
    NotContiguous,
    NotConnected,
    NoWordFormed,
    InvalidWord(String),
}

impl MoveError {
    /// Stable wire code, spelled the way clients know them.
    pub fn code(&self) -> &'static str {
        match self {
            MoveError::NoPlayers => "NO_PLAYERS",
            MoveError::NoGame => "NO_GAME",
            MoveError::PlayerNotInRoom => "PLAYER_NOT_IN_ROOM",
            MoveError::NotYourTurn => "NOT_YOUR_TURN",
            MoveError::NoTilesToExchange => "NO_TILES_TO_EXCHANGE",
            MoveError::BagTooSmall => "BAG_TOO_SMALL",
            MoveError::TileNotInRack => "TILE_NOT_IN_RACK",
            MoveError::NoPlacements => "NO_PLACEMENTS",
            MoveError::OutOfBounds => "OUT_OF_BOUNDS",
            MoveError::CellOccupied => "CELL_OCCUPIED",
            MoveError::DuplicateTile => "DUPLICATE_TILE",
            MoveError::NotAligned => "NOT_ALIGNED",
            MoveError::MustCoverCenter => "MUST_COVER_CENTER",
            MoveError::NotContiguous => "NOT_CONTIGUOUS",
            MoveError::NotConnected => "NOT_CONNECTED",
            MoveError::NoWordFormed => "NO_WORD_FORMED",
            MoveError::InvalidWord(_) => "INVALID_WORD",
        }
    }

    /// The offending word, for `INVALID_WORD`.
    pub fn word(&self) -> Option<&str> {
        match self {
            MoveError::InvalidWord(word) => Some(word),
            _ => None,
        }
    }
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::InvalidWord(word) => write!(f, "{} ({})", self.code(), word),
            _ => write!(f, "{}", self.code()),
        }
    }
}

impl std::error::Error for MoveError {}
