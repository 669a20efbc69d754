use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use uuid::Uuid;

/// Wildcard character jokers render as in word text and dictionary queries.
pub const JOKER_CHAR: char = '?';

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileId(pub String);

impl TileId {
    fn fresh() -> Self {
        TileId(format!("t_{}", Uuid::new_v4().simple()))
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single tile. Immutable once drawn; ownership moves between the bag,
/// a player's rack and a board cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub letter: Option<char>,
    pub value: u32,
    pub is_joker: bool,
}

impl Tile {
    pub fn new(letter: char, value: u32) -> Self {
        Self {
            id: TileId::fresh(),
            letter: Some(letter),
            value,
            is_joker: false,
        }
    }

    pub fn joker() -> Self {
        Self {
            id: TileId::fresh(),
            letter: None,
            value: 0,
            is_joker: true,
        }
    }

    /// Letter as it appears in word text; jokers render as the wildcard.
    pub fn display_letter(&self) -> char {
        self.letter.unwrap_or(JOKER_CHAR)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Fr,
    En,
}

impl Language {
    pub fn from_env() -> Self {
        match env::var("SCRABBLE_LANG").as_deref() {
            Ok("EN") => Language::En,
            _ => Language::Fr,
        }
    }

    /// (letter, count, value) triples; the `?` entry is the joker pair.
    pub fn distribution(self) -> &'static [(char, u32, u32)] {
        match self {
            Language::Fr => FR_DISTRIBUTION,
            Language::En => EN_DISTRIBUTION,
        }
    }
}

const FR_DISTRIBUTION: &[(char, u32, u32)] = &[
    ('A', 9, 1),
    ('B', 2, 3),
    ('C', 2, 3),
    ('D', 3, 2),
    ('E', 15, 1),
    ('F', 2, 4),
    ('G', 2, 2),
    ('H', 2, 4),
    ('I', 8, 1),
    ('J', 1, 8),
    ('K', 1, 10),
    ('L', 5, 1),
    ('M', 3, 2),
    ('N', 6, 1),
    ('O', 6, 1),
    ('P', 2, 3),
    ('Q', 1, 8),
    ('R', 6, 1),
    ('S', 6, 1),
    ('T', 6, 1),
    ('U', 6, 1),
    ('V', 2, 4),
    ('W', 1, 10),
    ('X', 1, 10),
    ('Y', 1, 10),
    ('Z', 1, 10),
    ('?', 2, 0),
];

const EN_DISTRIBUTION: &[(char, u32, u32)] = &[
    ('A', 9, 1),
    ('B', 2, 3),
    ('C', 2, 3),
    ('D', 4, 2),
    ('E', 12, 1),
    ('F', 2, 4),
    ('G', 3, 2),
    ('H', 2, 4),
    ('I', 9, 1),
    ('J', 1, 8),
    ('K', 1, 5),
    ('L', 4, 1),
    ('M', 2, 3),
    ('N', 6, 1),
    ('O', 8, 1),
    ('P', 2, 3),
    ('Q', 1, 10),
    ('R', 6, 1),
    ('S', 4, 1),
    ('T', 6, 1),
    ('U', 4, 1),
    ('V', 2, 4),
    ('W', 2, 4),
    ('X', 1, 8),
    ('Y', 2, 4),
    ('Z', 1, 10),
    ('?', 2, 0),
];

/// The undrawn tile pool, pre-shuffled.
#[derive(Debug)]
pub struct Bag {
    tiles: Vec<Tile>,
}

impl Bag {
    pub fn new(language: Language) -> Self {
        let mut tiles = Vec::new();
        for &(letter, count, value) in language.distribution() {
            for _ in 0..count {
                let tile = if letter == JOKER_CHAR {
                    Tile::joker()
                } else {
                    Tile::new(letter, value)
                };
                tiles.push(tile);
            }
        }
        tiles.shuffle(&mut rand::thread_rng());
        Bag { tiles }
    }

    /// Draws up to `n` tiles; fewer if the bag runs out.
    pub fn draw(&mut self, n: usize) -> Vec<Tile> {
        let mut drawn = Vec::with_capacity(n);
        for _ in 0..n {
            match self.tiles.pop() {
                Some(tile) => drawn.push(tile),
                None => break,
            }
        }
        drawn
    }

    /// Exchange path: returned tiles go back in and the bag is reshuffled.
    pub fn put_back(&mut self, tiles: Vec<Tile>) {
        self.tiles.extend(tiles);
        self.tiles.shuffle(&mut rand::thread_rng());
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}
