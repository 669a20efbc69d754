//! Word extraction over the board: the contiguous main word along the move's
//! direction, and the perpendicular cross-words each placed tile creates.

use std::collections::HashMap;

use crate::models::{Board, MoveError, Tile, BOARD_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Row,
    Col,
}

/// Newly placed tiles keyed by their target cell, resolved from the rack
/// before any mutation happens.
pub type PlacedMap = HashMap<(usize, usize), Tile>;

/// A word read off the board: the cells it spans and its text, with jokers
/// rendered as the wildcard character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltWord {
    pub cells: Vec<(usize, usize)>,
    pub text: String,
}

impl BuiltWord {
    pub fn len(&self) -> usize {
        self.cells.len()
    }
}

#[derive(Debug)]
pub struct MainWord {
    pub word: BuiltWord,
    /// Whether the span touches a pre-existing tile, directly or by
    /// 4-adjacency of a placed tile.
    pub connected: bool,
}

/// Direction shared by all placements, if any. A single placement counts
/// as a row move.
pub fn alignment(coords: &[(usize, usize)]) -> Option<Direction> {
    let (x0, y0) = coords[0];
    if coords.iter().all(|&(_, y)| y == y0) {
        Some(Direction::Row)
    } else if coords.iter().all(|&(x, _)| x == x0) {
        Some(Direction::Col)
    } else {
        None
    }
}

/// Extends the placements' span over adjacent board tiles in both
/// directions and reads off the main word. A cell inside the span holding
/// neither a board tile nor a new placement is a gap.
pub fn build_main_word(
    board: &Board,
    coords: &[(usize, usize)],
    placed: &PlacedMap,
    direction: Direction,
) -> Result<MainWord, MoveError> {
    let (mut lo, mut hi, fixed) = span_bounds(coords, direction);
    match direction {
        Direction::Row => {
            while lo > 0 && board.tile_at(lo - 1, fixed).is_some() {
                lo -= 1;
            }
            while hi + 1 < BOARD_SIZE && board.tile_at(hi + 1, fixed).is_some() {
                hi += 1;
            }
        }
        Direction::Col => {
            while lo > 0 && board.tile_at(fixed, lo - 1).is_some() {
                lo -= 1;
            }
            while hi + 1 < BOARD_SIZE && board.tile_at(fixed, hi + 1).is_some() {
                hi += 1;
            }
        }
    }

    let mut cells = Vec::with_capacity(hi - lo + 1);
    let mut text = String::with_capacity(hi - lo + 1);
    let mut touches_existing = false;
    for i in lo..=hi {
        let (x, y) = match direction {
            Direction::Row => (i, fixed),
            Direction::Col => (fixed, i),
        };
        if let Some(existing) = board.tile_at(x, y) {
            text.push(existing.tile.display_letter());
            touches_existing = true;
        } else if let Some(tile) = placed.get(&(x, y)) {
            text.push(tile.display_letter());
        } else {
            return Err(MoveError::NotContiguous);
        }
        cells.push((x, y));
    }

    let connected = touches_existing
        || coords.iter().any(|&(x, y)| has_neighbor_tile(board, x, y));
    Ok(MainWord {
        word: BuiltWord { cells, text },
        connected,
    })
}

/// One perpendicular word per placed tile, kept only when it spans more
/// than one cell.
pub fn build_cross_words(
    board: &Board,
    coords: &[(usize, usize)],
    placed: &PlacedMap,
    direction: Direction,
) -> Vec<BuiltWord> {
    let mut words = Vec::new();
    for &(px, py) in coords {
        let (lo, hi) = match direction {
            Direction::Row => {
                let mut lo = py;
                while lo > 0 && board.tile_at(px, lo - 1).is_some() {
                    lo -= 1;
                }
                let mut hi = py;
                while hi + 1 < BOARD_SIZE && board.tile_at(px, hi + 1).is_some() {
                    hi += 1;
                }
                (lo, hi)
            }
            Direction::Col => {
                let mut lo = px;
                while lo > 0 && board.tile_at(lo - 1, py).is_some() {
                    lo -= 1;
                }
                let mut hi = px;
                while hi + 1 < BOARD_SIZE && board.tile_at(hi + 1, py).is_some() {
                    hi += 1;
                }
                (lo, hi)
            }
        };
        if hi == lo {
            continue;
        }
        let mut cells = Vec::with_capacity(hi - lo + 1);
        let mut text = String::with_capacity(hi - lo + 1);
        for i in lo..=hi {
            let (x, y) = match direction {
                Direction::Row => (px, i),
                Direction::Col => (i, py),
            };
            if let Some(existing) = board.tile_at(x, y) {
                text.push(existing.tile.display_letter());
            } else if let Some(tile) = placed.get(&(x, y)) {
                // only the anchor cell lacks a board tile inside this span
                text.push(tile.display_letter());
            }
            cells.push((x, y));
        }
        words.push(BuiltWord { cells, text });
    }
    words
}

fn span_bounds(coords: &[(usize, usize)], direction: Direction) -> (usize, usize, usize) {
    let along = |&(x, y): &(usize, usize)| match direction {
        Direction::Row => x,
        Direction::Col => y,
    };
    let lo = coords.iter().map(along).min().unwrap_or(0);
    let hi = coords.iter().map(along).max().unwrap_or(0);
    let fixed = match direction {
        Direction::Row => coords[0].1,
        Direction::Col => coords[0].0,
    };
    (lo, hi, fixed)
}

fn has_neighbor_tile(board: &Board, x: usize, y: usize) -> bool {
    (x > 0 && board.tile_at(x - 1, y).is_some())
        || (x + 1 < BOARD_SIZE && board.tile_at(x + 1, y).is_some())
        || (y > 0 && board.tile_at(x, y - 1).is_some())
        || (y + 1 < BOARD_SIZE && board.tile_at(x, y + 1).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlacedTile, PlayerId, Tile};

    fn stamp(board: &mut Board, x: usize, y: usize, letter: char, value: u32) {
        board.place_tile(
            x,
            y,
            PlacedTile {
                tile: Tile::new(letter, value),
                from_player: PlayerId("p_test".to_string()),
                turn_played: 1,
            },
        );
    }

    fn placed_map(tiles: &[(usize, usize, char, u32)]) -> (Vec<(usize, usize)>, PlacedMap) {
        let mut coords = Vec::new();
        let mut map = PlacedMap::new();
        for &(x, y, letter, value) in tiles {
            coords.push((x, y));
            map.insert((x, y), Tile::new(letter, value));
        }
        (coords, map)
    }

    #[test]
    fn alignment_detects_row_col_and_rejects_diagonals() {
        assert_eq!(alignment(&[(3, 7), (5, 7)]), Some(Direction::Row));
        assert_eq!(alignment(&[(7, 3), (7, 5)]), Some(Direction::Col));
        assert_eq!(alignment(&[(3, 3), (4, 4)]), None);
        // single tile defaults to a row move
        assert_eq!(alignment(&[(7, 7)]), Some(Direction::Row));
    }

    #[test]
    fn main_word_extends_over_existing_tiles() {
        let mut board = Board::new();
        stamp(&mut board, 6, 7, 'A', 1);
        stamp(&mut board, 7, 7, 'T', 1);
        let (coords, placed) = placed_map(&[(5, 7, 'C', 3), (8, 7, 'S', 1)]);
        let main = build_main_word(&board, &coords, &placed, Direction::Row).unwrap();
        assert_eq!(main.word.text, "CATS");
        assert_eq!(main.word.cells, vec![(5, 7), (6, 7), (7, 7), (8, 7)]);
        assert!(main.connected);
    }

    #[test]
    fn gap_in_span_is_not_contiguous() {
        let board = Board::new();
        let (coords, placed) = placed_map(&[(5, 7, 'C', 3), (7, 7, 'T', 1)]);
        let err = build_main_word(&board, &coords, &placed, Direction::Row).unwrap_err();
        assert_eq!(err, MoveError::NotContiguous);
    }

    #[test]
    fn isolated_word_is_not_connected() {
        let mut board = Board::new();
        stamp(&mut board, 0, 0, 'Z', 10);
        let (coords, placed) = placed_map(&[(5, 7, 'C', 3), (6, 7, 'A', 1), (7, 7, 'T', 1)]);
        let main = build_main_word(&board, &coords, &placed, Direction::Row).unwrap();
        assert_eq!(main.word.text, "CAT");
        assert!(!main.connected);
    }

    #[test]
    fn adjacency_alone_connects() {
        let mut board = Board::new();
        stamp(&mut board, 6, 6, 'X', 8);
        let (coords, placed) = placed_map(&[(5, 7, 'C', 3), (6, 7, 'A', 1), (7, 7, 'T', 1)]);
        let main = build_main_word(&board, &coords, &placed, Direction::Row).unwrap();
        assert!(main.connected);
    }

    #[test]
    fn cross_words_form_per_placed_tile() {
        let mut board = Board::new();
        // existing vertical word "ON" in column 6
        stamp(&mut board, 6, 5, 'O', 1);
        stamp(&mut board, 6, 6, 'N', 1);
        let (coords, placed) = placed_map(&[(5, 7, 'C', 3), (6, 7, 'E', 1), (7, 7, 'T', 1)]);
        let cross = build_cross_words(&board, &coords, &placed, Direction::Row);
        assert_eq!(cross.len(), 1);
        assert_eq!(cross[0].text, "ONE");
        assert_eq!(cross[0].cells, vec![(6, 5), (6, 6), (6, 7)]);
    }

    #[test]
    fn single_letter_cross_words_are_discarded() {
        let board = Board::new();
        let (coords, placed) = placed_map(&[(7, 7, 'A', 1)]);
        let cross = build_cross_words(&board, &coords, &placed, Direction::Row);
        assert!(cross.is_empty());
    }

    #[test]
    fn joker_reads_as_wildcard_in_text() {
        let mut board = Board::new();
        stamp(&mut board, 7, 7, 'T', 1);
        let mut map = PlacedMap::new();
        let coords = vec![(5, 7), (6, 7)];
        map.insert((5, 7), Tile::new('C', 3));
        map.insert((6, 7), Tile::joker());
        let main = build_main_word(&board, &coords, &map, Direction::Row).unwrap();
        assert_eq!(main.word.text, "C?T");
    }

    #[test]
    fn column_main_word_builds_downward() {
        let mut board = Board::new();
        stamp(&mut board, 7, 8, 'A', 1);
        let (coords, placed) = placed_map(&[(7, 7, 'C', 3), (7, 9, 'T', 1)]);
        let main = build_main_word(&board, &coords, &placed, Direction::Col).unwrap();
        assert_eq!(main.word.text, "CAT");
        assert!(main.connected);
    }
}
