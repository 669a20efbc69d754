use crate::models::{Board, BuiltWord, PlacedMap};

/// Flat bonus for playing a full rack in one move.
pub const BINGO_BONUS: u32 = 50;
const BINGO_TILES: usize = 7;

/// Scores one word. Letter and word multipliers fire only on cells covered
/// by this move; tiles already on the board count at face value since their
/// bonus, if any, was consumed when they were placed.
pub fn score_word(board: &Board, word: &BuiltWord, placed: &PlacedMap) -> u32 {
    let mut sum = 0;
    let mut word_multiplier = 1;
    for &(x, y) in &word.cells {
        if let Some(tile) = placed.get(&(x, y)) {
            let (letter_mul, word_mul) = board.get(x, y).multipliers();
            sum += tile.value * letter_mul;
            word_multiplier *= word_mul;
        } else if let Some(existing) = board.tile_at(x, y) {
            sum += existing.tile.value;
        }
    }
    sum * word_multiplier
}

/// Total for a move: main word plus every cross-word, plus the bingo bonus
/// when exactly a full rack was placed.
pub fn score_move(
    board: &Board,
    main: &BuiltWord,
    cross_words: &[BuiltWord],
    placed: &PlacedMap,
) -> u32 {
    let mut total = score_word(board, main, placed);
    for word in cross_words {
        total += score_word(board, word, placed);
    }
    if placed.len() == BINGO_TILES {
        total += BINGO_BONUS;
    }
    total
}
