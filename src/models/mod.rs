mod board;
mod game;
mod moves;
mod player;
mod room;
mod scorer;
mod tile;
mod words;

pub use board::{Board, Bonus, Cell, PlacedTile, BOARD_SIZE, CENTER};
pub use game::{
    unix_millis, Game, GameSnapshot, MoveRecord, PlayerPublic, SnapshotCell, RACK_SIZE,
};
pub use moves::{Move, MoveError, MoveKind, Placement};
pub use player::{Player, PlayerId, PlayerStats};
pub use room::{Room, RoomError, RoomStatus, MAX_PLAYERS};
pub use scorer::{score_move, score_word, BINGO_BONUS};
pub use tile::{Bag, Language, Tile, TileId, JOKER_CHAR};
pub use words::{
    alignment, build_cross_words, build_main_word, BuiltWord, Direction, MainWord, PlacedMap,
};
