//! Validate-then-commit path for every move. Nothing here mutates a game
//! until all checks for the move have passed.

use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use crate::dictionary::Dictionary;
use crate::models::{
    alignment, build_cross_words, build_main_word, score_move, Bag, Game, Language, Move,
    MoveError, MoveRecord, PlacedMap, PlacedTile, Placement, Player, PlayerId, Room, RoomStatus,
    TileId, BOARD_SIZE, CENTER, RACK_SIZE,
};

/// What a committed move hands back to the transport layer.
#[derive(Debug, Clone, Serialize)]
pub struct MoveOutcome {
    pub record: MoveRecord,
    pub ended: bool,
}

impl MoveOutcome {
    /// Event payload pushed to the room's WebSocket subscribers.
    pub fn event_json(&self) -> String {
        serde_json::json!({
            "type": if self.ended { "game_over" } else { "move" },
            "summary": self.record.summary(),
            "turn": self.record.turn_number,
            "ended": self.ended,
        })
        .to_string()
    }
}

#[derive(Debug)]
pub struct GameService {
    dictionary: Arc<Dictionary>,
    turn_duration: Duration,
}

impl GameService {
    pub fn new(dictionary: Arc<Dictionary>, turn_duration: Duration) -> Self {
        Self {
            dictionary,
            turn_duration,
        }
    }

    /// Fresh board, shuffled bag, dealt racks. Player scores and stats are
    /// reset; the first player in join order starts.
    pub fn start_new_game(&self, room: &mut Room, language: Language) -> Result<(), MoveError> {
        if room.players.is_empty() {
            return Err(MoveError::NoPlayers);
        }
        let mut bag = Bag::new(language);
        for player in &mut room.players {
            player.reset_for_new_game();
            player.rack = bag.draw(RACK_SIZE);
        }
        let first = room.players[0].id.clone();
        room.game = Some(Game::new(first, bag, self.turn_duration));
        room.status = RoomStatus::Playing;
        Ok(())
    }

    /// The single entry point for pass, exchange and play, client-issued or
    /// clock-forced. Either every effect of the move applies, or none do.
    pub async fn play_move(
        &self,
        room: &mut Room,
        player_id: &PlayerId,
        mv: Move,
    ) -> Result<MoveOutcome, MoveError> {
        if room.status == RoomStatus::Finished {
            return Err(MoveError::NoGame);
        }
        let Room {
            players,
            game,
            status,
            ..
        } = room;
        let game = game.as_mut().ok_or(MoveError::NoGame)?;
        let player_idx = players
            .iter()
            .position(|p| &p.id == player_id)
            .ok_or(MoveError::PlayerNotInRoom)?;
        if &game.active_player_id != player_id {
            return Err(MoveError::NotYourTurn);
        }

        let record = match &mv {
            Move::Pass => Ok(Self::apply_pass(game, players, player_idx)),
            Move::Exchange(tile_ids) => Self::apply_exchange(game, players, player_idx, tile_ids),
            Move::Place(placements) => self.apply_play(game, players, player_idx, placements),
        }?;

        game.log.push(record.clone());
        Self::advance_turn(game, players);
        let ended = Self::check_and_finalize(game, players);
        if ended {
            *status = RoomStatus::Finished;
        }
        Ok(MoveOutcome { record, ended })
    }

    fn apply_pass(game: &mut Game, players: &mut [Player], idx: usize) -> MoveRecord {
        let player = &mut players[idx];
        player.stats.passes += 1;
        game.consecutive_passes += 1;
        MoveRecord::new(player, &Move::Pass, Vec::new(), 0, game.version)
    }

    fn apply_exchange(
        game: &mut Game,
        players: &mut [Player],
        idx: usize,
        tile_ids: &[TileId],
    ) -> Result<MoveRecord, MoveError> {
        // the request is a set; a repeated id counts once
        let mut ids: Vec<TileId> = Vec::with_capacity(tile_ids.len());
        for id in tile_ids {
            if !ids.contains(id) {
                ids.push(id.clone());
            }
        }
        if ids.is_empty() {
            return Err(MoveError::NoTilesToExchange);
        }
        if game.bag.len() < ids.len() {
            return Err(MoveError::BagTooSmall);
        }
        if ids.iter().any(|id| !players[idx].has_tile(id)) {
            return Err(MoveError::TileNotInRack);
        }

        let player = &mut players[idx];
        let returned = player.take_tiles(&ids);
        game.bag.put_back(returned);
        let drawn = game.bag.draw(ids.len());
        player.rack.extend(drawn);
        player.stats.passes += 1;
        game.consecutive_passes += 1;
        Ok(MoveRecord::new(
            player,
            &Move::Exchange(ids),
            Vec::new(),
            0,
            game.version,
        ))
    }

    fn apply_play(
        &self,
        game: &mut Game,
        players: &mut [Player],
        idx: usize,
        placements: &[Placement],
    ) -> Result<MoveRecord, MoveError> {
        if placements.is_empty() {
            return Err(MoveError::NoPlacements);
        }

        let mut coords = Vec::with_capacity(placements.len());
        let mut taken_cells = HashSet::new();
        for pl in placements {
            if pl.x < 0 || pl.x >= BOARD_SIZE as i32 || pl.y < 0 || pl.y >= BOARD_SIZE as i32 {
                return Err(MoveError::OutOfBounds);
            }
            let cell = (pl.x as usize, pl.y as usize);
            if game.board.tile_at(cell.0, cell.1).is_some() || !taken_cells.insert(cell) {
                return Err(MoveError::CellOccupied);
            }
            coords.push(cell);
        }

        let player = &players[idx];
        let mut used = HashSet::new();
        for pl in placements {
            if !player.has_tile(&pl.tile_id) {
                return Err(MoveError::TileNotInRack);
            }
            if !used.insert(&pl.tile_id) {
                return Err(MoveError::DuplicateTile);
            }
        }

        let direction = alignment(&coords).ok_or(MoveError::NotAligned)?;
        let first_move = game.board.is_empty();
        if first_move && !coords.contains(&CENTER) {
            return Err(MoveError::MustCoverCenter);
        }

        let mut placed = PlacedMap::new();
        for (pl, &cell) in placements.iter().zip(&coords) {
            if let Some(tile) = player.rack.iter().find(|t| t.id == pl.tile_id) {
                placed.insert(cell, tile.clone());
            }
        }

        let main = build_main_word(&game.board, &coords, &placed, direction)?;
        if !first_move && !main.connected {
            return Err(MoveError::NotConnected);
        }
        let cross_words = build_cross_words(&game.board, &coords, &placed, direction);

        let mut formed: Vec<String> = Vec::new();
        if main.word.len() > 1 {
            formed.push(main.word.text.clone());
        }
        formed.extend(cross_words.iter().map(|w| w.text.clone()));
        if formed.is_empty() {
            return Err(MoveError::NoWordFormed);
        }
        for word in &formed {
            if !self.dictionary.is_word_valid(&word.to_uppercase()) {
                return Err(MoveError::InvalidWord(word.clone()));
            }
        }

        let total = score_move(&game.board, &main.word, &cross_words, &placed);

        // all checks passed; commit
        let turn_number = game.version + 1;
        let player_id = players[idx].id.clone();
        for &(x, y) in &coords {
            if let Some(tile) = placed.get(&(x, y)) {
                game.board.place_tile(
                    x,
                    y,
                    PlacedTile {
                        tile: tile.clone(),
                        from_player: player_id.clone(),
                        turn_played: turn_number,
                    },
                );
            }
        }

        let used_ids: Vec<TileId> = placements.iter().map(|p| p.tile_id.clone()).collect();
        let main_text = main.word.text;
        let player = &mut players[idx];
        player.take_tiles(&used_ids);
        let refill = RACK_SIZE.saturating_sub(player.rack.len());
        player.rack.extend(game.bag.draw(refill));

        player.score += total as i32;
        player.stats.words_played += 1;
        player.stats.total_turns += 1;
        if total > player.stats.best_word_score {
            player.stats.best_word_score = total;
            player.stats.best_word = Some(main_text);
        }
        game.consecutive_passes = 0;

        Ok(MoveRecord::new(
            player,
            &Move::Place(placements.to_vec()),
            formed,
            total,
            game.version,
        ))
    }

    fn advance_turn(game: &mut Game, players: &[Player]) {
        if players.is_empty() {
            return;
        }
        game.turn_index = (game.turn_index + 1) % players.len();
        game.active_player_id = players[game.turn_index].id.clone();
        game.turn_ends_at = SystemTime::now() + game.turn_duration;
        game.version += 1;
    }

    /// Fires on an emptied rack with an empty bag, or on the pass threshold.
    /// Each rack's leftover value comes off its owner's score; a player who
    /// went out collects everyone else's penalty. A pass-threshold ending
    /// has no finisher, so only penalties apply.
    fn check_and_finalize(game: &mut Game, players: &mut [Player]) -> bool {
        let any_empty_rack = players.iter().any(|p| p.rack.is_empty());
        let over = (game.bag.is_empty() && any_empty_rack)
            || game.consecutive_passes >= Game::MAX_CONSECUTIVE_PASSES;
        if !over {
            return false;
        }
        let finisher = players.iter().position(|p| p.rack.is_empty());
        let mut sum_others: i32 = 0;
        for (i, player) in players.iter_mut().enumerate() {
            let malus = player.rack_value() as i32;
            player.score -= malus;
            if Some(i) != finisher {
                sum_others += malus;
            }
        }
        if let Some(i) = finisher {
            players[i].score += sum_others;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tile;

    fn service_with(words: &[&str]) -> GameService {
        GameService::new(
            Arc::new(Dictionary::from_words(words.iter().copied())),
            Duration::from_secs(180),
        )
    }

    fn room_with(names: &[&str]) -> Room {
        let mut room = Room::new("TEST".to_string());
        for name in names {
            room.add_player(Some((*name).to_string())).unwrap();
        }
        room
    }

    fn rig_rack(room: &mut Room, idx: usize, tiles: Vec<Tile>) -> Vec<TileId> {
        let ids = tiles.iter().map(|t| t.id.clone()).collect();
        room.players[idx].rack = tiles;
        ids
    }

    fn placements(ids: &[TileId], coords: &[(i32, i32)]) -> Vec<Placement> {
        ids.iter()
            .zip(coords)
            .map(|(id, &(x, y))| Placement {
                x,
                y,
                tile_id: id.clone(),
            })
            .collect()
    }

    fn drain_bag(room: &mut Room) {
        let game = room.game.as_mut().unwrap();
        let n = game.bag.len();
        game.bag.draw(n);
    }

    fn cat_rack() -> Vec<Tile> {
        vec![Tile::new('C', 3), Tile::new('A', 1), Tile::new('T', 1)]
    }

    #[tokio::test]
    async fn first_move_must_cover_center() {
        let service = service_with(&["CAT"]);
        let mut room = room_with(&["alice", "bob"]);
        service.start_new_game(&mut room, Language::En).unwrap();
        let ids = rig_rack(&mut room, 0, cat_rack());
        let player = room.players[0].id.clone();

        let err = service
            .play_move(
                &mut room,
                &player,
                Move::Place(placements(&ids, &[(0, 0), (1, 0), (2, 0)])),
            )
            .await
            .unwrap_err();
        assert_eq!(err, MoveError::MustCoverCenter);
        // rejection leaves the game untouched
        let game = room.game.as_ref().unwrap();
        assert!(game.board.is_empty());
        assert_eq!(game.version, 1);
        assert_eq!(room.players[0].rack.len(), 3);
    }

    #[tokio::test]
    async fn first_move_through_center_scores_double() {
        let service = service_with(&["CAT"]);
        let mut room = room_with(&["alice", "bob"]);
        service.start_new_game(&mut room, Language::En).unwrap();
        let ids = rig_rack(&mut room, 0, cat_rack());
        let player = room.players[0].id.clone();
        let second = room.players[1].id.clone();

        let outcome = service
            .play_move(
                &mut room,
                &player,
                Move::Place(placements(&ids, &[(6, 7), (7, 7), (8, 7)])),
            )
            .await
            .unwrap();
        assert_eq!(outcome.record.score, 10);
        assert_eq!(outcome.record.words, vec!["CAT".to_string()]);
        assert!(!outcome.ended);

        let game = room.game.as_ref().unwrap();
        assert_eq!(room.players[0].score, 10);
        assert_eq!(room.players[0].stats.best_word, Some("CAT".to_string()));
        assert_eq!(room.players[0].stats.best_word_score, 10);
        assert_eq!(room.players[0].stats.words_played, 1);
        // rack is refilled back to capacity from the bag
        assert_eq!(room.players[0].rack.len(), RACK_SIZE);
        assert_eq!(game.active_player_id, second);
        assert_eq!(game.version, 2);
        assert_eq!(game.consecutive_passes, 0);
        assert_eq!(game.board.tile_at(7, 7).unwrap().turn_played, 2);
        assert_eq!(game.log.len(), 1);
    }

    #[tokio::test]
    async fn moves_out_of_turn_or_from_strangers_are_rejected() {
        let service = service_with(&[]);
        let mut room = room_with(&["alice", "bob"]);
        service.start_new_game(&mut room, Language::En).unwrap();
        let second = room.players[1].id.clone();

        let err = service
            .play_move(&mut room, &second, Move::Pass)
            .await
            .unwrap_err();
        assert_eq!(err, MoveError::NotYourTurn);

        let ghost = PlayerId("p_ghost".to_string());
        let err = service
            .play_move(&mut room, &ghost, Move::Pass)
            .await
            .unwrap_err();
        assert_eq!(err, MoveError::PlayerNotInRoom);
    }

    #[tokio::test]
    async fn moving_before_the_game_starts_is_no_game() {
        let service = service_with(&[]);
        let mut room = room_with(&["alice"]);
        let player = room.players[0].id.clone();
        let err = service
            .play_move(&mut room, &player, Move::Pass)
            .await
            .unwrap_err();
        assert_eq!(err, MoveError::NoGame);
    }

    #[tokio::test]
    async fn starting_an_empty_room_fails() {
        let service = service_with(&[]);
        let mut room = Room::new("TEST".to_string());
        assert_eq!(
            service.start_new_game(&mut room, Language::En),
            Err(MoveError::NoPlayers)
        );
    }

    #[tokio::test]
    async fn one_invalid_word_aborts_the_whole_move() {
        let service = service_with(&["DOG"]);
        let mut room = room_with(&["alice", "bob"]);
        service.start_new_game(&mut room, Language::En).unwrap();
        let ids = rig_rack(&mut room, 0, cat_rack());
        let player = room.players[0].id.clone();

        let err = service
            .play_move(
                &mut room,
                &player,
                Move::Place(placements(&ids, &[(6, 7), (7, 7), (8, 7)])),
            )
            .await
            .unwrap_err();
        assert_eq!(err, MoveError::InvalidWord("CAT".to_string()));
        let game = room.game.as_ref().unwrap();
        assert!(game.board.is_empty());
        assert_eq!(room.players[0].score, 0);
        assert_eq!(room.players[0].rack.len(), 3);
    }

    #[tokio::test]
    async fn pass_rotates_turns_modulo_player_count() {
        let service = service_with(&[]);
        let mut room = room_with(&["alice", "bob", "carol"]);
        service.start_new_game(&mut room, Language::En).unwrap();
        let ids: Vec<PlayerId> = room.players.iter().map(|p| p.id.clone()).collect();

        for expected_next in [1, 2, 0] {
            let active = room.game.as_ref().unwrap().active_player_id.clone();
            service
                .play_move(&mut room, &active, Move::Pass)
                .await
                .unwrap();
            let game = room.game.as_ref().unwrap();
            assert_eq!(game.active_player_id, ids[expected_next]);
        }
        let game = room.game.as_ref().unwrap();
        assert_eq!(game.version, 4);
        assert_eq!(game.consecutive_passes, 3);
        assert_eq!(room.players[0].stats.passes, 1);
    }

    #[tokio::test]
    async fn exchange_swaps_tiles_and_counts_as_a_pass() {
        let service = service_with(&[]);
        let mut room = room_with(&["alice", "bob"]);
        service.start_new_game(&mut room, Language::En).unwrap();
        let player = room.players[0].id.clone();
        let bag_before = room.game.as_ref().unwrap().bag.len();
        let exchanged: Vec<TileId> = room.players[0].rack[..2]
            .iter()
            .map(|t| t.id.clone())
            .collect();

        service
            .play_move(&mut room, &player, Move::Exchange(exchanged.clone()))
            .await
            .unwrap();
        let game = room.game.as_ref().unwrap();
        assert_eq!(room.players[0].rack.len(), RACK_SIZE);
        assert_eq!(game.bag.len(), bag_before);
        assert_eq!(game.consecutive_passes, 1);
        assert_eq!(room.players[0].stats.passes, 1);
    }

    #[tokio::test]
    async fn exchange_validations_fire_in_order() {
        let service = service_with(&[]);
        let mut room = room_with(&["alice", "bob"]);
        service.start_new_game(&mut room, Language::En).unwrap();
        let player = room.players[0].id.clone();

        let err = service
            .play_move(&mut room, &player, Move::Exchange(Vec::new()))
            .await
            .unwrap_err();
        assert_eq!(err, MoveError::NoTilesToExchange);

        let foreign = vec![TileId("t_foreign".to_string())];
        let err = service
            .play_move(&mut room, &player, Move::Exchange(foreign))
            .await
            .unwrap_err();
        assert_eq!(err, MoveError::TileNotInRack);
    }

    #[tokio::test]
    async fn exchange_with_short_bag_changes_nothing() {
        let service = service_with(&[]);
        let mut room = room_with(&["alice", "bob"]);
        service.start_new_game(&mut room, Language::En).unwrap();
        drain_bag(&mut room);
        let player = room.players[0].id.clone();
        let rack_before: Vec<TileId> =
            room.players[0].rack.iter().map(|t| t.id.clone()).collect();

        let err = service
            .play_move(
                &mut room,
                &player,
                Move::Exchange(rack_before[..2].to_vec()),
            )
            .await
            .unwrap_err();
        assert_eq!(err, MoveError::BagTooSmall);
        let game = room.game.as_ref().unwrap();
        assert!(game.bag.is_empty());
        let rack_after: Vec<TileId> =
            room.players[0].rack.iter().map(|t| t.id.clone()).collect();
        assert_eq!(rack_after, rack_before);
        assert_eq!(game.consecutive_passes, 0);
    }

    #[tokio::test]
    async fn geometric_rejections_name_their_cause() {
        let service = service_with(&["CAT", "CA"]);
        let mut room = room_with(&["alice", "bob"]);
        service.start_new_game(&mut room, Language::En).unwrap();
        let ids = rig_rack(&mut room, 0, cat_rack());
        let player = room.players[0].id.clone();

        let err = service
            .play_move(
                &mut room,
                &player,
                Move::Place(placements(&ids, &[(6, 7), (7, 8), (8, 9)])),
            )
            .await
            .unwrap_err();
        assert_eq!(err, MoveError::NotAligned);

        let err = service
            .play_move(
                &mut room,
                &player,
                Move::Place(placements(&ids[..2], &[(15, 7), (16, 7)])),
            )
            .await
            .unwrap_err();
        assert_eq!(err, MoveError::OutOfBounds);

        let err = service
            .play_move(
                &mut room,
                &player,
                Move::Place(placements(&ids[..2], &[(5, 7), (7, 7)])),
            )
            .await
            .unwrap_err();
        assert_eq!(err, MoveError::NotContiguous);

        let err = service
            .play_move(&mut room, &player, Move::Place(Vec::new()))
            .await
            .unwrap_err();
        assert_eq!(err, MoveError::NoPlacements);

        let duplicated = vec![
            Placement {
                x: 6,
                y: 7,
                tile_id: ids[0].clone(),
            },
            Placement {
                x: 7,
                y: 7,
                tile_id: ids[0].clone(),
            },
        ];
        let err = service
            .play_move(&mut room, &player, Move::Place(duplicated))
            .await
            .unwrap_err();
        assert_eq!(err, MoveError::DuplicateTile);
    }

    #[tokio::test]
    async fn single_tile_on_empty_board_forms_no_word() {
        let service = service_with(&["A"]);
        let mut room = room_with(&["alice", "bob"]);
        service.start_new_game(&mut room, Language::En).unwrap();
        let ids = rig_rack(&mut room, 0, vec![Tile::new('A', 1)]);
        let player = room.players[0].id.clone();

        let err = service
            .play_move(
                &mut room,
                &player,
                Move::Place(placements(&ids, &[(7, 7)])),
            )
            .await
            .unwrap_err();
        assert_eq!(err, MoveError::NoWordFormed);
    }

    #[tokio::test]
    async fn second_move_must_connect_and_may_extend() {
        let service = service_with(&["CAT", "CATS", "DO"]);
        let mut room = room_with(&["alice", "bob"]);
        service.start_new_game(&mut room, Language::En).unwrap();
        let first_ids = rig_rack(&mut room, 0, cat_rack());
        let alice = room.players[0].id.clone();
        let bob = room.players[1].id.clone();
        service
            .play_move(
                &mut room,
                &alice,
                Move::Place(placements(&first_ids, &[(6, 7), (7, 7), (8, 7)])),
            )
            .await
            .unwrap();

        // an island is rejected
        let island_ids = rig_rack(
            &mut room,
            1,
            vec![Tile::new('D', 2), Tile::new('O', 1)],
        );
        let err = service
            .play_move(
                &mut room,
                &bob,
                Move::Place(placements(&island_ids, &[(0, 0), (1, 0)])),
            )
            .await
            .unwrap_err();
        assert_eq!(err, MoveError::NotConnected);

        // covering an occupied cell is rejected
        let err = service
            .play_move(
                &mut room,
                &bob,
                Move::Place(placements(&island_ids[..1], &[(7, 7)])),
            )
            .await
            .unwrap_err();
        assert_eq!(err, MoveError::CellOccupied);

        // extending CAT into CATS works, with no center bonus the second time
        let s_ids = rig_rack(&mut room, 1, vec![Tile::new('S', 1)]);
        let outcome = service
            .play_move(
                &mut room,
                &bob,
                Move::Place(placements(&s_ids, &[(9, 7)])),
            )
            .await
            .unwrap();
        assert_eq!(outcome.record.words, vec!["CATS".to_string()]);
        assert_eq!(outcome.record.score, 6);
    }

    #[tokio::test]
    async fn joker_plays_as_wildcard_and_scores_zero() {
        let service = service_with(&["CAT"]);
        let mut room = room_with(&["alice", "bob"]);
        service.start_new_game(&mut room, Language::En).unwrap();
        let ids = rig_rack(
            &mut room,
            0,
            vec![Tile::new('C', 3), Tile::joker(), Tile::new('T', 1)],
        );
        let player = room.players[0].id.clone();

        let outcome = service
            .play_move(
                &mut room,
                &player,
                Move::Place(placements(&ids, &[(6, 7), (7, 7), (8, 7)])),
            )
            .await
            .unwrap();
        // C?T matches CAT; the joker is worth nothing, center still doubles
        assert_eq!(outcome.record.words, vec!["C?T".to_string()]);
        assert_eq!(outcome.record.score, 8);
    }

    #[tokio::test]
    async fn pass_threshold_ends_with_penalties_only() {
        let service = service_with(&[]);
        let mut room = room_with(&["alice", "bob"]);
        service.start_new_game(&mut room, Language::En).unwrap();
        room.game.as_mut().unwrap().consecutive_passes = Game::MAX_CONSECUTIVE_PASSES - 1;
        let alice = room.players[0].id.clone();
        let alice_malus = room.players[0].rack_value() as i32;
        let bob_malus = room.players[1].rack_value() as i32;

        let outcome = service
            .play_move(&mut room, &alice, Move::Pass)
            .await
            .unwrap();
        assert!(outcome.ended);
        assert_eq!(room.status, RoomStatus::Finished);
        // nobody went out: penalties apply, no bonus transfer
        assert_eq!(room.players[0].score, -alice_malus);
        assert_eq!(room.players[1].score, -bob_malus);

        let err = service
            .play_move(&mut room, &alice, Move::Pass)
            .await
            .unwrap_err();
        assert_eq!(err, MoveError::NoGame);
    }

    #[tokio::test]
    async fn going_out_collects_everyone_elses_rack() {
        let service = service_with(&["CAT"]);
        let mut room = room_with(&["alice", "bob"]);
        service.start_new_game(&mut room, Language::En).unwrap();
        drain_bag(&mut room);
        let ids = rig_rack(&mut room, 0, cat_rack());
        rig_rack(&mut room, 1, vec![Tile::new('B', 3), Tile::new('D', 2)]);
        let alice = room.players[0].id.clone();

        let outcome = service
            .play_move(
                &mut room,
                &alice,
                Move::Place(placements(&ids, &[(6, 7), (7, 7), (8, 7)])),
            )
            .await
            .unwrap();
        assert!(outcome.ended);
        assert_eq!(room.status, RoomStatus::Finished);
        // alice: 10 for CAT, +5 from bob's rack; bob: -5
        assert_eq!(room.players[0].score, 15);
        assert_eq!(room.players[1].score, -5);
        // tile bookkeeping: the rigged universe is fully accounted for
        let game = room.game.as_ref().unwrap();
        assert_eq!(game.board.placed_count(), 3);
        assert!(room.players[0].rack.is_empty());
        assert_eq!(room.players[1].rack.len(), 2);
        assert!(game.bag.is_empty());
    }

    #[tokio::test]
    async fn tiles_are_conserved_across_moves() {
        let service = service_with(&[]);
        let mut room = room_with(&["alice", "bob"]);
        service.start_new_game(&mut room, Language::En).unwrap();
        let total = |room: &Room| {
            let game = room.game.as_ref().unwrap();
            game.bag.len()
                + game.board.placed_count()
                + room.players.iter().map(|p| p.rack.len()).sum::<usize>()
        };
        assert_eq!(total(&room), 100);

        let alice = room.players[0].id.clone();
        let exchanged: Vec<TileId> = room.players[0].rack[..3]
            .iter()
            .map(|t| t.id.clone())
            .collect();
        service
            .play_move(&mut room, &alice, Move::Exchange(exchanged))
            .await
            .unwrap();
        assert_eq!(total(&room), 100);

        let bob = room.players[1].id.clone();
        service
            .play_move(&mut room, &bob, Move::Pass)
            .await
            .unwrap();
        assert_eq!(total(&room), 100);
    }
}
