use std::collections::HashSet;

use serde::Serialize;

use crate::{
    dictionary::WordList,
    error::{GameError, GameResult},
    game::{
        board::BoardState, extractor::WordExtractor, inventory::TileInventory, scorer::Scorer,
        validator::MoveValidator,
    },
    models::{
        EndReason, GamePhase, GameSummary, GameView, OpponentView, PlacedTile, PlayerId,
        Position, Standing, Tile,
    },
    utils::premium::layout_by_key,
};

/// Tiles a player holds between turns
pub const RACK_SIZE: usize = 7;

#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub rack: Vec<Tile>,
    pub score: u32,
    /// False once the player has left the game
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TurnAction {
    Play { words: Vec<String>, score: u32, tiles_placed: usize },
    Pass,
    Exchange { count: usize },
    Leave,
}

/// One entry of the session's move log
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TurnRecord {
    pub player_id: PlayerId,
    pub turn_number: u32,
    pub action: TurnAction,
}

#[derive(Debug, Clone, Serialize)]
pub struct MoveOutcome {
    pub score: u32,
    pub formed_words: Vec<String>,
    /// Replacement tiles drawn; fewer than placed when the bag runs low
    pub tiles_drawn: usize,
    pub game_ended: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PassOutcome {
    pub game_ended: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExchangeOutcome {
    pub exchanged_count: usize,
    pub game_ended: bool,
}

/// State of one game and the turn rules that move it forward.
///
/// Every action either fails without touching the session or applies in full.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: BoardState,
    inventory: TileInventory,
    players: Vec<Player>,
    current_player_index: usize,
    turn_number: u32,
    consecutive_passes: usize,
    phase: GamePhase,
    history: Vec<TurnRecord>,
}

impl GameSession {
    /// Start a game: seat the players in order and deal each a full rack
    pub fn new(
        player_ids: &[PlayerId],
        board: BoardState,
        mut inventory: TileInventory,
    ) -> GameResult<Self> {
        if player_ids.is_empty() {
            return Err(GameError::InvalidPlayers("at least one player is required".into()));
        }
        let unique: HashSet<_> = player_ids.iter().collect();
        if unique.len() != player_ids.len() {
            return Err(GameError::InvalidPlayers("player ids must be unique".into()));
        }
        if player_ids.len() * RACK_SIZE > inventory.len() {
            return Err(GameError::InvalidPlayers(format!(
                "{} players cannot be dealt from {} tiles",
                player_ids.len(),
                inventory.len()
            )));
        }

        let players = player_ids
            .iter()
            .map(|&id| Player {
                id,
                rack: inventory.draw(RACK_SIZE),
                score: 0,
                active: true,
            })
            .collect();

        Ok(Self {
            board,
            inventory,
            players,
            current_player_index: 0,
            turn_number: 0,
            consecutive_passes: 0,
            phase: GamePhase::AwaitingMove,
            history: Vec::new(),
        })
    }

    /// Place tiles from the current player's rack and score the words they form
    pub fn place_move(
        &mut self,
        player_id: PlayerId,
        tiles: &[PlacedTile],
        dictionary: &dyn WordList,
    ) -> GameResult<MoveOutcome> {
        let result = self.try_place_move(player_id, tiles, dictionary);
        if let Err(e) = &result {
            tracing::debug!("Player {} move rejected: {}", player_id, e);
        }
        result
    }

    fn try_place_move(
        &mut self,
        player_id: PlayerId,
        tiles: &[PlacedTile],
        dictionary: &dyn WordList,
    ) -> GameResult<MoveOutcome> {
        let index = self.ensure_turn(player_id)?;
        let positions: Vec<Position> = tiles.iter().map(PlacedTile::position).collect();

        MoveValidator::validate(&self.board, &positions)?;
        let remaining_rack = Self::take_from_rack(&self.players[index].rack, tiles)?;

        // Work on a copy so a rejection leaves the live board untouched
        let mut staged = self.board.clone();
        for placed in tiles {
            staged.place_provisional(placed.x, placed.y, placed.tile())?;
        }

        let words = WordExtractor::extract_checked(&staged, &positions)?;

        let mut invalid: Vec<String> = Vec::new();
        for word in &words {
            if !dictionary.is_valid_word(&word.text) && !invalid.contains(&word.text) {
                invalid.push(word.text.clone());
            }
        }
        if !invalid.is_empty() {
            return Err(GameError::InvalidWord(invalid));
        }

        let score = Scorer::calculate_score(&staged, &positions);
        staged.commit(&positions)?;

        // Everything below is infallible
        self.board = staged;
        let drawn = self.inventory.draw(RACK_SIZE.saturating_sub(remaining_rack.len()));
        let tiles_drawn = drawn.len();

        let player = &mut self.players[index];
        player.rack = remaining_rack;
        player.rack.extend(drawn);
        player.score += score;

        let formed_words: Vec<String> = words.into_iter().map(|w| w.text).collect();
        tracing::info!(
            "Player {} played {:?} for {} points",
            player_id,
            formed_words,
            score
        );

        self.consecutive_passes = 0;
        self.record(
            player_id,
            TurnAction::Play {
                words: formed_words.clone(),
                score,
                tiles_placed: tiles.len(),
            },
        );
        self.advance();
        let game_ended = self.check_game_end(index);

        Ok(MoveOutcome {
            score,
            formed_words,
            tiles_drawn,
            game_ended,
        })
    }

    /// Give up the turn without playing
    pub fn pass_turn(&mut self, player_id: PlayerId) -> GameResult<PassOutcome> {
        let index = self.ensure_turn(player_id)?;

        self.consecutive_passes += 1;
        self.record(player_id, TurnAction::Pass);
        self.advance();
        let game_ended = self.check_game_end(index);

        tracing::debug!("Player {} passed ({} in a row)", player_id, self.consecutive_passes);

        Ok(PassOutcome { game_ended })
    }

    /// Swap the rack tiles at `tile_indices` for fresh ones. Counts as a pass.
    pub fn exchange_tiles(
        &mut self,
        player_id: PlayerId,
        tile_indices: &[usize],
    ) -> GameResult<ExchangeOutcome> {
        let index = self.ensure_turn(player_id)?;
        let rack_len = self.players[index].rack.len();

        if tile_indices.is_empty() {
            return Err(GameError::InvalidExchange("no tiles selected".into()));
        }
        if let Some(bad) = tile_indices.iter().find(|&&i| i >= rack_len) {
            return Err(GameError::InvalidExchange(format!("no tile at rack index {}", bad)));
        }
        let unique: HashSet<_> = tile_indices.iter().collect();
        if unique.len() != tile_indices.len() {
            return Err(GameError::InvalidExchange("rack index selected twice".into()));
        }
        if self.inventory.len() < RACK_SIZE {
            return Err(GameError::InvalidExchange(format!(
                "only {} tiles left in the bag",
                self.inventory.len()
            )));
        }

        let mut sorted = tile_indices.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));

        let rack = &mut self.players[index].rack;
        let returned: Vec<Tile> = sorted.into_iter().map(|i| rack.remove(i)).collect();
        let exchanged_count = returned.len();

        self.inventory.exchange(returned);
        let drawn = self.inventory.draw(exchanged_count);
        self.players[index].rack.extend(drawn);

        self.consecutive_passes += 1;
        self.record(player_id, TurnAction::Exchange { count: exchanged_count });
        self.advance();
        let game_ended = self.check_game_end(index);

        tracing::debug!("Player {} exchanged {} tiles", player_id, exchanged_count);

        Ok(ExchangeOutcome {
            exchanged_count,
            game_ended,
        })
    }

    /// Remove a player from the rotation and return their rack to the bag.
    ///
    /// Returns whether the game ended as a result.
    pub fn leave(&mut self, player_id: PlayerId) -> GameResult<bool> {
        if self.phase.is_ended() {
            return Err(GameError::GameOver);
        }
        let index = self
            .players
            .iter()
            .position(|p| p.id == player_id && p.active)
            .ok_or(GameError::UnknownPlayer(player_id))?;

        let rack = std::mem::take(&mut self.players[index].rack);
        self.inventory.exchange(rack);
        self.players[index].active = false;
        self.record(player_id, TurnAction::Leave);
        self.consecutive_passes = self.pending_passes();

        tracing::info!("Player {} left the game", player_id);

        if self.active_player_count() == 0 {
            self.end(EndReason::Abandoned);
            return Ok(true);
        }
        if index == self.current_player_index {
            self.advance();
        }

        Ok(self.check_game_end(index))
    }

    /// Snapshot from `player_id`'s seat. Other racks are reduced to their sizes.
    pub fn view_for(&self, player_id: PlayerId) -> GameResult<GameView> {
        let me = self
            .players
            .iter()
            .find(|p| p.id == player_id)
            .ok_or(GameError::UnknownPlayer(player_id))?;

        Ok(GameView {
            board: self.board.to_sparse_map(),
            bonuses: layout_by_key(self.board.bonuses()),
            board_size: self.board.size(),
            my_rack: me.rack.clone(),
            my_score: me.score,
            players: self
                .players
                .iter()
                .map(|p| OpponentView {
                    player_id: p.id,
                    score: p.score,
                    rack_size: p.rack.len(),
                    active: p.active,
                })
                .collect(),
            current_player_id: self.current_player_id(),
            turn_number: self.turn_number,
            tiles_remaining: self.inventory.len(),
            phase: self.phase,
        })
    }

    /// Players by descending score, ties kept in seat order
    pub fn standings(&self) -> Vec<Standing> {
        let mut standings: Vec<Standing> = self
            .players
            .iter()
            .map(|p| Standing {
                player_id: p.id,
                score: p.score,
            })
            .collect();
        standings.sort_by(|a, b| b.score.cmp(&a.score));
        standings
    }

    /// Sole top scorer, or `None` on a tie
    pub fn winner(&self) -> Option<PlayerId> {
        match self.standings().as_slice() {
            [first, second, ..] if first.score == second.score => None,
            [first, ..] => Some(first.player_id),
            [] => None,
        }
    }

    /// Final result, once the game has ended
    pub fn summary(&self) -> Option<GameSummary> {
        match self.phase {
            GamePhase::Ended(reason) => Some(GameSummary {
                reason,
                winner: self.winner(),
                standings: self.standings(),
            }),
            GamePhase::AwaitingMove => None,
        }
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn history(&self) -> &[TurnRecord] {
        &self.history
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn consecutive_passes(&self) -> usize {
        self.consecutive_passes
    }

    pub fn tiles_remaining(&self) -> usize {
        self.inventory.len()
    }

    pub fn current_player_id(&self) -> PlayerId {
        self.players[self.current_player_index].id
    }

    /// Tiles in the bag, on racks and locked on the board. Constant for a game.
    pub fn tile_total(&self) -> usize {
        self.inventory.len()
            + self.players.iter().map(|p| p.rack.len()).sum::<usize>()
            + self.board.locked_count()
    }

    fn active_player_count(&self) -> usize {
        self.players.iter().filter(|p| p.active).count()
    }

    fn ensure_turn(&self, player_id: PlayerId) -> GameResult<usize> {
        if self.phase.is_ended() {
            return Err(GameError::GameOver);
        }
        let index = self
            .players
            .iter()
            .position(|p| p.id == player_id && p.active)
            .ok_or(GameError::UnknownPlayer(player_id))?;
        if index != self.current_player_index {
            return Err(GameError::NotYourTurn);
        }
        Ok(index)
    }

    /// Rack left over after removing the placed tiles. Blanks match any value-0 placement.
    fn take_from_rack(rack: &[Tile], tiles: &[PlacedTile]) -> GameResult<Vec<Tile>> {
        let mut remaining = rack.to_vec();

        for placed in tiles {
            let tile = placed.tile();
            if !tile.letter.is_ascii_alphabetic() {
                return Err(GameError::TileNotInRack(placed.letter));
            }

            let found = if tile.value == 0 {
                remaining.iter().position(Tile::is_blank)
            } else {
                remaining.iter().position(|t| *t == tile)
            };

            match found {
                Some(i) => {
                    remaining.swap_remove(i);
                }
                None => return Err(GameError::TileNotInRack(tile.letter)),
            }
        }

        Ok(remaining)
    }

    /// Distinct active players in the trailing run of passes and exchanges
    fn pending_passes(&self) -> usize {
        let mut passed = HashSet::new();
        for record in self.history.iter().rev() {
            match &record.action {
                TurnAction::Play { .. } => break,
                TurnAction::Leave => continue,
                TurnAction::Pass | TurnAction::Exchange { .. } => {
                    if self.players.iter().any(|p| p.id == record.player_id && p.active) {
                        passed.insert(record.player_id);
                    }
                }
            }
        }
        passed.len()
    }

    fn record(&mut self, player_id: PlayerId, action: TurnAction) {
        self.turn_number += 1;
        self.history.push(TurnRecord {
            player_id,
            turn_number: self.turn_number,
            action,
        });
    }

    /// Move to the next active seat
    fn advance(&mut self) {
        let count = self.players.len();
        for step in 1..=count {
            let next = (self.current_player_index + step) % count;
            if self.players[next].active {
                self.current_player_index = next;
                return;
            }
        }
    }

    fn check_game_end(&mut self, mover: usize) -> bool {
        let mover = &self.players[mover];
        if self.inventory.is_empty() && mover.active && mover.rack.is_empty() {
            self.end(EndReason::TilesExhausted);
        } else if self.consecutive_passes >= self.active_player_count() {
            self.end(EndReason::AllPassed);
        }
        self.phase.is_ended()
    }

    fn end(&mut self, reason: EndReason) {
        self.phase = GamePhase::Ended(reason);
        tracing::info!("Game ended after {} turns: {:?}", self.turn_number, reason);
    }
}

#[cfg(test)]
impl GameSession {
    /// Seat players with the given letters on their racks, topped up to a full rack.
    /// `_` stages a blank.
    pub(crate) fn staged(players: &[(PlayerId, &str)], seed: u64) -> Self {
        let mut inventory = TileInventory::seeded(seed);
        let mut seated: Vec<Player> = players
            .iter()
            .map(|&(id, letters)| Player {
                id,
                rack: letters
                    .chars()
                    .map(|c| inventory.take_letter(c).expect("letter available in bag"))
                    .collect(),
                score: 0,
                active: true,
            })
            .collect();
        for player in &mut seated {
            let missing = RACK_SIZE.saturating_sub(player.rack.len());
            player.rack.extend(inventory.draw(missing));
        }

        Self {
            board: BoardState::default(),
            inventory,
            players: seated,
            current_player_index: 0,
            turn_number: 0,
            consecutive_passes: 0,
            phase: GamePhase::AwaitingMove,
            history: Vec::new(),
        }
    }

    pub(crate) fn inventory_mut(&mut self) -> &mut TileInventory {
        &mut self.inventory
    }

    pub(crate) fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }
}
