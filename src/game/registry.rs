use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    config::GameConfig,
    dictionary::WordList,
    error::{GameError, GameResult},
    game::{
        board::BoardState,
        inventory::TileInventory,
        session::{ExchangeOutcome, GameSession, MoveOutcome, PassOutcome},
    },
    models::{GameSummary, GameView, PlacedTile, PlayerId},
};

/// Outcome of an action, plus the final result when the action ended the game
#[derive(Debug, Clone, Serialize)]
pub struct ActionResult<T> {
    pub outcome: T,
    pub summary: Option<GameSummary>,
}

/// Owns every live game, keyed by game id.
///
/// Each call holds the session's map entry for its whole duration, so actions
/// on one game never interleave while different games run side by side.
/// Finished games are dropped as soon as their final action returns.
pub struct SessionRegistry {
    sessions: DashMap<Uuid, GameSession>,
    dictionary: Arc<dyn WordList>,
    config: GameConfig,
    games_created: AtomicU64,
}

impl SessionRegistry {
    pub fn new(dictionary: Arc<dyn WordList>, config: GameConfig) -> Self {
        Self {
            sessions: DashMap::new(),
            dictionary,
            config,
            games_created: AtomicU64::new(0),
        }
    }

    /// Start a game for `player_ids`, seated in the given order
    pub fn create_session(&self, player_ids: &[PlayerId]) -> GameResult<Uuid> {
        if player_ids.len() > self.config.max_players {
            return Err(GameError::InvalidPlayers(format!(
                "at most {} players per game",
                self.config.max_players
            )));
        }

        let session = GameSession::new(
            player_ids,
            BoardState::new(self.config.board_size),
            self.new_inventory(),
        )?;

        let game_id = Uuid::new_v4();
        self.sessions.insert(game_id, session);

        tracing::info!("Created game {} for players {:?}", game_id, player_ids);

        Ok(game_id)
    }

    pub fn place_move(
        &self,
        game_id: Uuid,
        player_id: PlayerId,
        tiles: &[PlacedTile],
    ) -> GameResult<ActionResult<MoveOutcome>> {
        self.act(game_id, |session| {
            session.place_move(player_id, tiles, self.dictionary.as_ref())
        })
    }

    pub fn pass_turn(
        &self,
        game_id: Uuid,
        player_id: PlayerId,
    ) -> GameResult<ActionResult<PassOutcome>> {
        self.act(game_id, |session| session.pass_turn(player_id))
    }

    pub fn exchange_tiles(
        &self,
        game_id: Uuid,
        player_id: PlayerId,
        tile_indices: &[usize],
    ) -> GameResult<ActionResult<ExchangeOutcome>> {
        self.act(game_id, |session| session.exchange_tiles(player_id, tile_indices))
    }

    pub fn leave_game(
        &self,
        game_id: Uuid,
        player_id: PlayerId,
    ) -> GameResult<ActionResult<bool>> {
        self.act(game_id, |session| session.leave(player_id))
    }

    pub fn get_state(&self, game_id: Uuid, player_id: PlayerId) -> GameResult<GameView> {
        self.sessions
            .get(&game_id)
            .ok_or(GameError::SessionNotFound(game_id))?
            .view_for(player_id)
    }

    /// Seated players, in turn order
    pub fn players(&self, game_id: Uuid) -> GameResult<Vec<PlayerId>> {
        let session = self
            .sessions
            .get(&game_id)
            .ok_or(GameError::SessionNotFound(game_id))?;
        Ok(session.players().iter().map(|p| p.id).collect())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn act<T>(
        &self,
        game_id: Uuid,
        action: impl FnOnce(&mut GameSession) -> GameResult<T>,
    ) -> GameResult<ActionResult<T>> {
        let mut session = self
            .sessions
            .get_mut(&game_id)
            .ok_or(GameError::SessionNotFound(game_id))?;

        let outcome = action(session.value_mut())?;
        let summary = session.summary();
        drop(session);

        if let Some(summary) = &summary {
            self.sessions.remove(&game_id);
            tracing::info!(
                "Game {} finished ({:?}), winner: {:?}",
                game_id,
                summary.reason,
                summary.winner
            );
        }

        Ok(ActionResult { outcome, summary })
    }

    fn new_inventory(&self) -> TileInventory {
        let game_number = self.games_created.fetch_add(1, Ordering::Relaxed);
        match self.config.shuffle_seed {
            Some(seed) => TileInventory::seeded(seed.wrapping_add(game_number)),
            None => TileInventory::from_entropy(),
        }
    }
}
