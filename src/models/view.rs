use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::game::{BoardCell, Multiplier, PlayerId, Tile};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EndReason {
    /// The bag ran dry and the mover emptied their rack
    TilesExhausted,
    /// Every active player passed or exchanged in a row
    AllPassed,
    /// No active players remain
    Abandoned,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum GamePhase {
    AwaitingMove,
    Ended(EndReason),
}

impl GamePhase {
    pub fn is_ended(&self) -> bool {
        matches!(self, GamePhase::Ended(_))
    }
}

/// What one player can see of another
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OpponentView {
    pub player_id: PlayerId,
    pub score: u32,
    pub rack_size: usize,
    pub active: bool,
}

/// Snapshot of a session from one player's seat.
///
/// Only the requesting player's rack is included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameView {
    pub board: BTreeMap<String, BoardCell>,
    pub bonuses: BTreeMap<String, Multiplier>,
    pub board_size: usize,
    pub my_rack: Vec<Tile>,
    pub my_score: u32,
    pub players: Vec<OpponentView>,
    pub current_player_id: PlayerId,
    pub turn_number: u32,
    pub tiles_remaining: usize,
    pub phase: GamePhase,
}

/// Final position of a player when a game ends
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Standing {
    pub player_id: PlayerId,
    pub score: u32,
}

/// Result of a finished game
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSummary {
    pub reason: EndReason,
    pub winner: Option<PlayerId>,
    pub standings: Vec<Standing>,
}
