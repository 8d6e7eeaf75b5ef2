use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::{ErrorCategory, GameError},
    models::{GameSummary, GameView, PlacedTile, PlayerId},
};

/// Messages sent from client to server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    CreateGame {
        player_ids: Vec<PlayerId>,
    },
    PlaceMove {
        game_id: Uuid,
        tiles: Vec<PlacedTile>,
    },
    PassTurn {
        game_id: Uuid,
    },
    ExchangeTiles {
        game_id: Uuid,
        tile_indices: Vec<usize>,
    },
    LeaveGame {
        game_id: Uuid,
    },
    GetState {
        game_id: Uuid,
    },
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    GameCreated {
        game_id: Uuid,
    },
    GameState {
        game_id: Uuid,
        state: GameView,
    },
    MoveAccepted {
        game_id: Uuid,
        player_id: PlayerId,
        score: u32,
        formed_words: Vec<String>,
    },
    MoveRejected {
        game_id: Uuid,
        #[serde(flatten)]
        reason: RejectionInfo,
    },
    TurnPassed {
        game_id: Uuid,
        player_id: PlayerId,
    },
    TilesExchanged {
        game_id: Uuid,
        player_id: PlayerId,
        exchanged_count: usize,
    },
    GameOver {
        game_id: Uuid,
        summary: GameSummary,
    },
    Error {
        message: String,
    },
}

/// Machine-readable reason alongside a human-readable message
#[derive(Debug, Clone, Serialize)]
pub struct RejectionInfo {
    pub category: ErrorCategory,
    pub error: serde_json::Value,
    pub message: String,
}

impl From<&GameError> for RejectionInfo {
    fn from(err: &GameError) -> Self {
        Self {
            category: err.category(),
            error: serde_json::to_value(err).unwrap_or(serde_json::Value::Null),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_message_parsing() {
        let json = r#"{
            "type": "place_move",
            "game_id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "tiles": [{"x": 7, "y": 7, "letter": "A", "value": 1}]
        }"#;
        match serde_json::from_str::<ClientMessage>(json).unwrap() {
            ClientMessage::PlaceMove { tiles, .. } => {
                assert_eq!(tiles.len(), 1);
                assert_eq!(tiles[0].letter, 'A');
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_rejection_carries_reason_code() {
        let msg = ServerMessage::MoveRejected {
            game_id: Uuid::nil(),
            reason: RejectionInfo::from(&GameError::MustCoverCenter),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "move_rejected");
        assert_eq!(json["category"], "validation");
        assert_eq!(json["error"]["reason"], "MUST_COVER_CENTER");
    }
}
