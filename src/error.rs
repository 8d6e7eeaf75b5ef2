use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::models::PlayerId;

/// Why an action against a game session was refused.
///
/// Every variant is recoverable: the session is left exactly as it was and the
/// player may try again.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameError {
    #[error("tiles must be placed in a single row or column")]
    NotStraightLine,
    #[error("the first word must cover the center square")]
    MustCoverCenter,
    #[error("tiles must connect to a word already on the board")]
    NotConnected,
    #[error("tiles must form one unbroken line")]
    NotContiguous,
    #[error("no word of two or more letters was formed")]
    NoWordFormed,
    #[error("no tiles were placed")]
    EmptyMove,
    #[error("square ({x}, {y}) was used twice")]
    DuplicatePosition { x: usize, y: usize },
    #[error("square ({x}, {y}) is off the board")]
    OutOfBounds { x: usize, y: usize },
    #[error("square ({x}, {y}) is already occupied")]
    CellOccupied { x: usize, y: usize },
    #[error("square ({x}, {y}) holds no provisional tile")]
    NotProvisional { x: usize, y: usize },
    #[error("tile '{0}' is not on your rack")]
    TileNotInRack(char),

    #[error("not in dictionary: {}", .0.join(", "))]
    InvalidWord(Vec<String>),

    #[error("it is not your turn")]
    NotYourTurn,
    #[error("player {0} is not in this game")]
    UnknownPlayer(PlayerId),
    #[error("invalid exchange: {0}")]
    InvalidExchange(String),
    #[error("the game is over")]
    GameOver,
    #[error("invalid player list: {0}")]
    InvalidPlayers(String),
    #[error("game {0} not found")]
    SessionNotFound(Uuid),
}

/// Coarse grouping of [`GameError`] for clients that only care about the kind of failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Validation,
    Dictionary,
    Turn,
}

impl GameError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            GameError::NotStraightLine
            | GameError::MustCoverCenter
            | GameError::NotConnected
            | GameError::NotContiguous
            | GameError::NoWordFormed
            | GameError::EmptyMove
            | GameError::DuplicatePosition { .. }
            | GameError::OutOfBounds { .. }
            | GameError::CellOccupied { .. }
            | GameError::NotProvisional { .. }
            | GameError::TileNotInRack(_) => ErrorCategory::Validation,
            GameError::InvalidWord(_) => ErrorCategory::Dictionary,
            GameError::NotYourTurn
            | GameError::UnknownPlayer(_)
            | GameError::InvalidExchange(_)
            | GameError::GameOver
            | GameError::InvalidPlayers(_)
            | GameError::SessionNotFound(_) => ErrorCategory::Turn,
        }
    }
}

pub type GameResult<T> = Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_codes_serialize_screaming_snake() {
        let json = serde_json::to_value(GameError::NotStraightLine).unwrap();
        assert_eq!(json["reason"], "NOT_STRAIGHT_LINE");

        let json = serde_json::to_value(GameError::InvalidWord(vec!["QXZ".into()])).unwrap();
        assert_eq!(json["reason"], "INVALID_WORD");
        assert_eq!(json["detail"][0], "QXZ");
    }

    #[test]
    fn test_categories() {
        assert_eq!(GameError::NoWordFormed.category(), ErrorCategory::Validation);
        assert_eq!(
            GameError::InvalidWord(vec![]).category(),
            ErrorCategory::Dictionary
        );
        assert_eq!(GameError::NotYourTurn.category(), ErrorCategory::Turn);
    }

    #[test]
    fn test_invalid_word_message_lists_words() {
        let err = GameError::InvalidWord(vec!["ZZ".into(), "QQ".into()]);
        assert_eq!(err.to_string(), "not in dictionary: ZZ, QQ");
    }
}
