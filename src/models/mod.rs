pub mod game;
pub mod view;

pub use game::{
    // Board and tile types
    Axis, BoardCell, Multiplier, PlacedTile, PlayerId, Position, Tile, Word,
};
pub use view::{EndReason, GamePhase, GameSummary, GameView, OpponentView, Standing};
