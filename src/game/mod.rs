// Game engine modules

pub mod board;
pub mod extractor;
pub mod inventory;
pub mod registry;
pub mod scorer;
pub mod session;
pub mod validator;

pub use board::BoardState;
pub use extractor::WordExtractor;
pub use inventory::TileInventory;
pub use registry::{ActionResult, SessionRegistry};
pub use scorer::Scorer;
pub use session::{GameSession, RACK_SIZE};
pub use validator::MoveValidator;
