use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::{
    error::{GameError, GameResult},
    models::{BoardCell, Multiplier, Position, Tile},
    utils::premium::{layout_for, STANDARD_BOARD_SIZE},
};

/// Sparse square board of locked and provisional tiles
#[derive(Debug, Clone)]
pub struct BoardState {
    size: usize,
    cells: HashMap<Position, BoardCell>,
    bonuses: Arc<HashMap<Position, Multiplier>>,
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new(STANDARD_BOARD_SIZE)
    }
}

impl BoardState {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: HashMap::new(),
            bonuses: Arc::new(layout_for(size)),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn center(&self) -> Position {
        Position::new(self.size / 2, self.size / 2)
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x < self.size && pos.y < self.size
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&BoardCell> {
        self.cells.get(&Position::new(x, y))
    }

    pub fn at(&self, pos: Position) -> Option<&BoardCell> {
        self.cells.get(&pos)
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.cells.contains_key(&pos)
    }

    pub fn is_locked(&self, pos: Position) -> bool {
        self.cells.get(&pos).is_some_and(|cell| cell.locked)
    }

    pub fn bonus_at(&self, pos: Position) -> Option<Multiplier> {
        self.bonuses.get(&pos).copied()
    }

    /// Put an uncommitted tile on an empty square
    pub fn place_provisional(&mut self, x: usize, y: usize, tile: Tile) -> GameResult<()> {
        let pos = Position::new(x, y);
        if !self.in_bounds(pos) {
            return Err(GameError::OutOfBounds { x, y });
        }
        if self.is_occupied(pos) {
            return Err(GameError::CellOccupied { x, y });
        }

        self.cells.insert(
            pos,
            BoardCell {
                letter: tile.letter,
                value: tile.value,
                locked: false,
            },
        );
        Ok(())
    }

    /// Lock the provisional tiles at `positions`.
    ///
    /// Either every position is locked or, if any of them is not provisional,
    /// nothing changes.
    pub fn commit(&mut self, positions: &[Position]) -> GameResult<()> {
        if let Some(bad) = positions
            .iter()
            .find(|pos| !self.cells.get(pos).is_some_and(|cell| !cell.locked))
        {
            return Err(GameError::NotProvisional { x: bad.x, y: bad.y });
        }

        for pos in positions {
            if let Some(cell) = self.cells.get_mut(pos) {
                cell.locked = true;
            }
        }
        Ok(())
    }

    /// True until the first tile is locked
    pub fn is_empty(&self) -> bool {
        self.locked_count() == 0
    }

    pub fn locked_count(&self) -> usize {
        self.cells.values().filter(|cell| cell.locked).count()
    }

    pub fn cells(&self) -> impl Iterator<Item = (&Position, &BoardCell)> {
        self.cells.iter()
    }

    /// Board keyed by `"x,y"`, the shape clients receive
    pub fn to_sparse_map(&self) -> BTreeMap<String, BoardCell> {
        self.cells
            .iter()
            .map(|(pos, cell)| (pos.key(), *cell))
            .collect()
    }

    pub fn bonuses(&self) -> &HashMap<Position, Multiplier> {
        &self.bonuses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(letter: char) -> Tile {
        Tile::new(letter, 1)
    }

    #[test]
    fn test_place_provisional_rejects_occupied_cell() {
        let mut board = BoardState::default();
        board.place_provisional(7, 7, tile('A')).unwrap();

        let err = board.place_provisional(7, 7, tile('B')).unwrap_err();
        assert_eq!(err, GameError::CellOccupied { x: 7, y: 7 });
        assert_eq!(board.get(7, 7).unwrap().letter, 'A');
    }

    #[test]
    fn test_place_provisional_rejects_off_board() {
        let mut board = BoardState::default();
        let err = board.place_provisional(15, 0, tile('A')).unwrap_err();
        assert_eq!(err, GameError::OutOfBounds { x: 15, y: 0 });
        assert!(board.cells().next().is_none());
    }

    #[test]
    fn test_commit_locks_and_clears_empty_flag() {
        let mut board = BoardState::default();
        assert!(board.is_empty());

        board.place_provisional(7, 7, tile('A')).unwrap();
        assert!(board.is_empty());

        board.commit(&[Position::new(7, 7)]).unwrap();
        assert!(!board.is_empty());
        assert!(board.is_locked(Position::new(7, 7)));
    }

    #[test]
    fn test_commit_is_all_or_nothing() {
        let mut board = BoardState::default();
        board.place_provisional(7, 7, tile('A')).unwrap();

        let err = board
            .commit(&[Position::new(7, 7), Position::new(8, 7)])
            .unwrap_err();
        assert_eq!(err, GameError::NotProvisional { x: 8, y: 7 });
        assert!(!board.is_locked(Position::new(7, 7)));
        assert!(board.is_empty());
    }

    #[test]
    fn test_commit_rejects_already_locked() {
        let mut board = BoardState::default();
        board.place_provisional(7, 7, tile('A')).unwrap();
        board.commit(&[Position::new(7, 7)]).unwrap();

        assert!(board.commit(&[Position::new(7, 7)]).is_err());
    }

    #[test]
    fn test_sparse_map_keys() {
        let mut board = BoardState::default();
        board.place_provisional(3, 11, tile('Q')).unwrap();

        let map = board.to_sparse_map();
        assert_eq!(map.len(), 1);
        assert_eq!(map["3,11"].letter, 'Q');
        assert!(!map["3,11"].locked);
    }

    #[test]
    fn test_center_and_bonus() {
        let board = BoardState::default();
        assert_eq!(board.center(), Position::new(7, 7));
        assert_eq!(board.bonus_at(board.center()), Some(Multiplier::DoubleWord));
    }
}
