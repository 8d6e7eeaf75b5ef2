use crate::{
    error::{GameError, GameResult},
    game::board::BoardState,
    models::{Axis, Position},
};
use std::collections::HashSet;

/// Geometric legality of a proposed move against the committed board.
///
/// Word validity is not judged here.
pub struct MoveValidator;

impl MoveValidator {
    /// Run every check in order and report the first failure
    pub fn validate(board: &BoardState, positions: &[Position]) -> GameResult<()> {
        Self::check_shape(board, positions)?;
        Self::check_straight_line(positions)?;
        Self::check_covers_center(board, positions)?;
        Self::check_connected(board, positions)?;
        Self::check_contiguous(board, positions)
    }

    /// Non-empty, no repeated squares, every square on the board and free
    pub fn check_shape(board: &BoardState, positions: &[Position]) -> GameResult<()> {
        if positions.is_empty() {
            return Err(GameError::EmptyMove);
        }

        let mut seen = HashSet::with_capacity(positions.len());
        for &pos in positions {
            if !seen.insert(pos) {
                return Err(GameError::DuplicatePosition { x: pos.x, y: pos.y });
            }
            if !board.in_bounds(pos) {
                return Err(GameError::OutOfBounds { x: pos.x, y: pos.y });
            }
            if board.is_occupied(pos) {
                return Err(GameError::CellOccupied { x: pos.x, y: pos.y });
            }
        }

        Ok(())
    }

    /// All positions share a row, or all share a column
    pub fn check_straight_line(positions: &[Position]) -> GameResult<()> {
        match Self::line_axis(positions) {
            Some(_) => Ok(()),
            None if positions.len() <= 1 => Ok(()),
            None => Err(GameError::NotStraightLine),
        }
    }

    /// On an empty board one of the new tiles must sit on the center square
    pub fn check_covers_center(board: &BoardState, positions: &[Position]) -> GameResult<()> {
        if board.is_empty() && !positions.contains(&board.center()) {
            return Err(GameError::MustCoverCenter);
        }
        Ok(())
    }

    /// On a non-empty board a new tile must touch a locked one
    pub fn check_connected(board: &BoardState, positions: &[Position]) -> GameResult<()> {
        if board.is_empty() {
            return Ok(());
        }

        let touches = positions.iter().any(|pos| {
            pos.neighbors(board.size())
                .any(|neighbor| board.is_locked(neighbor))
        });

        if touches {
            Ok(())
        } else {
            Err(GameError::NotConnected)
        }
    }

    /// No empty square between the first and last new tile
    pub fn check_contiguous(board: &BoardState, positions: &[Position]) -> GameResult<()> {
        let Some(axis) = Self::line_axis(positions) else {
            return Ok(());
        };

        let new: HashSet<Position> = positions.iter().copied().collect();
        let anchor = positions[0];
        let first = positions.iter().map(|p| p.along(axis)).min().unwrap_or(0);
        let last = positions.iter().map(|p| p.along(axis)).max().unwrap_or(0);

        let gap = (first..=last).map(|i| match axis {
            Axis::Horizontal => Position::new(i, anchor.y),
            Axis::Vertical => Position::new(anchor.x, i),
        })
        .any(|pos| !new.contains(&pos) && !board.is_locked(pos));

        if gap {
            Err(GameError::NotContiguous)
        } else {
            Ok(())
        }
    }

    /// Shared axis of two or more positions. `None` for a single tile or a scattered move.
    pub fn line_axis(positions: &[Position]) -> Option<Axis> {
        let (first, rest) = positions.split_first()?;
        if rest.is_empty() {
            return None;
        }

        if rest.iter().all(|p| p.y == first.y) {
            Some(Axis::Horizontal)
        } else if rest.iter().all(|p| p.x == first.x) {
            Some(Axis::Vertical)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tile;

    fn board_with_locked(cells: &[(usize, usize, char)]) -> BoardState {
        let mut board = BoardState::default();
        for &(x, y, letter) in cells {
            board.place_provisional(x, y, Tile::new(letter, 1)).unwrap();
        }
        let positions: Vec<Position> = cells.iter().map(|&(x, y, _)| Position::new(x, y)).collect();
        board.commit(&positions).unwrap();
        board
    }

    fn at(x: usize, y: usize) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn test_straight_line() {
        assert!(MoveValidator::check_straight_line(&[at(7, 7)]).is_ok());
        assert!(MoveValidator::check_straight_line(&[at(6, 7), at(7, 7), at(9, 7)]).is_ok());
        assert!(MoveValidator::check_straight_line(&[at(7, 5), at(7, 9)]).is_ok());
        assert_eq!(
            MoveValidator::check_straight_line(&[at(7, 7), at(8, 8)]),
            Err(GameError::NotStraightLine)
        );
    }

    #[test]
    fn test_first_move_must_cover_center() {
        let board = BoardState::default();
        assert_eq!(
            MoveValidator::validate(&board, &[at(1, 1), at(2, 1)]),
            Err(GameError::MustCoverCenter)
        );
        assert!(MoveValidator::validate(&board, &[at(6, 7), at(7, 7)]).is_ok());
    }

    #[test]
    fn test_connectivity() {
        let board = board_with_locked(&[(6, 7, 'C'), (7, 7, 'A'), (8, 7, 'T')]);
        assert!(MoveValidator::check_connected(&board, &[at(7, 8), at(7, 9)]).is_ok());
        assert_eq!(
            MoveValidator::check_connected(&board, &[at(2, 2), at(3, 2)]),
            Err(GameError::NotConnected)
        );
        // Diagonal contact does not count
        assert_eq!(
            MoveValidator::check_connected(&board, &[at(9, 8)]),
            Err(GameError::NotConnected)
        );
    }

    #[test]
    fn test_contiguity_allows_locked_tiles_in_gap() {
        let board = board_with_locked(&[(7, 7, 'A')]);
        assert!(MoveValidator::validate(&board, &[at(6, 7), at(8, 7)]).is_ok());
        assert_eq!(
            MoveValidator::validate(&board, &[at(6, 7), at(10, 7)]),
            Err(GameError::NotContiguous)
        );
    }

    #[test]
    fn test_shape_checks() {
        let board = board_with_locked(&[(7, 7, 'A')]);
        assert_eq!(MoveValidator::validate(&board, &[]), Err(GameError::EmptyMove));
        assert_eq!(
            MoveValidator::validate(&board, &[at(7, 8), at(7, 8)]),
            Err(GameError::DuplicatePosition { x: 7, y: 8 })
        );
        assert_eq!(
            MoveValidator::validate(&board, &[at(7, 7)]),
            Err(GameError::CellOccupied { x: 7, y: 7 })
        );
        assert_eq!(
            MoveValidator::validate(&board, &[at(7, 20)]),
            Err(GameError::OutOfBounds { x: 7, y: 20 })
        );
    }
}
