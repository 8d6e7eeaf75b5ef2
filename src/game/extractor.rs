use std::collections::HashSet;

use crate::{
    error::{GameError, GameResult},
    game::{board::BoardState, validator::MoveValidator},
    models::{Axis, Position, Word},
};

/// Finds the words a move forms.
///
/// Works on a board that already holds this turn's provisional tiles and only
/// ever reads from it.
pub struct WordExtractor;

impl WordExtractor {
    /// Every word of two or more letters running through the new tiles.
    ///
    /// The main word along the move's line comes first, then cross words in
    /// the order their tiles were given. Duplicates by text, axis and start
    /// square are dropped.
    pub fn extract(board: &BoardState, new: &[Position]) -> Vec<Word> {
        let mut words = Vec::new();

        let cross_axes = match MoveValidator::line_axis(new) {
            Some(axis) => {
                if let Some(lowest) = new.iter().min_by_key(|p| p.along(axis)) {
                    words.extend(Self::run_through(board, *lowest, axis));
                }
                vec![axis.flip()]
            }
            // A lone tile has no line of its own, so both directions are cross words
            None => vec![Axis::Horizontal, Axis::Vertical],
        };

        for &pos in new {
            for &axis in &cross_axes {
                words.extend(Self::run_through(board, pos, axis));
            }
        }

        let mut seen = HashSet::new();
        words.retain(|word| seen.insert((word.text.clone(), word.axis, word.start)));
        words
    }

    /// Like [`extract`](Self::extract), but a move that forms nothing is an error
    pub fn extract_checked(board: &BoardState, new: &[Position]) -> GameResult<Vec<Word>> {
        let words = Self::extract(board, new);
        if words.is_empty() {
            return Err(GameError::NoWordFormed);
        }
        Ok(words)
    }

    /// The contiguous run through `pos` along `axis`, if it is longer than one letter
    fn run_through(board: &BoardState, pos: Position, axis: Axis) -> Option<Word> {
        if !board.is_occupied(pos) {
            return None;
        }

        let mut start = pos;
        while let Some(prev) = start.before(axis).filter(|p| board.is_occupied(*p)) {
            start = prev;
        }

        let mut cells = vec![start];
        let mut text = String::new();
        let mut cursor = start;
        while let Some(cell) = board.at(cursor) {
            text.push(cell.letter);
            match cursor.after(axis, board.size()) {
                Some(next) if board.is_occupied(next) => {
                    cells.push(next);
                    cursor = next;
                }
                _ => break,
            }
        }

        (cells.len() > 1).then_some(Word {
            text,
            cells,
            axis,
            start,
        })
    }
}
