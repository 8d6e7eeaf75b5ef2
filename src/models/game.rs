use serde::{Deserialize, Serialize};

use crate::utils::letters::BLANK;

/// Identifier the hub assigns to a connected player
pub type PlayerId = i64;

/// Board coordinate. `x` is the column, `y` is the row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Key used by the sparse wire representation of the board
    pub fn key(&self) -> String {
        format!("{},{}", self.x, self.y)
    }

    /// Coordinate along `axis`
    pub fn along(&self, axis: Axis) -> usize {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Neighbour one step backward along `axis`, if it is still on the board
    pub fn before(&self, axis: Axis) -> Option<Position> {
        match axis {
            Axis::Horizontal => self.x.checked_sub(1).map(|x| Position::new(x, self.y)),
            Axis::Vertical => self.y.checked_sub(1).map(|y| Position::new(self.x, y)),
        }
    }

    /// Neighbour one step forward along `axis`, bounded by `size`
    pub fn after(&self, axis: Axis, size: usize) -> Option<Position> {
        let next = match axis {
            Axis::Horizontal => Position::new(self.x + 1, self.y),
            Axis::Vertical => Position::new(self.x, self.y + 1),
        };
        (next.x < size && next.y < size).then_some(next)
    }

    /// Orthogonal neighbours that fall inside a board of `size`
    pub fn neighbors(self, size: usize) -> impl Iterator<Item = Position> {
        [Axis::Horizontal, Axis::Vertical]
            .into_iter()
            .flat_map(move |axis| [self.before(axis), self.after(axis, size)])
            .flatten()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq, Ord, PartialOrd)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn flip(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub enum Multiplier {
    #[serde(rename = "DL")]
    DoubleLetter,
    #[serde(rename = "TL")]
    TripleLetter,
    #[serde(rename = "DW")]
    DoubleWord,
    #[serde(rename = "TW")]
    TripleWord,
}

impl Multiplier {
    /// Factor applied to the letter on this square
    pub fn letter_factor(self) -> u32 {
        match self {
            Multiplier::DoubleLetter => 2,
            Multiplier::TripleLetter => 3,
            Multiplier::DoubleWord | Multiplier::TripleWord => 1,
        }
    }

    /// Factor applied to the move total
    pub fn word_factor(self) -> u32 {
        match self {
            Multiplier::DoubleWord => 2,
            Multiplier::TripleWord => 3,
            Multiplier::DoubleLetter | Multiplier::TripleLetter => 1,
        }
    }
}

/// A single letter tile. Blanks carry the `_` marker until placed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub struct Tile {
    pub letter: char,
    pub value: u8,
}

impl Tile {
    pub const fn new(letter: char, value: u8) -> Self {
        Self { letter, value }
    }

    pub fn blank() -> Self {
        Self::new(BLANK, 0)
    }

    pub fn is_blank(&self) -> bool {
        self.letter == BLANK
    }
}

/// Occupied board square
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardCell {
    pub letter: char,
    pub value: u8,
    pub locked: bool,
}

impl BoardCell {
    pub fn tile(&self) -> Tile {
        Tile::new(self.letter, self.value)
    }
}

/// One tile of a proposed move, as submitted by a client.
///
/// A tile with value 0 is taken from a blank on the rack, and `letter` is the
/// letter the blank stands for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlacedTile {
    pub x: usize,
    pub y: usize,
    pub letter: char,
    pub value: u8,
}

impl PlacedTile {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn tile(&self) -> Tile {
        Tile::new(self.letter.to_ascii_uppercase(), self.value)
    }
}

/// A word formed on the board by a move
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Word {
    pub text: String,
    pub cells: Vec<Position>,
    pub axis: Axis,
    pub start: Position,
}
