use std::collections::HashMap;
use once_cell::sync::Lazy;

use crate::models::{Multiplier, Position};

/// Side length of the standard board
pub const STANDARD_BOARD_SIZE: usize = 15;

// One eighth of the standard board: 0 <= y <= x <= 7. The rest follows by symmetry.
const TRIPLE_WORD: &[(usize, usize)] = &[(0, 0), (7, 0)];
const DOUBLE_WORD: &[(usize, usize)] = &[(1, 1), (2, 2), (3, 3), (4, 4), (7, 7)];
const TRIPLE_LETTER: &[(usize, usize)] = &[(5, 1), (5, 5)];
const DOUBLE_LETTER: &[(usize, usize)] = &[(3, 0), (6, 2), (7, 3), (6, 6)];

/// Bonus squares of the standard 15x15 board
pub static STANDARD_LAYOUT: Lazy<HashMap<Position, Multiplier>> = Lazy::new(|| {
    let mut layout = HashMap::new();
    let groups = [
        (TRIPLE_WORD, Multiplier::TripleWord),
        (DOUBLE_WORD, Multiplier::DoubleWord),
        (TRIPLE_LETTER, Multiplier::TripleLetter),
        (DOUBLE_LETTER, Multiplier::DoubleLetter),
    ];

    for (squares, multiplier) in groups {
        for &(x, y) in squares {
            for pos in mirror(x, y, STANDARD_BOARD_SIZE - 1) {
                layout.insert(pos, multiplier);
            }
        }
    }

    layout
});

/// All eight reflections of (x, y) across both axes and the diagonal
fn mirror(x: usize, y: usize, last: usize) -> Vec<Position> {
    let mut out = Vec::with_capacity(8);
    for (a, b) in [(x, y), (y, x)] {
        for px in [a, last - a] {
            for py in [b, last - b] {
                let pos = Position::new(px, py);
                if !out.contains(&pos) {
                    out.push(pos);
                }
            }
        }
    }
    out
}

/// Bonus layout for a board of the given size.
///
/// The standard board gets the standard layout. Any other size only marks its
/// center square as a double word.
pub fn layout_for(size: usize) -> HashMap<Position, Multiplier> {
    if size == STANDARD_BOARD_SIZE {
        STANDARD_LAYOUT.clone()
    } else {
        let center = size / 2;
        HashMap::from([(Position::new(center, center), Multiplier::DoubleWord)])
    }
}

/// Layout keyed by `"x,y"`, the shape clients receive
pub fn layout_by_key(layout: &HashMap<Position, Multiplier>) -> std::collections::BTreeMap<String, Multiplier> {
    layout
        .iter()
        .map(|(pos, multiplier)| (pos.key(), *multiplier))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(kind: Multiplier) -> usize {
        STANDARD_LAYOUT.values().filter(|m| **m == kind).count()
    }

    #[test]
    fn test_standard_layout_counts() {
        assert_eq!(count(Multiplier::TripleWord), 8);
        assert_eq!(count(Multiplier::DoubleWord), 17);
        assert_eq!(count(Multiplier::TripleLetter), 12);
        assert_eq!(count(Multiplier::DoubleLetter), 24);
    }

    #[test]
    fn test_known_squares() {
        let at = |x, y| STANDARD_LAYOUT.get(&Position::new(x, y)).copied();
        assert_eq!(at(7, 7), Some(Multiplier::DoubleWord));
        assert_eq!(at(14, 14), Some(Multiplier::TripleWord));
        assert_eq!(at(0, 7), Some(Multiplier::TripleWord));
        assert_eq!(at(11, 0), Some(Multiplier::DoubleLetter));
        assert_eq!(at(9, 13), Some(Multiplier::TripleLetter));
        assert_eq!(at(6, 7), None);
        assert_eq!(at(7, 9), None);
    }

    #[test]
    fn test_non_standard_size_marks_center_only() {
        let layout = layout_for(9);
        assert_eq!(layout.len(), 1);
        assert_eq!(layout.get(&Position::new(4, 4)), Some(&Multiplier::DoubleWord));
    }
}
