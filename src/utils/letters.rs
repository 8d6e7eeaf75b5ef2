use std::collections::HashMap;
use once_cell::sync::Lazy;

/// Marker letter carried by an unassigned blank tile
pub const BLANK: char = '_';

/// One row of the tile distribution: letter, point value, number of tiles in a fresh bag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LetterSpec {
    pub letter: char,
    pub value: u8,
    pub count: u8,
}

const fn tiles(letter: char, value: u8, count: u8) -> LetterSpec {
    LetterSpec { letter, value, count }
}

/// Standard English tile set, 100 tiles including two blanks
pub const LETTER_DISTRIBUTION: [LetterSpec; 27] = [
    tiles('A', 1, 9),
    tiles('B', 3, 2),
    tiles('C', 3, 2),
    tiles('D', 2, 4),
    tiles('E', 1, 12),
    tiles('F', 4, 2),
    tiles('G', 2, 3),
    tiles('H', 4, 2),
    tiles('I', 1, 9),
    tiles('J', 8, 1),
    tiles('K', 5, 1),
    tiles('L', 1, 4),
    tiles('M', 3, 2),
    tiles('N', 1, 6),
    tiles('O', 1, 8),
    tiles('P', 3, 2),
    tiles('Q', 10, 1),
    tiles('R', 1, 6),
    tiles('S', 1, 4),
    tiles('T', 1, 6),
    tiles('U', 1, 4),
    tiles('V', 4, 2),
    tiles('W', 4, 2),
    tiles('X', 8, 1),
    tiles('Y', 4, 2),
    tiles('Z', 10, 1),
    tiles(BLANK, 0, 2),
];

/// Letter values keyed by letter, built once from the distribution table
pub static LETTER_VALUES: Lazy<HashMap<char, u8>> = Lazy::new(|| {
    LETTER_DISTRIBUTION
        .iter()
        .map(|entry| (entry.letter, entry.value))
        .collect()
});

/// Get the point value for a letter. Unknown characters are worth nothing.
pub fn get_letter_value(letter: char) -> u8 {
    let upper = letter.to_ascii_uppercase();
    *LETTER_VALUES.get(&upper).unwrap_or(&0)
}

/// Total number of tiles in a fresh bag
pub fn total_tile_count() -> usize {
    LETTER_DISTRIBUTION
        .iter()
        .map(|entry| entry.count as usize)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_values() {
        assert_eq!(get_letter_value('E'), 1);
        assert_eq!(get_letter_value('q'), 10);
        assert_eq!(get_letter_value('X'), 8);
        assert_eq!(get_letter_value('D'), 2);
        assert_eq!(get_letter_value(BLANK), 0);
        assert_eq!(get_letter_value('!'), 0);
    }

    #[test]
    fn test_distribution_totals() {
        assert_eq!(total_tile_count(), 100);
        assert_eq!(LETTER_DISTRIBUTION.len(), 27);
        assert!(LETTER_DISTRIBUTION.iter().all(|s| s.value <= 10));
    }
}
