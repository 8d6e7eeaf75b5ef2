use crate::{game::board::BoardState, models::Position};

/// Tiles placed in one move that earn the bingo bonus
pub const BINGO_TILE_COUNT: usize = 7;
/// Flat bonus for a bingo, added after the word multiplier
pub const BINGO_BONUS: u32 = 50;

/// Breakdown of a move's score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreResult {
    /// Sum of the new tiles after letter bonuses
    pub letter_total: u32,
    /// Product of every word bonus covered this move
    pub word_multiplier: u32,
    /// Bingo bonus, 0 or [`BINGO_BONUS`]
    pub bingo_bonus: u32,
    /// Final score for the move
    pub score: u32,
}

pub struct Scorer;

impl Scorer {
    /// Score a move from the tiles it placed.
    ///
    /// Scoring rules:
    /// - Only newly placed tiles count; locked tiles and their squares are ignored
    /// - DL / TL multiply the tile on that square by 2 / 3
    /// - DW / TW multiply the move total by 2 / 3, compounding when several are covered
    /// - The multiplier applies once to the sum of all new tiles, not per formed word
    /// - +50 when all seven tiles are placed, not multiplied
    pub fn calculate_score_breakdown(board: &BoardState, placed: &[Position]) -> ScoreResult {
        let mut letter_total = 0;
        let mut word_multiplier = 1;

        for pos in placed {
            let Some(cell) = board.at(*pos) else {
                continue;
            };
            let base_value = cell.value as u32;

            match board.bonus_at(*pos) {
                Some(bonus) => {
                    letter_total += base_value * bonus.letter_factor();
                    word_multiplier *= bonus.word_factor();
                }
                None => letter_total += base_value,
            }
        }

        let bingo_bonus = Self::bingo_bonus(placed.len());

        ScoreResult {
            letter_total,
            word_multiplier,
            bingo_bonus,
            score: letter_total * word_multiplier + bingo_bonus,
        }
    }

    pub fn calculate_score(board: &BoardState, placed: &[Position]) -> u32 {
        Self::calculate_score_breakdown(board, placed).score
    }

    fn bingo_bonus(tiles_placed: usize) -> u32 {
        if tiles_placed == BINGO_TILE_COUNT { BINGO_BONUS } else { 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tile;

    fn place(board: &mut BoardState, cells: &[(usize, usize, char, u8)]) -> Vec<Position> {
        for &(x, y, letter, value) in cells {
            board.place_provisional(x, y, Tile::new(letter, value)).unwrap();
        }
        cells.iter().map(|&(x, y, _, _)| Position::new(x, y)).collect()
    }

    #[test]
    fn test_bingo_bonus() {
        assert_eq!(Scorer::bingo_bonus(6), 0);
        assert_eq!(Scorer::bingo_bonus(7), 50);
        assert_eq!(Scorer::bingo_bonus(1), 0);
    }

    #[test]
    fn test_center_double_word() {
        let mut board = BoardState::default();
        let placed = place(&mut board, &[(6, 7, 'C', 3), (7, 7, 'A', 1), (8, 7, 'T', 1)]);

        // C(3) + A(1) + T(1) = 5, x2 for the center = 10
        assert_eq!(Scorer::calculate_score(&board, &placed), 10);
    }

    #[test]
    fn test_letter_bonus() {
        let mut board = BoardState::default();
        // (3,0) is DL
        let placed = place(&mut board, &[(3, 0, 'Q', 10), (4, 0, 'I', 1)]);

        let result = Scorer::calculate_score_breakdown(&board, &placed);
        assert_eq!(result.letter_total, 21);
        assert_eq!(result.word_multiplier, 1);
        assert_eq!(result.score, 21);
    }

    #[test]
    fn test_word_bonuses_compound() {
        let mut board = BoardState::default();
        // (0,0) and (7,0) are both TW
        let cells: Vec<(usize, usize, char, u8)> = (0..8).map(|x| (x, 0, 'E', 1)).collect();
        let placed = place(&mut board, &cells[..7]);
        let mut all_eight = placed.clone();
        all_eight.extend(place(&mut board, &cells[7..]));

        // Seven tiles: (0,0) TW and (3,0) DL, letter total 8, x3, plus bingo
        let seven = Scorer::calculate_score_breakdown(&board, &placed);
        assert_eq!(seven.letter_total, 8);
        assert_eq!(seven.word_multiplier, 3);
        assert_eq!(seven.score, 8 * 3 + 50);

        // 8 tiles cover both TWs: x9, and no bingo
        let eight = Scorer::calculate_score_breakdown(&board, &all_eight);
        assert_eq!(eight.word_multiplier, 9);
        assert_eq!(eight.bingo_bonus, 0);
        assert_eq!(eight.score, 9 * 9);
    }

    #[test]
    fn test_locked_tiles_earn_nothing() {
        let mut board = BoardState::default();
        let first = place(&mut board, &[(6, 7, 'C', 3), (7, 7, 'A', 1), (8, 7, 'T', 1)]);
        board.commit(&first).unwrap();

        // "ARC" down from the locked A: only R and C count, the center DW is spent
        let placed = place(&mut board, &[(7, 8, 'R', 1), (7, 9, 'C', 3)]);
        assert_eq!(Scorer::calculate_score(&board, &placed), 4);
    }

    #[test]
    fn test_blank_scores_zero() {
        let mut board = BoardState::default();
        let placed = place(&mut board, &[(7, 7, 'Z', 0), (8, 7, 'A', 1)]);
        assert_eq!(Scorer::calculate_score(&board, &placed), 2);
    }
}
