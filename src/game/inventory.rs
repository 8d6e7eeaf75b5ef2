use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::{models::Tile, utils::letters::LETTER_DISTRIBUTION};

/// The bag of undrawn tiles.
///
/// Tiles are kept in shuffled order and drawn from the end, so every draw is
/// uniform over what remains. Returned tiles trigger a fresh shuffle.
#[derive(Debug, Clone)]
pub struct TileInventory {
    tiles: Vec<Tile>,
    rng: StdRng,
}

impl TileInventory {
    /// Fill a bag from the letter distribution and shuffle it with `rng`
    pub fn build(rng: StdRng) -> Self {
        let tiles = LETTER_DISTRIBUTION
            .iter()
            .flat_map(|entry| {
                std::iter::repeat_n(Tile::new(entry.letter, entry.value), entry.count as usize)
            })
            .collect();

        let mut inventory = Self { tiles, rng };
        inventory.shuffle();
        inventory
    }

    /// Bag whose shuffles are reproducible from `seed`
    pub fn seeded(seed: u64) -> Self {
        Self::build(StdRng::seed_from_u64(seed))
    }

    /// Bag seeded from operating system entropy
    pub fn from_entropy() -> Self {
        Self::build(StdRng::from_os_rng())
    }

    /// Take up to `count` tiles. A short bag yields what it has.
    pub fn draw(&mut self, count: usize) -> Vec<Tile> {
        let take = count.min(self.tiles.len());
        let drawn = self.tiles.split_off(self.tiles.len() - take);

        if take < count {
            tracing::debug!(
                "Short draw: requested {} tiles, {} available",
                count,
                take
            );
        }

        drawn
    }

    /// Put `tiles` back into the bag and reshuffle
    pub fn exchange(&mut self, tiles: Vec<Tile>) {
        self.tiles.extend(tiles);
        self.shuffle();
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    fn shuffle(&mut self) {
        self.tiles.shuffle(&mut self.rng);
    }

    /// Pull a specific letter out of the bag so tests can stage racks
    #[cfg(test)]
    pub(crate) fn take_letter(&mut self, letter: char) -> Option<Tile> {
        let index = self.tiles.iter().position(|tile| tile.letter == letter)?;
        Some(self.tiles.swap_remove(index))
    }

    /// Shrink the bag to `remaining` tiles, handing back the rest
    #[cfg(test)]
    pub(crate) fn drain_to(&mut self, remaining: usize) -> Vec<Tile> {
        let excess = self.tiles.len().saturating_sub(remaining);
        self.tiles.drain(..excess).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::letters::total_tile_count;

    #[test]
    fn test_build_contains_full_distribution() {
        let inventory = TileInventory::seeded(7);
        assert_eq!(inventory.len(), total_tile_count());

        let blanks = inventory.tiles.iter().filter(|t| t.is_blank()).count();
        let es = inventory.tiles.iter().filter(|t| t.letter == 'E').count();
        assert_eq!(blanks, 2);
        assert_eq!(es, 12);
    }

    #[test]
    fn test_same_seed_same_order() {
        let mut a = TileInventory::seeded(42);
        let mut b = TileInventory::seeded(42);
        assert_eq!(a.draw(20), b.draw(20));

        let mut c = TileInventory::seeded(43);
        let mut d = TileInventory::seeded(42);
        assert_ne!(c.draw(100), d.draw(100));
    }

    #[test]
    fn test_short_draw_returns_what_remains() {
        let mut inventory = TileInventory::seeded(1);
        inventory.drain_to(5);

        let drawn = inventory.draw(7);
        assert_eq!(drawn.len(), 5);
        assert!(inventory.is_empty());

        assert!(inventory.draw(1).is_empty());
    }

    #[test]
    fn test_exchange_returns_tiles_to_bag() {
        let mut inventory = TileInventory::seeded(3);
        let drawn = inventory.draw(3);
        assert_eq!(inventory.len(), 97);

        inventory.exchange(drawn);
        assert_eq!(inventory.len(), 100);
    }
}
