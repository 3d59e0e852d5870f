use crate::rng::GameRng;
use crate::tile::types::{Pip, Tile};

/// Double-twelve set
pub const MAX_PIPS: Pip = 12;

/// Number of tiles in a full set for `max_pips`
pub fn set_size(max_pips: Pip) -> usize {
    let n = max_pips as usize;
    (n + 1) * (n + 2) / 2
}

/// Every unordered pair (i, j) with i <= j, in ascending order
pub fn build_set(max_pips: Pip) -> Vec<Tile> {
    let mut tiles = Vec::with_capacity(set_size(max_pips));
    for i in 0..=max_pips {
        for j in i..=max_pips {
            tiles.push(Tile::new(i, j));
        }
    }
    tiles
}

/// Shuffle a set into draw order. Takes the set by value: the unshuffled
/// order is gone afterwards.
pub fn shuffle_set(mut tiles: Vec<Tile>, rng: &mut GameRng) -> Vec<Tile> {
    rng.shuffle(&mut tiles);
    tiles
}

/// Remove the double showing `value` from `tiles`
pub fn take_double(tiles: &mut Vec<Tile>, value: Pip) -> Option<Tile> {
    let idx = tiles.iter().position(|t| t.a == value && t.b == value)?;
    Some(tiles.remove(idx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_set_sizes() {
        for max in 0..=15u8 {
            let set = build_set(max);
            assert_eq!(set.len(), set_size(max), "max_pips {}", max);
            let unique: HashSet<Tile> = set.iter().map(|t| t.canonical()).collect();
            assert_eq!(unique.len(), set.len(), "duplicate tile for max_pips {}", max);
        }
        assert_eq!(set_size(MAX_PIPS), 91);
        assert_eq!(set_size(2), 6);
    }

    #[test]
    fn test_build_set_order() {
        let set = build_set(2);
        let expected = vec![
            Tile::new(0, 0),
            Tile::new(0, 1),
            Tile::new(0, 2),
            Tile::new(1, 1),
            Tile::new(1, 2),
            Tile::new(2, 2),
        ];
        assert_eq!(set, expected);
    }

    #[test]
    fn test_shuffle_set_preserves_tiles() {
        let mut rng = GameRng::new(Some(5));
        let original = build_set(MAX_PIPS);
        let shuffled = shuffle_set(original.clone(), &mut rng);
        assert_eq!(shuffled.len(), original.len());
        assert_ne!(shuffled, original, "91 tiles should not stay in seed order");

        let mut sorted = shuffled;
        sorted.sort_by_key(|t| (t.a, t.b));
        assert_eq!(sorted, original);
    }

    #[test]
    fn test_take_double() {
        let mut set = build_set(MAX_PIPS);
        let engine = take_double(&mut set, 7);
        assert_eq!(engine, Some(Tile::new(7, 7)));
        assert_eq!(set.len(), 90);
        assert_eq!(take_double(&mut set, 7), None);
    }
}
