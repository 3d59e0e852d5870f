use serde::{Deserialize, Serialize};
use std::fmt;

/// Pip count on one half of a tile
pub type Pip = u8;

/// A domino. The pair is ordered only for orientation: `(a, b)` and `(b, a)`
/// are the same tile, and once placed on a train `a` faces the previous end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub a: Pip,
    pub b: Pip,
}

impl Tile {
    pub fn new(a: Pip, b: Pip) -> Self {
        Tile { a, b }
    }

    pub fn is_double(&self) -> bool {
        self.a == self.b
    }

    /// Total pips, used for round scoring and by the decision heuristic
    pub fn pips(&self) -> u32 {
        self.a as u32 + self.b as u32
    }

    /// True if either half shows `value`
    pub fn has(&self, value: Pip) -> bool {
        self.a == value || self.b == value
    }

    /// Unordered identity check
    pub fn same_tile(&self, other: &Tile) -> bool {
        (self.a == other.a && self.b == other.b) || (self.a == other.b && self.b == other.a)
    }

    pub fn flipped(&self) -> Tile {
        Tile { a: self.b, b: self.a }
    }

    /// Orient the tile so its first half equals `end`.
    /// Returns None when neither half matches.
    pub fn oriented_to(&self, end: Pip) -> Option<Tile> {
        if self.a == end {
            Some(*self)
        } else if self.b == end {
            Some(self.flipped())
        } else {
            None
        }
    }

    /// Low half first
    pub fn canonical(&self) -> Tile {
        if self.a <= self.b {
            *self
        } else {
            self.flipped()
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}|{}]", self.a, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_detection() {
        assert!(Tile::new(6, 6).is_double());
        assert!(!Tile::new(6, 5).is_double());
    }

    #[test]
    fn test_same_tile_ignores_orientation() {
        let t = Tile::new(1, 2);
        assert!(t.same_tile(&Tile::new(2, 1)));
        assert!(t.same_tile(&Tile::new(1, 2)));
        assert!(!t.same_tile(&Tile::new(1, 3)));
    }

    #[test]
    fn test_oriented_to_flips_when_needed() {
        let t = Tile::new(1, 2);
        assert_eq!(t.oriented_to(2), Some(Tile::new(2, 1)));
        assert_eq!(t.oriented_to(1), Some(Tile::new(1, 2)));
        assert_eq!(t.oriented_to(5), None);
    }

    #[test]
    fn test_pips_and_display() {
        let t = Tile::new(12, 7);
        assert_eq!(t.pips(), 19);
        assert_eq!(t.to_string(), "[12|7]");
        assert_eq!(t.canonical(), Tile::new(7, 12));
    }
}
