use crate::tile::{Pip, Tile};
use serde::Serialize;

/// Identifies one train on the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TrainKey {
    /// The train owned by the player at this seat
    Personal(usize),
    /// The shared train anyone may extend
    Mexican,
}

/// A chain of tiles running from the engine tile
#[derive(Debug, Clone, Serialize)]
pub struct Train {
    path: Vec<Tile>,
    pub is_open: bool,
    owner: Option<usize>,
}

impl Train {
    /// Personal trains start closed
    pub fn personal(owner: usize) -> Self {
        Train {
            path: Vec::new(),
            is_open: false,
            owner: Some(owner),
        }
    }

    pub fn mexican() -> Self {
        Train {
            path: Vec::new(),
            is_open: true,
            owner: None,
        }
    }

    pub fn owner(&self) -> Option<usize> {
        self.owner
    }

    pub fn path(&self) -> &[Tile] {
        &self.path
    }

    /// Value the next tile must match: the engine's first half while the
    /// train is empty, otherwise the far half of the last tile
    pub fn end_value(&self, engine: &Tile) -> Pip {
        match self.path.last() {
            Some(last) => last.b,
            None => engine.a,
        }
    }

    /// The Mexican train, the player's own train, or any open train
    pub fn is_playable_by(&self, player: usize) -> bool {
        match self.owner {
            None => true,
            Some(owner) => owner == player || self.is_open,
        }
    }

    /// Append an already-oriented tile
    pub(crate) fn push(&mut self, tile: Tile) {
        self.path.push(tile);
    }
}

/// Every train on the table: one per seat plus the Mexican train.
/// Iteration order is seat order, Mexican last.
#[derive(Debug, Clone)]
pub struct TrainMap {
    personal: Vec<Train>,
    mexican: Train,
}

impl TrainMap {
    pub fn new(player_count: usize) -> Self {
        TrainMap {
            personal: (0..player_count).map(Train::personal).collect(),
            mexican: Train::mexican(),
        }
    }

    pub fn get(&self, key: TrainKey) -> Option<&Train> {
        match key {
            TrainKey::Personal(seat) => self.personal.get(seat),
            TrainKey::Mexican => Some(&self.mexican),
        }
    }

    pub fn get_mut(&mut self, key: TrainKey) -> Option<&mut Train> {
        match key {
            TrainKey::Personal(seat) => self.personal.get_mut(seat),
            TrainKey::Mexican => Some(&mut self.mexican),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (TrainKey, &Train)> {
        self.personal
            .iter()
            .enumerate()
            .map(|(seat, train)| (TrainKey::Personal(seat), train))
            .chain(std::iter::once((TrainKey::Mexican, &self.mexican)))
    }
}

/// Tiles held by one player. Order only matters for display and for
/// tie-breaking between equally scored plays.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Hand {
    tiles: Vec<Tile>,
}

impl Hand {
    pub fn new() -> Self {
        Hand { tiles: Vec::new() }
    }

    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        Hand { tiles }
    }

    pub fn add_tile(&mut self, tile: Tile) {
        self.tiles.push(tile);
    }

    /// Position of `tile` in either orientation
    pub fn find(&self, tile: &Tile) -> Option<usize> {
        self.tiles.iter().position(|t| t.same_tile(tile))
    }

    pub fn remove_tile(&mut self, index: usize) -> Option<Tile> {
        if index < self.tiles.len() {
            Some(self.tiles.remove(index))
        } else {
            None
        }
    }

    pub fn size(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Penalty owed if the round ended now
    pub fn pip_total(&self) -> u32 {
        self.tiles.iter().map(Tile::pips).sum()
    }
}

/// Undealt tiles; draws come off the end
#[derive(Debug, Clone, Default)]
pub struct Boneyard {
    tiles: Vec<Tile>,
}

impl Boneyard {
    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        Boneyard { tiles }
    }

    pub fn draw(&mut self) -> Option<Tile> {
        self.tiles.pop()
    }

    pub fn size(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_value_empty_train_uses_engine() {
        let engine = Tile::new(9, 9);
        let train = Train::personal(0);
        assert_eq!(train.end_value(&engine), 9);
    }

    #[test]
    fn test_end_value_uses_last_tile() {
        let engine = Tile::new(9, 9);
        let mut train = Train::mexican();
        train.push(Tile::new(9, 4));
        train.push(Tile::new(4, 11));
        assert_eq!(train.end_value(&engine), 11);
    }

    #[test]
    fn test_playability() {
        let mut other = Train::personal(1);
        assert!(Train::mexican().is_playable_by(0));
        assert!(Train::personal(0).is_playable_by(0));
        assert!(!other.is_playable_by(0));
        other.is_open = true;
        assert!(other.is_playable_by(0));
    }

    #[test]
    fn test_train_map_order() {
        let map = TrainMap::new(3);
        let keys: Vec<TrainKey> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                TrainKey::Personal(0),
                TrainKey::Personal(1),
                TrainKey::Personal(2),
                TrainKey::Mexican
            ]
        );
        assert!(map.get(TrainKey::Personal(3)).is_none());
        assert!(map.get(TrainKey::Mexican).is_some_and(|t| t.is_open));
        assert_eq!(map.get(TrainKey::Personal(2)).and_then(|t| t.owner()), Some(2));
        assert_eq!(map.get(TrainKey::Mexican).and_then(|t| t.owner()), None);
    }

    #[test]
    fn test_hand_find_either_orientation() {
        let mut hand = Hand::from_tiles(vec![Tile::new(0, 1), Tile::new(1, 2)]);
        assert_eq!(hand.find(&Tile::new(2, 1)), Some(1));
        assert_eq!(hand.find(&Tile::new(2, 2)), None);
        assert_eq!(hand.pip_total(), 4);
        assert_eq!(hand.remove_tile(0), Some(Tile::new(0, 1)));
        assert_eq!(hand.size(), 1);
        assert_eq!(hand.remove_tile(5), None);
    }

    #[test]
    fn test_boneyard_draws_from_end() {
        let mut boneyard = Boneyard::from_tiles(vec![Tile::new(0, 0), Tile::new(0, 1)]);
        assert_eq!(boneyard.draw(), Some(Tile::new(0, 1)));
        assert_eq!(boneyard.draw(), Some(Tile::new(0, 0)));
        assert_eq!(boneyard.draw(), None);
        assert!(boneyard.is_empty());
    }
}
