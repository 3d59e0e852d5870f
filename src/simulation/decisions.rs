use crate::game::state::GameState;
use crate::game::zones::TrainKey;
use crate::tile::Tile;

/// A legal (tile, train) pairing and how much the computer likes it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub tile: Tile,
    pub key: TrainKey,
    pub score: i32,
}

/// Decision engine for computer opponents
pub struct DecisionEngine;

impl DecisionEngine {
    /// Heavy tiles first, own train over the Mexican train over anyone
    /// else's open train, doubles last since they demand a follow-up play.
    pub fn score_play(tile: &Tile, key: TrainKey, player: usize) -> i32 {
        let mut score = tile.pips() as i32;
        if key == TrainKey::Personal(player) {
            score += 5;
        }
        if key == TrainKey::Mexican {
            score += 2;
        }
        if tile.is_double() {
            score -= 10;
        }
        score
    }

    /// Every legal play in hand order, then table order. With `only` set,
    /// just that tile is considered (a tile that was just drawn).
    pub fn candidates(state: &GameState, player: usize, only: Option<Tile>) -> Vec<Candidate> {
        let hand: Vec<Tile> = match (only, state.players.get(player)) {
            (Some(tile), _) => vec![tile],
            (None, Some(p)) => p.hand.tiles().to_vec(),
            (None, None) => return Vec::new(),
        };
        let engine = state.table.engine;

        let mut found = Vec::new();
        for tile in &hand {
            for (key, train) in state.table.trains.iter() {
                if train.is_playable_by(player) && tile.has(train.end_value(&engine)) {
                    found.push(Candidate {
                        tile: *tile,
                        key,
                        score: Self::score_play(tile, key, player),
                    });
                }
            }
        }
        found
    }

    /// Highest score wins; the stable sort leaves ties in enumeration order
    pub fn choose_play(state: &GameState, player: usize, only: Option<Tile>) -> Option<Candidate> {
        let mut found = Self::candidates(state, player, only);
        found.sort_by(|a, b| b.score.cmp(&a.score));
        found.into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::GameMode;
    use crate::game::rules::attempt_play;
    use crate::game::state::{Player, RoundCounter, Table};
    use crate::game::zones::Hand;

    /// Engine [3|3]; the Mexican train already ends on 5
    fn heuristic_state(hand: Vec<Tile>) -> GameState {
        let mut players = Player::seats(3);
        players[0].hand = Hand::from_tiles(vec![Tile::new(3, 5), Tile::new(0, 0)]);
        players[1].hand = Hand::from_tiles(hand);
        players[2].hand = Hand::from_tiles(vec![Tile::new(0, 1)]);
        let table = Table::new(Tile::new(3, 3), vec![Tile::new(1, 1)], 3);
        let mut state = GameState::new(players, table, RoundCounter::new(GameMode::Traditional));
        attempt_play(&mut state, 0, Tile::new(3, 5), TrainKey::Mexican).expect("setup play");
        state
    }

    #[test]
    fn test_score_play() {
        assert_eq!(DecisionEngine::score_play(&Tile::new(3, 3), TrainKey::Personal(1), 1), 1);
        assert_eq!(DecisionEngine::score_play(&Tile::new(4, 5), TrainKey::Mexican, 1), 11);
        assert_eq!(DecisionEngine::score_play(&Tile::new(4, 5), TrainKey::Personal(2), 1), 9);
    }

    #[test]
    fn test_prefers_heavy_tile_on_mexican_over_double_on_own() {
        let state = heuristic_state(vec![Tile::new(3, 3), Tile::new(4, 5)]);
        let found = DecisionEngine::candidates(&state, 1, None);
        assert_eq!(
            found,
            vec![
                Candidate { tile: Tile::new(3, 3), key: TrainKey::Personal(1), score: 1 },
                Candidate { tile: Tile::new(4, 5), key: TrainKey::Mexican, score: 11 },
            ]
        );

        let choice = DecisionEngine::choose_play(&state, 1, None).expect("a play exists");
        assert_eq!(choice.tile, Tile::new(4, 5));
        assert_eq!(choice.key, TrainKey::Mexican);
    }

    #[test]
    fn test_closed_trains_are_skipped() {
        let mut state = heuristic_state(vec![Tile::new(3, 12)]);
        let found = DecisionEngine::candidates(&state, 1, None);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].key, TrainKey::Personal(1));

        state.open_train(2);
        let found = DecisionEngine::candidates(&state, 1, None);
        let keys: Vec<TrainKey> = found.iter().map(|c| c.key).collect();
        assert_eq!(keys, vec![TrainKey::Personal(1), TrainKey::Personal(2)]);
    }

    #[test]
    fn test_ties_keep_hand_order() {
        // [2|5] on the Mexican train and [1|3] on the own train both score 9
        let state = heuristic_state(vec![Tile::new(2, 5), Tile::new(1, 3)]);
        let choice = DecisionEngine::choose_play(&state, 1, None).unwrap();
        assert_eq!((choice.tile, choice.key), (Tile::new(2, 5), TrainKey::Mexican));

        let state = heuristic_state(vec![Tile::new(1, 3), Tile::new(2, 5)]);
        let choice = DecisionEngine::choose_play(&state, 1, None).unwrap();
        assert_eq!((choice.tile, choice.key), (Tile::new(1, 3), TrainKey::Personal(1)));
    }

    #[test]
    fn test_only_considers_drawn_tile() {
        let state = heuristic_state(vec![Tile::new(4, 5), Tile::new(3, 1)]);
        let choice = DecisionEngine::choose_play(&state, 1, Some(Tile::new(3, 1))).unwrap();
        assert_eq!(choice.tile, Tile::new(3, 1));
        assert_eq!(choice.key, TrainKey::Personal(1));
        assert!(DecisionEngine::choose_play(&state, 1, Some(Tile::new(0, 1))).is_none());
    }

    #[test]
    fn test_no_candidates() {
        let state = heuristic_state(vec![Tile::new(0, 1)]);
        assert!(DecisionEngine::candidates(&state, 1, None).is_empty());
        assert!(DecisionEngine::choose_play(&state, 1, None).is_none());
    }
}
