use crate::game::config::{GameMode, TRADITIONAL_FIRST_ROUND};
use crate::game::zones::{Boneyard, Hand, TrainKey, TrainMap};
use crate::rng::GameRng;
use crate::tile::{Pip, Tile, MAX_PIPS};
use serde::Serialize;

/// A seat at the table. Score accumulates across rounds.
#[derive(Debug, Clone)]
pub struct Player {
    pub name: String,
    pub is_ai: bool,
    pub hand: Hand,
    pub score: u32,
}

impl Player {
    pub fn human(name: &str) -> Self {
        Player {
            name: name.to_string(),
            is_ai: false,
            hand: Hand::new(),
            score: 0,
        }
    }

    /// Computer opponent, numbered from 1
    pub fn computer(number: usize) -> Self {
        Player {
            name: format!("AI Player {}", number),
            is_ai: true,
            hand: Hand::new(),
            score: 0,
        }
    }

    /// Seat 0 is the human, the rest are computer opponents
    pub fn seats(player_count: usize) -> Vec<Player> {
        std::iter::once(Player::human("You"))
            .chain((1..player_count).map(Player::computer))
            .collect()
    }
}

/// Round progress for the two game modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RoundCounter {
    /// Counts down from 12; the index is also the engine value
    Traditional { round: i32 },
    /// Counts up from 1 to `total`
    Quick { played: u32, total: u32 },
}

impl RoundCounter {
    pub fn new(mode: GameMode) -> Self {
        match mode {
            GameMode::Traditional => RoundCounter::Traditional {
                round: TRADITIONAL_FIRST_ROUND,
            },
            GameMode::Quick { total_rounds } => RoundCounter::Quick {
                played: 1,
                total: total_rounds,
            },
        }
    }

    pub fn advance(&mut self) {
        match self {
            RoundCounter::Traditional { round } => *round -= 1,
            RoundCounter::Quick { played, .. } => *played += 1,
        }
    }

    /// No round left to start
    pub fn is_exhausted(&self) -> bool {
        match *self {
            RoundCounter::Traditional { round } => round < 0,
            RoundCounter::Quick { played, total } => played > total,
        }
    }

    /// The current round is the last one
    pub fn is_final(&self) -> bool {
        match *self {
            RoundCounter::Traditional { round } => round <= 0,
            RoundCounter::Quick { played, total } => played >= total,
        }
    }

    /// Engine double for the current round
    pub fn engine_value(&self, rng: &mut GameRng) -> Pip {
        match *self {
            RoundCounter::Traditional { round } => round.clamp(0, MAX_PIPS as i32) as Pip,
            RoundCounter::Quick { .. } => rng.random_pip(MAX_PIPS),
        }
    }

    pub fn label(&self) -> String {
        match *self {
            RoundCounter::Traditional { round } => {
                format!("Round {}", TRADITIONAL_FIRST_ROUND + 1 - round)
            }
            RoundCounter::Quick { played, total } => format!("Round {} of {}", played, total),
        }
    }
}

/// Everything laid out for one round
#[derive(Debug, Clone)]
pub struct Table {
    pub engine: Tile,
    pub trains: TrainMap,
    pub boneyard: Boneyard,
}

impl Table {
    pub fn new(engine: Tile, boneyard: Vec<Tile>, player_count: usize) -> Self {
        Table {
            engine,
            trains: TrainMap::new(player_count),
            boneyard: Boneyard::from_tiles(boneyard),
        }
    }
}

/// Complete game state, owned by one session
#[derive(Debug, Clone)]
pub struct GameState {
    pub players: Vec<Player>,
    pub table: Table,
    pub counter: RoundCounter,
    pub current_player: usize,
    pub is_round_over: bool,
}

impl GameState {
    pub fn new(players: Vec<Player>, table: Table, counter: RoundCounter) -> Self {
        GameState {
            players,
            table,
            counter,
            current_player: 0,
            is_round_over: false,
        }
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn advance_turn(&mut self) {
        if !self.is_round_over {
            self.current_player = (self.current_player + 1) % self.players.len();
        }
    }

    /// Open `player`'s own train to everyone
    pub fn open_train(&mut self, player: usize) {
        if let Some(train) = self.table.trains.get_mut(TrainKey::Personal(player)) {
            train.is_open = true;
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let engine = self.table.engine;
        Snapshot {
            players: self
                .players
                .iter()
                .map(|p| PlayerView {
                    name: p.name.clone(),
                    is_ai: p.is_ai,
                    hand: p.hand.tiles().to_vec(),
                    score: p.score,
                })
                .collect(),
            trains: self
                .table
                .trains
                .iter()
                .map(|(key, train)| TrainView {
                    key,
                    owner: train.owner(),
                    path: train.path().to_vec(),
                    is_open: train.is_open,
                    end_value: train.end_value(&engine),
                })
                .collect(),
            boneyard_count: self.table.boneyard.size(),
            engine_tile: engine,
            current_player: self.current_player,
            is_round_over: self.is_round_over,
            round_label: self.counter.label(),
        }
    }
}

/// Read-only view handed to whatever renders the game
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub players: Vec<PlayerView>,
    pub trains: Vec<TrainView>,
    pub boneyard_count: usize,
    pub engine_tile: Tile,
    pub current_player: usize,
    pub is_round_over: bool,
    pub round_label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub name: String,
    pub is_ai: bool,
    pub hand: Vec<Tile>,
    pub score: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrainView {
    pub key: TrainKey,
    /// Seat owning the train, None for the Mexican train
    pub owner: Option<usize>,
    pub path: Vec<Tile>,
    pub is_open: bool,
    pub end_value: Pip,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_state() -> GameState {
        let table = Table::new(Tile::new(5, 5), vec![Tile::new(0, 1)], 3);
        GameState::new(Player::seats(3), table, RoundCounter::new(GameMode::Traditional))
    }

    #[test]
    fn test_seats() {
        let players = Player::seats(3);
        assert_eq!(players[0].name, "You");
        assert!(!players[0].is_ai);
        assert_eq!(players[2].name, "AI Player 2");
        assert!(players[2].is_ai);
    }

    #[test]
    fn test_traditional_counter() {
        let mut counter = RoundCounter::new(GameMode::Traditional);
        let mut rng = GameRng::new(Some(1));
        assert_eq!(counter.engine_value(&mut rng), 12);
        assert_eq!(counter.label(), "Round 1");

        let mut rounds = 1;
        while !counter.is_final() {
            counter.advance();
            rounds += 1;
        }
        assert_eq!(rounds, 13);
        assert_eq!(counter.engine_value(&mut rng), 0);
        assert_eq!(counter.label(), "Round 13");
        assert!(!counter.is_exhausted());
        counter.advance();
        assert!(counter.is_exhausted());
    }

    #[test]
    fn test_quick_counter() {
        let mut counter = RoundCounter::new(GameMode::Quick { total_rounds: 3 });
        assert_eq!(counter.label(), "Round 1 of 3");
        assert!(!counter.is_final());
        counter.advance();
        counter.advance();
        assert!(counter.is_final());
        assert!(!counter.is_exhausted());
        counter.advance();
        assert!(counter.is_exhausted());
    }

    #[test]
    fn test_advance_turn_wraps() {
        let mut state = small_state();
        state.advance_turn();
        state.advance_turn();
        assert_eq!(state.current_player, 2);
        state.advance_turn();
        assert_eq!(state.current_player, 0);
    }

    #[test]
    fn test_advance_turn_stops_after_round_over() {
        let mut state = small_state();
        state.is_round_over = true;
        state.advance_turn();
        assert_eq!(state.current_player, 0);
    }

    #[test]
    fn test_snapshot() {
        let mut state = small_state();
        state.open_train(1);
        let snap = state.snapshot();
        assert_eq!(snap.players.len(), 3);
        assert_eq!(snap.trains.len(), 4);
        assert!(snap.trains[1].is_open);
        assert!(!snap.trains[0].is_open);
        assert_eq!(snap.trains[3].key, TrainKey::Mexican);
        assert_eq!(snap.trains[1].owner, Some(1));
        assert_eq!(snap.trains[3].owner, None);
        assert_eq!(snap.trains[3].end_value, 5);
        assert_eq!(snap.boneyard_count, 1);
        assert_eq!(snap.engine_tile, Tile::new(5, 5));
    }
}
