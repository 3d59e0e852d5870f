//! Round and game lifecycle: dealing, scoring, advancing.

use crate::game::config::GameConfig;
use crate::game::state::{GameState, Player, RoundCounter, Table};
use crate::game::zones::Hand;
use crate::rng::GameRng;
use crate::tile::{build_set, shuffle_set, take_double, Pip, MAX_PIPS};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    /// The tile set lacks the round's engine double. Only a corrupted set can
    /// cause this.
    #[error("engine tile double-{0} missing from the tile set")]
    EngineTileMissing(Pip),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RoundOutcome {
    Won { player: usize },
    Blocked,
}

/// Scores for one finished round
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundSummary {
    pub label: String,
    pub engine_value: Pip,
    pub outcome: RoundOutcome,
    /// Pips each seat was charged this round
    pub deltas: Vec<u32>,
    /// Running totals after this round
    pub cumulative: Vec<u32>,
    pub is_final: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub seat: usize,
    pub name: String,
    pub score: u32,
}

/// Final scores, lowest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalStandings {
    pub standings: Vec<Standing>,
}

impl FinalStandings {
    pub fn winner(&self) -> Option<&Standing> {
        self.standings.first()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundStart {
    Started { engine_value: Pip },
    GameOver(FinalStandings),
}

/// Tiles dealt to each player
pub fn draw_count(player_count: usize) -> usize {
    match player_count {
        0..=4 => 15,
        5..=6 => 12,
        _ => 11,
    }
}

/// Shuffle a fresh set, pull the engine double, deal hands in seat order.
/// Whatever is left over becomes the boneyard.
fn deal(
    players: &mut [Player],
    counter: &RoundCounter,
    rng: &mut GameRng,
) -> Result<Table, SetupError> {
    let mut tiles = shuffle_set(build_set(MAX_PIPS), rng);
    let engine_value = counter.engine_value(rng);
    let engine = take_double(&mut tiles, engine_value)
        .ok_or(SetupError::EngineTileMissing(engine_value))?;

    let per_player = draw_count(players.len());
    for player in players.iter_mut() {
        let take = per_player.min(tiles.len());
        player.hand = Hand::from_tiles(tiles.drain(0..take).collect());
    }

    info!(round = %counter.label(), engine = %engine, boneyard = tiles.len(), "round dealt");
    Ok(Table::new(engine, tiles, players.len()))
}

/// Seat the players and deal the first round
pub fn start_game(config: &GameConfig, rng: &mut GameRng) -> Result<GameState, SetupError> {
    let mut players = Player::seats(config.player_count);
    let counter = RoundCounter::new(config.mode);
    let table = deal(&mut players, &counter, rng)?;
    Ok(GameState::new(players, table, counter))
}

/// Move the round counter on and deal again, or end the game if no
/// rounds remain
pub fn start_next_round(state: &mut GameState, rng: &mut GameRng) -> Result<RoundStart, SetupError> {
    state.counter.advance();
    if state.counter.is_exhausted() {
        return Ok(RoundStart::GameOver(end_game(state)));
    }
    state.table = deal(&mut state.players, &state.counter, rng)?;
    state.current_player = 0;
    state.is_round_over = false;
    Ok(RoundStart::Started {
        engine_value: state.table.engine.a,
    })
}

/// Charge every player the pips left in their hand. Returns None if the
/// round was already scored.
pub fn end_round(state: &mut GameState) -> Option<RoundSummary> {
    if state.is_round_over {
        return None;
    }
    state.is_round_over = true;

    let mut winner = None;
    let mut deltas = Vec::with_capacity(state.players.len());
    for (seat, player) in state.players.iter_mut().enumerate() {
        if player.hand.is_empty() && winner.is_none() {
            winner = Some(seat);
        }
        let delta = player.hand.pip_total();
        player.score += delta;
        deltas.push(delta);
    }

    let outcome = match winner {
        Some(player) => RoundOutcome::Won { player },
        None => RoundOutcome::Blocked,
    };
    let summary = RoundSummary {
        label: state.counter.label(),
        engine_value: state.table.engine.a,
        outcome,
        deltas,
        cumulative: state.players.iter().map(|p| p.score).collect(),
        is_final: state.counter.is_final(),
    };
    info!(round = %summary.label, ?outcome, scores = ?summary.cumulative, "round over");
    Some(summary)
}

/// Standings sorted by score; ties keep seat order
pub fn end_game(state: &GameState) -> FinalStandings {
    let mut standings: Vec<Standing> = state
        .players
        .iter()
        .enumerate()
        .map(|(seat, p)| Standing {
            seat,
            name: p.name.clone(),
            score: p.score,
        })
        .collect();
    standings.sort_by_key(|s| s.score);
    if let Some(w) = standings.first() {
        info!(winner = %w.name, score = w.score, "game over");
    }
    FinalStandings { standings }
}
