//! Move legality and play resolution.
//!
//! Every mutating function here either applies completely or returns an
//! error with the state untouched. When a change ends the round, the round
//! is scored before the function returns.

use crate::game::round::{end_round, RoundSummary};
use crate::game::state::GameState;
use crate::game::zones::TrainKey;
use crate::tile::{Pip, Tile};
use thiserror::Error;
use tracing::debug;

/// Reasons a play is refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IllegalMove {
    #[error("{tile} is not in player {player}'s hand")]
    NotInHand { player: usize, tile: Tile },
    #[error("there is no {0:?} train")]
    UnknownTrain(TrainKey),
    #[error("player {player} may not play on the {key:?} train")]
    TrainNotEligible { player: usize, key: TrainKey },
    #[error("{tile} does not match {end} on the {key:?} train")]
    NoMatch { tile: Tile, key: TrainKey, end: Pip },
    #[error("the drawn tile {0} must be played or the turn passed")]
    MustPlayDrawnTile(Tile),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DrawRejected {
    #[error("player {0} has a legal play and may not draw")]
    RedundantDraw(usize),
}

/// A successful play
#[derive(Debug, Clone)]
pub struct PlayOutcome {
    /// The tile as laid, first half facing the previous end
    pub placed: Tile,
    pub key: TrainKey,
    pub round_end: Option<RoundSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    /// The tile fits an eligible train; play it or pass
    Playable(Tile),
    /// The tile fits nowhere; the player's train is now open
    Unplayable(Tile),
    /// Boneyard was empty; the player's train is now open
    Passed,
}

#[derive(Debug, Clone)]
pub struct DrawReport {
    pub outcome: DrawOutcome,
    pub round_end: Option<RoundSummary>,
}

/// Value the next tile on `key` must match
pub fn train_end_value(state: &GameState, key: TrainKey) -> Option<Pip> {
    let engine = state.table.engine;
    state.table.trains.get(key).map(|t| t.end_value(&engine))
}

/// Place `tile` from `player`'s hand on the train named by `key`
pub fn attempt_play(
    state: &mut GameState,
    player: usize,
    tile: Tile,
    key: TrainKey,
) -> Result<PlayOutcome, IllegalMove> {
    let engine = state.table.engine;
    let hand_index = state
        .players
        .get(player)
        .and_then(|p| p.hand.find(&tile))
        .ok_or(IllegalMove::NotInHand { player, tile })?;

    let train = state
        .table
        .trains
        .get(key)
        .ok_or(IllegalMove::UnknownTrain(key))?;
    if !train.is_playable_by(player) {
        return Err(IllegalMove::TrainNotEligible { player, key });
    }
    let end = train.end_value(&engine);
    let placed = tile
        .oriented_to(end)
        .ok_or(IllegalMove::NoMatch { tile, key, end })?;

    // All checks passed; the hand is the first thing touched
    let removed = state.players[player]
        .hand
        .remove_tile(hand_index)
        .ok_or(IllegalMove::NotInHand { player, tile })?;
    debug_assert!(removed.same_tile(&placed));
    if let Some(train) = state.table.trains.get_mut(key) {
        train.push(placed);
        if key == TrainKey::Personal(player) {
            train.is_open = false;
        }
    }
    debug!(player, tile = %placed, ?key, "tile played");

    let round_end = if check_round_over(state) {
        end_round(state)
    } else {
        None
    };

    Ok(PlayOutcome {
        placed,
        key,
        round_end,
    })
}

/// Trains `tile` could legally be placed on by `player`, in table order
pub fn playable_targets(state: &GameState, player: usize, tile: &Tile) -> Vec<TrainKey> {
    let engine = state.table.engine;
    state
        .table
        .trains
        .iter()
        .filter(|(_, train)| train.is_playable_by(player) && tile.has(train.end_value(&engine)))
        .map(|(key, _)| key)
        .collect()
}

fn tile_fits_anywhere(state: &GameState, player: usize, tile: &Tile) -> bool {
    let engine = state.table.engine;
    state
        .table
        .trains
        .iter()
        .any(|(_, train)| train.is_playable_by(player) && tile.has(train.end_value(&engine)))
}

/// True if any tile in `player`'s hand fits any train open to them
pub fn can_play(state: &GameState, player: usize) -> bool {
    state.players.get(player).is_some_and(|p| {
        p.hand
            .tiles()
            .iter()
            .any(|tile| tile_fits_anywhere(state, player, tile))
    })
}

/// Someone has emptied their hand, or nothing can be drawn and nobody can play
pub fn check_round_over(state: &GameState) -> bool {
    if state.players.iter().any(|p| p.hand.is_empty()) {
        return true;
    }
    state.table.boneyard.is_empty() && !(0..state.player_count()).any(|i| can_play(state, i))
}

/// Draw for a player with no legal play. An empty boneyard is a pass.
/// If the result leaves the player without a play, their train opens.
pub fn draw_tile(state: &mut GameState, player: usize) -> Result<DrawReport, DrawRejected> {
    if can_play(state, player) {
        return Err(DrawRejected::RedundantDraw(player));
    }

    let outcome = match state.table.boneyard.draw() {
        Some(tile) => {
            state.players[player].hand.add_tile(tile);
            if tile_fits_anywhere(state, player, &tile) {
                DrawOutcome::Playable(tile)
            } else {
                state.open_train(player);
                DrawOutcome::Unplayable(tile)
            }
        }
        None => {
            state.open_train(player);
            DrawOutcome::Passed
        }
    };
    debug!(player, ?outcome, boneyard = state.table.boneyard.size(), "draw");

    let round_end = if check_round_over(state) {
        end_round(state)
    } else {
        None
    };
    Ok(DrawReport { outcome, round_end })
}

/// Decline to play: the player's train opens
pub fn pass_turn(state: &mut GameState, player: usize) -> Option<RoundSummary> {
    state.open_train(player);
    debug!(player, "passed");
    if check_round_over(state) {
        end_round(state)
    } else {
        None
    }
}
