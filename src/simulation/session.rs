//! One game from deal to final standings.
//!
//! The session owns the game state and is the only thing that mutates it.
//! Whatever drives the game (a terminal, a GUI, the autopilot) calls these
//! operations one at a time, re-reads `snapshot()` afterwards and drains
//! round/game events with `drain_events()`.

use crate::game::config::{ConfigError, GameConfig};
use crate::game::round::{self, FinalStandings, RoundStart, RoundSummary, SetupError};
use crate::game::rules::{self, DrawOutcome, DrawRejected, IllegalMove, PlayOutcome};
use crate::game::state::{GameState, Snapshot};
use crate::game::zones::TrainKey;
use crate::rng::GameRng;
use crate::simulation::decisions::DecisionEngine;
use crate::tile::Tile;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum GameError {
    #[error("illegal move: {0}")]
    IllegalMove(#[from] IllegalMove),
    #[error("draw rejected: {0}")]
    DrawRejected(#[from] DrawRejected),
    #[error("round setup failed: {0}")]
    Setup(#[from] SetupError),
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
    #[error("the round is over")]
    RoundOver,
    #[error("the round is still being played")]
    RoundInProgress,
    #[error("the game is over")]
    GameOver,
    #[error("nothing to pass: draw first")]
    NothingToPass,
}

/// Round and game endings, in the order they happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    RoundEnded(RoundSummary),
    GameEnded(FinalStandings),
}

/// What the current player may do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    /// Play any legal tile, or draw if there is none
    Open,
    /// Just drew this tile and it fits: play it or pass
    DrawnPlayable(Tile),
}

/// One step taken by the autopilot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnAction {
    Played { player: usize, tile: Tile, key: TrainKey },
    Drew { player: usize, outcome: DrawOutcome },
    Passed { player: usize },
}

pub struct Session {
    state: GameState,
    rng: GameRng,
    phase: TurnPhase,
    events: Vec<GameEvent>,
    standings: Option<FinalStandings>,
}

impl Session {
    /// Validate the config, seat the players and deal the first round
    pub fn start_game(config: &GameConfig, seed: Option<u64>) -> Result<Self, GameError> {
        config.validate()?;
        let mut rng = GameRng::new(seed);
        info!(seed = rng.seed(), ?config, "starting game");
        let state = round::start_game(config, &mut rng)?;
        Ok(Session {
            state,
            rng,
            phase: TurnPhase::Open,
            events: Vec::new(),
            standings: None,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn current_player(&self) -> usize {
        self.state.current_player
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn standings(&self) -> Option<&FinalStandings> {
        self.standings.as_ref()
    }

    pub fn is_game_over(&self) -> bool {
        self.standings.is_some()
    }

    /// Whether the current player has any legal play
    pub fn can_play(&self) -> bool {
        rules::can_play(&self.state, self.state.current_player)
    }

    /// Trains the current player could put `tile` on
    pub fn playable_targets(&self, tile: &Tile) -> Vec<TrainKey> {
        rules::playable_targets(&self.state, self.state.current_player, tile)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn ensure_in_round(&self) -> Result<(), GameError> {
        if self.standings.is_some() {
            Err(GameError::GameOver)
        } else if self.state.is_round_over {
            Err(GameError::RoundOver)
        } else {
            Ok(())
        }
    }

    fn record_round_end(&mut self, summary: RoundSummary) {
        let is_final = summary.is_final;
        self.events.push(GameEvent::RoundEnded(summary));
        if is_final {
            self.finish_game(round::end_game(&self.state));
        }
    }

    fn finish_game(&mut self, standings: FinalStandings) {
        self.events.push(GameEvent::GameEnded(standings.clone()));
        self.standings = Some(standings);
    }

    /// Current player lays `tile` on `key`. A double keeps the turn with
    /// the same player; anything else passes it on.
    pub fn attempt_play(&mut self, tile: Tile, key: TrainKey) -> Result<PlayOutcome, GameError> {
        self.ensure_in_round()?;
        let player = self.state.current_player;
        if let TurnPhase::DrawnPlayable(drawn) = self.phase {
            if !drawn.same_tile(&tile) {
                warn!(player, %tile, %drawn, "must play the drawn tile");
                return Err(IllegalMove::MustPlayDrawnTile(drawn).into());
            }
        }

        let outcome = rules::attempt_play(&mut self.state, player, tile, key).map_err(|e| {
            warn!(player, error = %e, "play rejected");
            e
        })?;
        self.phase = TurnPhase::Open;

        if let Some(summary) = outcome.round_end.clone() {
            self.record_round_end(summary);
        } else if outcome.placed.is_double() {
            debug!(player, "double played, same player goes again");
        } else {
            self.state.advance_turn();
        }
        Ok(outcome)
    }

    /// Current player draws because they cannot play
    pub fn draw_tile(&mut self) -> Result<DrawOutcome, GameError> {
        self.ensure_in_round()?;
        let player = self.state.current_player;
        let report = rules::draw_tile(&mut self.state, player).map_err(|e| {
            warn!(player, error = %e, "draw rejected");
            e
        })?;

        match report.outcome {
            DrawOutcome::Playable(tile) => self.phase = TurnPhase::DrawnPlayable(tile),
            DrawOutcome::Unplayable(_) | DrawOutcome::Passed => {
                self.phase = TurnPhase::Open;
                self.state.advance_turn();
            }
        }
        if let Some(summary) = report.round_end {
            self.record_round_end(summary);
        }
        Ok(report.outcome)
    }

    /// Decline to play a freshly drawn tile. The player's train opens.
    pub fn pass_turn(&mut self) -> Result<(), GameError> {
        self.ensure_in_round()?;
        if self.phase == TurnPhase::Open {
            return Err(GameError::NothingToPass);
        }
        let player = self.state.current_player;
        let round_end = rules::pass_turn(&mut self.state, player);
        self.phase = TurnPhase::Open;
        self.state.advance_turn();
        if let Some(summary) = round_end {
            self.record_round_end(summary);
        }
        Ok(())
    }

    /// Let the heuristic take the current player's whole turn, including
    /// follow-ups after doubles and the draw-then-play fallback.
    pub fn play_computer_turn(&mut self) -> Result<Vec<TurnAction>, GameError> {
        self.ensure_in_round()?;
        let player = self.state.current_player;
        let mut actions = Vec::new();

        while !self.state.is_round_over && self.state.current_player == player {
            let only = match self.phase {
                TurnPhase::DrawnPlayable(tile) => Some(tile),
                TurnPhase::Open => None,
            };
            if let Some(choice) = DecisionEngine::choose_play(&self.state, player, only) {
                let outcome = self.attempt_play(choice.tile, choice.key)?;
                actions.push(TurnAction::Played {
                    player,
                    tile: outcome.placed,
                    key: outcome.key,
                });
            } else if only.is_some() {
                self.pass_turn()?;
                actions.push(TurnAction::Passed { player });
            } else {
                let outcome = self.draw_tile()?;
                actions.push(TurnAction::Drew { player, outcome });
            }
        }
        Ok(actions)
    }

    /// Deal the next round once the current one is scored
    pub fn start_next_round(&mut self) -> Result<RoundStart, GameError> {
        if self.standings.is_some() {
            return Err(GameError::GameOver);
        }
        if !self.state.is_round_over {
            return Err(GameError::RoundInProgress);
        }
        let start = round::start_next_round(&mut self.state, &mut self.rng)?;
        self.phase = TurnPhase::Open;
        if let RoundStart::GameOver(standings) = &start {
            self.finish_game(standings.clone());
        }
        Ok(start)
    }
}
