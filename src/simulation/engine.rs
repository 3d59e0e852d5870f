use crate::game::config::GameConfig;
use crate::game::round::{FinalStandings, RoundSummary};
use crate::simulation::session::{GameError, GameEvent, Session, TurnAction};
use tracing::{debug, trace};

/// Result of a single game simulation
#[derive(Debug, Clone)]
pub struct GameResult {
    pub seed: u64,
    pub rounds: Vec<RoundSummary>,
    pub standings: FinalStandings,
}

impl GameResult {
    /// Seat with the lowest final score (seat order breaks ties)
    pub fn winner(&self) -> Option<usize> {
        self.standings.winner().map(|s| s.seat)
    }
}

/// Play a whole game with every seat, the human one included, driven by the
/// decision heuristic. The same seed always gives the same game.
pub fn run_game(config: &GameConfig, seed: u64) -> Result<GameResult, GameError> {
    let mut session = Session::start_game(config, Some(seed))?;
    let mut rounds = Vec::new();

    loop {
        while !session.state().is_round_over {
            for action in session.play_computer_turn()? {
                trace!(?action, "autopilot");
                if let TurnAction::Played { player, tile, key } = action {
                    debug!(player, %tile, ?key, "autopilot play");
                }
            }
        }

        for event in session.drain_events() {
            match event {
                GameEvent::RoundEnded(summary) => rounds.push(summary),
                GameEvent::GameEnded(standings) => {
                    return Ok(GameResult {
                        seed,
                        rounds,
                        standings,
                    })
                }
            }
        }
        session.start_next_round()?;
    }
}
