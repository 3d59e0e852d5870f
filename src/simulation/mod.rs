pub mod analyze;
pub mod decisions;
pub mod engine;
pub mod session;

pub use analyze::{aggregate_results, SimulationReport};
pub use decisions::{Candidate, DecisionEngine};
pub use engine::{run_game, GameResult};
pub use session::{GameError, GameEvent, Session, TurnAction, TurnPhase};
