pub mod config;
pub mod round;
pub mod rules;
pub mod state;
pub mod zones;

pub use config::{ConfigError, GameConfig, GameMode};
pub use round::{FinalStandings, RoundOutcome, RoundStart, RoundSummary, SetupError, Standing};
pub use rules::{DrawOutcome, DrawRejected, IllegalMove, PlayOutcome};
pub use state::{GameState, Player, RoundCounter, Snapshot, Table};
pub use zones::{Boneyard, Hand, Train, TrainKey, TrainMap};
