//! Aggregate statistics over many simulated games.

use crate::game::config::GameConfig;
use crate::game::round::RoundOutcome;
use crate::game::state::Player;
use crate::simulation::engine::GameResult;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Per-seat numbers
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeatStats {
    pub name: String,
    pub wins: usize,
    pub win_rate: f64,
    pub avg_score: f64,
    pub rounds_won: usize,
}

/// Summary of a batch of games, written out as JSON by the CLI
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub generated_at: DateTime<Utc>,
    pub config: GameConfig,
    pub games: usize,
    pub rounds: usize,
    pub blocked_rounds: usize,
    pub blocked_rate: f64,
    pub seats: Vec<SeatStats>,
}

/// Aggregate results from multiple games played with `config`
pub fn aggregate_results(config: &GameConfig, results: &[GameResult]) -> SimulationReport {
    let mut seats: Vec<SeatStats> = Player::seats(config.player_count)
        .into_iter()
        .map(|p| SeatStats {
            name: p.name,
            ..SeatStats::default()
        })
        .collect();

    let mut rounds = 0usize;
    let mut blocked_rounds = 0usize;
    let mut score_totals = vec![0u64; config.player_count];

    for result in results {
        if let Some(winner) = result.winner() {
            if let Some(stats) = seats.get_mut(winner) {
                stats.wins += 1;
            }
        }
        for standing in &result.standings.standings {
            if let Some(total) = score_totals.get_mut(standing.seat) {
                *total += standing.score as u64;
            }
        }
        for round in &result.rounds {
            rounds += 1;
            match round.outcome {
                RoundOutcome::Won { player } => {
                    if let Some(stats) = seats.get_mut(player) {
                        stats.rounds_won += 1;
                    }
                }
                RoundOutcome::Blocked => blocked_rounds += 1,
            }
        }
    }

    if !results.is_empty() {
        let n = results.len() as f64;
        for (stats, total) in seats.iter_mut().zip(&score_totals) {
            stats.win_rate = stats.wins as f64 / n;
            stats.avg_score = *total as f64 / n;
        }
    }

    SimulationReport {
        generated_at: Utc::now(),
        config: config.clone(),
        games: results.len(),
        rounds,
        blocked_rounds,
        blocked_rate: if rounds > 0 {
            blocked_rounds as f64 / rounds as f64
        } else {
            0.0
        },
        seats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::engine::run_game;

    #[test]
    fn test_aggregate_empty() {
        let config = GameConfig::quick(3, 1);
        let report = aggregate_results(&config, &[]);
        assert_eq!(report.games, 0);
        assert_eq!(report.seats.len(), 3);
        assert_eq!(report.blocked_rate, 0.0);
    }

    #[test]
    fn test_aggregate_counts() {
        let config = GameConfig::quick(3, 2);
        let results: Vec<GameResult> = (0..5)
            .map(|seed| run_game(&config, seed).expect("game should finish"))
            .collect();
        let report = aggregate_results(&config, &results);

        assert_eq!(report.games, 5);
        assert_eq!(report.rounds, 10);
        let wins: usize = report.seats.iter().map(|s| s.wins).sum();
        assert_eq!(wins, 5);
        let rounds_won: usize = report.seats.iter().map(|s| s.rounds_won).sum();
        assert_eq!(rounds_won + report.blocked_rounds, 10);
        let rate: f64 = report.seats.iter().map(|s| s.win_rate).sum();
        assert!((rate - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_report_serializes() {
        let config = GameConfig::traditional(2);
        let report = aggregate_results(&config, &[]);
        let json = serde_json::to_string(&report).expect("report should serialize");
        assert!(json.contains("\"generated_at\""));
        assert!(json.contains("\"traditional\""));
    }
}
