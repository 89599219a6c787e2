use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    HumanWin,
    AiWin,
    Draw,
}

/// Cross-session totals. Starts empty; each finished game is added once
/// and never revised.
#[derive(Debug, Default)]
pub struct GameStatistics {
    total_games: AtomicU64,
    human_wins: AtomicU64,
    ai_wins: AtomicU64,
    draws: AtomicU64,
    total_moves: AtomicU64,
}

impl GameStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_game(&self, result: GameResult, moves: u32) {
        self.total_games.fetch_add(1, Ordering::Relaxed);
        self.total_moves.fetch_add(u64::from(moves), Ordering::Relaxed);
        let counter = match result {
            GameResult::HumanWin => &self.human_wins,
            GameResult::AiWin => &self.ai_wins,
            GameResult::Draw => &self.draws,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn summary(&self, active_games: usize) -> AggregateStats {
        let total_games = self.total_games.load(Ordering::Relaxed);
        let human_wins = self.human_wins.load(Ordering::Relaxed);
        let ai_wins = self.ai_wins.load(Ordering::Relaxed);
        let draws = self.draws.load(Ordering::Relaxed);
        let total_moves = self.total_moves.load(Ordering::Relaxed);

        let rate = |count: u64| percentage(count, total_games);
        let average_moves_per_game = if total_games == 0 {
            0.0
        } else {
            round_to_tenth(total_moves as f64 / total_games as f64)
        };

        AggregateStats {
            total_games,
            human_wins,
            ai_wins,
            draws,
            human_win_rate: rate(human_wins),
            ai_win_rate: rate(ai_wins),
            draw_rate: rate(draws),
            average_moves_per_game,
            active_games,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateStats {
    pub total_games: u64,
    pub human_wins: u64,
    pub ai_wins: u64,
    pub draws: u64,
    pub human_win_rate: f64,
    pub ai_win_rate: f64,
    pub draw_rate: f64,
    pub average_moves_per_game: f64,
    pub active_games: usize,
}

fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_to_tenth(count as f64 / total as f64 * 100.0)
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_statistics_report_zeroes() {
        let stats = GameStatistics::new();
        let summary = stats.summary(0);
        assert_eq!(summary.total_games, 0);
        assert_eq!(summary.human_win_rate, 0.0);
        assert_eq!(summary.average_moves_per_game, 0.0);
    }

    #[test]
    fn rates_and_averages_are_rounded() {
        let stats = GameStatistics::new();
        stats.record_game(GameResult::HumanWin, 5);
        stats.record_game(GameResult::AiWin, 6);
        stats.record_game(GameResult::Draw, 9);

        let summary = stats.summary(4);
        assert_eq!(summary.total_games, 3);
        assert_eq!(summary.human_wins, 1);
        assert_eq!(summary.ai_wins, 1);
        assert_eq!(summary.draws, 1);
        assert_eq!(summary.human_win_rate, 33.3);
        assert_eq!(summary.draw_rate, 33.3);
        assert_eq!(summary.average_moves_per_game, 6.7);
        assert_eq!(summary.active_games, 4);
    }

    #[test]
    fn concurrent_recording_loses_nothing() {
        let stats = std::sync::Arc::new(GameStatistics::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let stats = stats.clone();
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        stats.record_game(GameResult::Draw, 9);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let summary = stats.summary(0);
        assert_eq!(summary.total_games, 8000);
        assert_eq!(summary.draws, 8000);
        assert_eq!(summary.average_moves_per_game, 9.0);
    }
}
