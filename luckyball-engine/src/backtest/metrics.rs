//! Summary metrics over the plays of one backtest.

use serde::{Deserialize, Serialize};

use super::Play;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BacktestMetrics {
    /// Share of tickets that paid anything.
    pub hit_rate: f64,
    pub lucky_hit_rate: f64,
    pub avg_main_matches: f64,
    /// Largest peak-to-trough fall of the cumulative net, in cents.
    pub max_drawdown_cents: i64,
    pub best_payout_cents: i64,
    pub longest_losing_streak: usize,
}

pub fn calculate_metrics(plays: &[Play]) -> BacktestMetrics {
    if plays.is_empty() {
        return BacktestMetrics::default();
    }

    let total = plays.len() as f64;
    let winning = plays.iter().filter(|p| p.payout_cents > 0).count();
    let lucky = plays.iter().filter(|p| p.outcome.lucky_match).count();
    let main_sum: u32 = plays.iter().map(|p| p.outcome.main_matches as u32).sum();

    let mut peak = 0i64;
    let mut max_drawdown_cents = 0i64;
    for value in cumulative_net(plays) {
        peak = peak.max(value);
        max_drawdown_cents = max_drawdown_cents.max(peak - value);
    }

    let mut streak = 0usize;
    let mut longest_losing_streak = 0usize;
    for play in plays {
        if play.payout_cents > 0 {
            streak = 0;
        } else {
            streak += 1;
            longest_losing_streak = longest_losing_streak.max(streak);
        }
    }

    BacktestMetrics {
        hit_rate: winning as f64 / total,
        lucky_hit_rate: lucky as f64 / total,
        avg_main_matches: main_sum as f64 / total,
        max_drawdown_cents,
        best_payout_cents: plays.iter().map(|p| p.payout_cents).max().unwrap_or(0),
        longest_losing_streak,
    }
}

/// Running net after each play.
pub fn cumulative_net(plays: &[Play]) -> Vec<i64> {
    plays
        .iter()
        .scan(0i64, |sum, p| {
            *sum += p.payout_cents - p.stake_cents;
            Some(*sum)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::draw;
    use luckyball_db::models::MatchOutcome;

    fn play(main_matches: u8, lucky_match: bool, payout_cents: i64) -> Play {
        Play {
            drawing: draw(0, [1, 2, 3, 4, 5], 1),
            main: [1, 2, 3, 4, 5],
            lucky_ball: 1,
            outcome: MatchOutcome {
                main_matches,
                lucky_match,
            },
            stake_cents: 200,
            payout_cents,
        }
    }

    #[test]
    fn test_empty_plays() {
        assert_eq!(calculate_metrics(&[]), BacktestMetrics::default());
        assert!(cumulative_net(&[]).is_empty());
    }

    #[test]
    fn test_metrics_values() {
        let plays = vec![
            play(0, false, 0),
            play(2, true, 2_500),
            play(1, false, 0),
            play(0, false, 0),
            play(0, false, 0),
        ];
        assert_eq!(cumulative_net(&plays), vec![-200, 2_100, 1_900, 1_700, 1_500]);

        let m = calculate_metrics(&plays);
        assert!((m.hit_rate - 0.2).abs() < 1e-12);
        assert!((m.lucky_hit_rate - 0.2).abs() < 1e-12);
        assert!((m.avg_main_matches - 0.6).abs() < 1e-12);
        assert_eq!(m.best_payout_cents, 2_500);
        assert_eq!(m.longest_losing_streak, 3);
        // peak 2100 -> 1500
        assert_eq!(m.max_drawdown_cents, 600);
    }

    #[test]
    fn test_drawdown_from_start() {
        let plays = vec![play(0, false, 0), play(0, false, 0)];
        assert_eq!(calculate_metrics(&plays).max_drawdown_cents, 400);
    }
}
