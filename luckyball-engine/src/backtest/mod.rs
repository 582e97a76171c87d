//! Walk-forward backtesting of the strategies.
//!
//! Each evaluated drawing `i` only ever sees `history[..i]`: the ticket is
//! generated from that as-of window, then scored against drawing `i`.

pub mod metrics;
pub mod payout;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use luckyball_db::error::{LuckyError, Result};
use luckyball_db::models::{Drawing, MatchOutcome};

use crate::config::AnalyzerConfig;
use crate::strategies::{self, Strategy};
use metrics::BacktestMetrics;

/// One simulated ticket and how it fared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Play {
    pub drawing: Drawing,
    pub main: [u8; 5],
    pub lucky_ball: u8,
    pub outcome: MatchOutcome,
    pub stake_cents: i64,
    pub payout_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    pub strategy: Strategy,
    pub lookback: usize,
    pub tickets_played: usize,
    pub stake_per_ticket: i64,
    pub total_stake: i64,
    pub total_payout: i64,
    pub net: i64,
    pub roi: f64,
    /// Tickets that paid anything.
    pub wins: usize,
    /// Main-match count (0..=5) -> occurrences.
    pub match_distribution: BTreeMap<u8, usize>,
    pub lucky_matches: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub plays: Vec<Play>,
    pub metrics: BacktestMetrics,
}

impl BacktestResult {
    pub fn new(strategy: Strategy, lookback: usize, stake_per_ticket: i64) -> Self {
        Self {
            strategy,
            lookback,
            tickets_played: 0,
            stake_per_ticket,
            total_stake: 0,
            total_payout: 0,
            net: 0,
            roi: 0.0,
            wins: 0,
            match_distribution: (0..=5).map(|m| (m, 0)).collect(),
            lucky_matches: 0,
            first_date: None,
            last_date: None,
            plays: Vec::new(),
            metrics: BacktestMetrics::default(),
        }
    }

    pub fn record(&mut self, play: Play) {
        self.tickets_played += 1;
        self.total_stake += play.stake_cents;
        self.total_payout += play.payout_cents;
        if play.payout_cents > 0 {
            self.wins += 1;
        }
        if play.outcome.lucky_match {
            self.lucky_matches += 1;
        }
        *self
            .match_distribution
            .entry(play.outcome.main_matches)
            .or_insert(0) += 1;
        self.first_date.get_or_insert(play.drawing.date);
        self.last_date = Some(play.drawing.date);
        self.plays.push(play);
    }

    pub fn finalize(&mut self) {
        self.net = self.total_payout - self.total_stake;
        self.roi = roi(self.net, self.total_stake);
        self.metrics = metrics::calculate_metrics(&self.plays);
    }
}

/// `net / stake`, 0.0 when nothing was staked.
pub fn roi(net: i64, stake: i64) -> f64 {
    if stake > 0 {
        net as f64 / stake as f64
    } else {
        0.0
    }
}

/// Replay `strategy` over the last `lookback` drawings of `history`.
pub fn backtest(
    history: &[Drawing],
    strategy: Strategy,
    lookback: usize,
    config: &AnalyzerConfig,
) -> Result<BacktestResult> {
    let total = history.len();
    let required = lookback.saturating_add(config.min_history.max(1));
    if total < required {
        return Err(LuckyError::InsufficientData {
            required,
            available: total,
        });
    }

    let stake = config.stake_cents;
    let mut result = BacktestResult::new(strategy, lookback, stake);

    for i in (total - lookback)..total {
        let as_of = &history[..i];
        let target = &history[i];

        let ticket = strategies::generate(strategy, as_of, config)?.for_date(target.date);
        let outcome = target.matches(&ticket.main, ticket.lucky_ball);
        let payout_cents = config.payouts.prize(outcome);

        result.record(Play {
            drawing: target.clone(),
            main: ticket.main,
            lucky_ball: ticket.lucky_ball,
            outcome,
            stake_cents: stake,
            payout_cents,
        });
    }

    result.finalize();
    debug!(
        "backtest {}: {} ticket(s), net {} cents, roi {:.4}",
        strategy, result.tickets_played, result.net, result.roi
    );
    Ok(result)
}

/// Backtest several strategies in parallel. Results keep the input order.
pub fn backtest_all(
    history: &[Drawing],
    strategies: &[Strategy],
    lookback: usize,
    config: &AnalyzerConfig,
) -> Result<Vec<BacktestResult>> {
    backtest_all_with_progress(history, strategies, lookback, config, |_| {})
}

/// Like [`backtest_all`], calling `on_done` as each strategy finishes.
pub fn backtest_all_with_progress<F>(
    history: &[Drawing],
    strategies: &[Strategy],
    lookback: usize,
    config: &AnalyzerConfig,
    on_done: F,
) -> Result<Vec<BacktestResult>>
where
    F: Fn(&BacktestResult) + Sync,
{
    let results = strategies
        .par_iter()
        .map(|&s| -> Result<BacktestResult> {
            let result = backtest(history, s, lookback, config)?;
            on_done(&result);
            Ok(result)
        })
        .collect::<Result<Vec<_>>>()?;
    info!(
        "backtested {} strategies over {} drawing(s)",
        results.len(),
        lookback
    );
    Ok(results)
}

/// Highest net result, the earlier entry on ties.
pub fn best_strategy(results: &[BacktestResult]) -> Option<&BacktestResult> {
    results
        .iter()
        .reduce(|best, r| if r.net > best.net { r } else { best })
}
