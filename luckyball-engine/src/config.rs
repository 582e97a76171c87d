use std::path::Path;

use serde::{Deserialize, Serialize};

use luckyball_db::error::Result;

use crate::backtest::payout::PayoutTable;

/// Tunables shared by the strategies and the backtester. Missing fields in a
/// JSON file fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Size of the "recent" window used by recent_hot and balanced.
    pub recent_window: usize,
    /// A number is overdue when its gap exceeds this multiple of its average gap.
    pub overdue_threshold: f64,
    /// Number of equal-width ranges jackpot_spread covers (1-5).
    pub bucket_count: usize,
    pub stake_cents: i64,
    /// Smallest as-of window a backtest may start from.
    pub min_history: usize,
    pub payouts: PayoutTable,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            recent_window: 50,
            overdue_threshold: 1.5,
            bucket_count: 4,
            stake_cents: 200,
            min_history: 1,
            payouts: PayoutTable::lucky_for_life(),
        }
    }
}

pub fn save_config(config: &AnalyzerConfig, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn load_config(path: &Path) -> Result<AnalyzerConfig> {
    let json = std::fs::read_to_string(path)?;
    let config: AnalyzerConfig = serde_json::from_str(&json)?;
    Ok(config)
}
