use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use luckyball_db::error::{LuckyError, Result};
use luckyball_db::models::{Drawing, Pool};

use crate::config::AnalyzerConfig;
use crate::stats::{self, OverdueNumber, PairCount};
use crate::strategies::hot::recent_slice;
use crate::strategies::{self, Strategy, Ticket};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberCount {
    pub number: u8,
    pub count: u32,
}

fn counts(ranked: Vec<(u8, u32)>) -> Vec<NumberCount> {
    ranked
        .into_iter()
        .map(|(number, count)| NumberCount { number, count })
        .collect()
}

/// Snapshot of the statistics and current recommendations for one window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub drawings: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub recent_window: usize,
    pub hot: Vec<NumberCount>,
    pub cold: Vec<NumberCount>,
    pub recent_hot: Vec<NumberCount>,
    pub overdue: Vec<OverdueNumber>,
    pub pairs: Vec<PairCount>,
    pub lucky_hot: Vec<NumberCount>,
    pub lucky_cold: Vec<NumberCount>,
    pub recommendations: Vec<Ticket>,
}

impl AnalysisReport {
    pub fn build(window: &[Drawing], config: &AnalyzerConfig) -> Result<Self> {
        let (Some(first), Some(last)) = (window.first(), window.last()) else {
            return Err(LuckyError::InsufficientData {
                required: 1,
                available: 0,
            });
        };

        let main = stats::frequency(window, Pool::Main);
        let lucky = stats::frequency(window, Pool::LuckyBall);
        let recent_window = recent_slice(window, config);
        let recent = stats::frequency(recent_window, Pool::Main);

        let mut overdue = stats::overdue(window, config.overdue_threshold);
        overdue.truncate(10);

        Ok(Self {
            drawings: window.len(),
            first_date: first.date,
            last_date: last.date,
            recent_window: recent_window.len(),
            hot: counts(main.top(10)),
            cold: counts(main.bottom(10)),
            recent_hot: counts(recent.top(10)),
            overdue,
            pairs: stats::pairs(window, 10),
            lucky_hot: counts(lucky.top(5)),
            lucky_cold: counts(lucky.bottom(5)),
            recommendations: strategies::generate_all(&Strategy::ALL, window, config)?,
        })
    }
}
