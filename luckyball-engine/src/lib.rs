pub mod backtest;
pub mod config;
pub mod report;
pub mod stats;
pub mod strategies;
pub mod tracker;

#[cfg(test)]
mod test_support;

pub use backtest::{BacktestResult, backtest, backtest_all, backtest_all_with_progress, best_strategy};
pub use config::AnalyzerConfig;
pub use strategies::{Strategy, Ticket, generate};
