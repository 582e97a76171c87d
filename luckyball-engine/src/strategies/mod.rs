pub mod balanced;
pub mod hot;
pub mod overdue;
pub mod spread;

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use luckyball_db::error::{LuckyError, Result};
use luckyball_db::models::{Drawing, Pool};

use crate::config::AnalyzerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    RecentHot,
    AllTimeHot,
    Overdue,
    Balanced,
    JackpotSpread,
    Cold,
}

impl Strategy {
    pub const ALL: [Strategy; 6] = [
        Strategy::RecentHot,
        Strategy::AllTimeHot,
        Strategy::Overdue,
        Strategy::Balanced,
        Strategy::JackpotSpread,
        Strategy::Cold,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::RecentHot => "recent_hot",
            Strategy::AllTimeHot => "all_time_hot",
            Strategy::Overdue => "overdue",
            Strategy::Balanced => "balanced",
            Strategy::JackpotSpread => "jackpot_spread",
            Strategy::Cold => "cold",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Strategy::RecentHot => "Most frequent in the recent window",
            Strategy::AllTimeHot => "Most frequent over the whole history",
            Strategy::Overdue => "Longest absent numbers",
            Strategy::Balanced => "Mix of hot, overdue and last-drawn numbers",
            Strategy::JackpotSpread => "One strong number per range, plus recent momentum",
            Strategy::Cold => "Least frequent over the whole history",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = LuckyError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        match normalized.as_str() {
            "hot" => Ok(Strategy::AllTimeHot),
            name => Strategy::ALL
                .into_iter()
                .find(|st| st.name() == name)
                .ok_or_else(|| LuckyError::UnknownStrategy(s.to_string())),
        }
    }
}

/// A candidate pick. Main numbers are kept sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub main: [u8; 5],
    pub lucky_ball: u8,
    pub strategy: Strategy,
    /// Drawing date the ticket was generated for, when backtesting.
    pub reference_date: Option<NaiveDate>,
}

impl Ticket {
    pub fn new(mut main: [u8; 5], lucky_ball: u8, strategy: Strategy) -> Self {
        main.sort_unstable();
        Self {
            main,
            lucky_ball,
            strategy,
            reference_date: None,
        }
    }

    pub fn for_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }
}

/// Collects unique main numbers from ranked sources, in order.
pub(crate) struct Picker {
    selected: Vec<u8>,
}

impl Picker {
    pub(crate) fn new() -> Self {
        Self {
            selected: Vec::with_capacity(Pool::Main.pick_count()),
        }
    }

    pub(crate) fn is_full(&self) -> bool {
        self.selected.len() >= Pool::Main.pick_count()
    }

    pub(crate) fn contains(&self, number: u8) -> bool {
        self.selected.contains(&number)
    }

    /// Take up to `n` numbers from `source` that are not already selected.
    pub(crate) fn take(&mut self, source: impl IntoIterator<Item = u8>, n: usize) -> &mut Self {
        let mut taken = 0;
        for number in source {
            if taken == n || self.is_full() {
                break;
            }
            if !self.contains(number) {
                self.selected.push(number);
                taken += 1;
            }
        }
        self
    }

    /// Fill the remaining slots from `padding`, then from 1..=48 as a last resort.
    pub(crate) fn finish(mut self, padding: impl IntoIterator<Item = u8>) -> [u8; 5] {
        self.take(padding, 5);
        self.take(1..=Pool::Main.size() as u8, 5);
        let mut main = [0u8; 5];
        for (slot, &n) in main.iter_mut().zip(&self.selected) {
            *slot = n;
        }
        main
    }
}

pub(crate) fn numbers(ranked: &[(u8, u32)]) -> impl Iterator<Item = u8> + '_ {
    ranked.iter().map(|(n, _)| *n)
}

/// Build the ticket `strategy` recommends from `window` alone.
pub fn generate(strategy: Strategy, window: &[Drawing], config: &AnalyzerConfig) -> Result<Ticket> {
    if window.is_empty() {
        return Err(LuckyError::InsufficientData {
            required: 1,
            available: 0,
        });
    }

    let (main, lucky_ball) = match strategy {
        Strategy::RecentHot => hot::recent_hot(window, config),
        Strategy::AllTimeHot => hot::all_time_hot(window),
        Strategy::Cold => hot::cold(window),
        Strategy::Overdue => overdue::overdue(window),
        Strategy::Balanced => balanced::balanced(window, config),
        Strategy::JackpotSpread => spread::jackpot_spread(window, config),
    };

    Ok(Ticket::new(main, lucky_ball, strategy))
}

pub fn generate_all(
    strategies: &[Strategy],
    window: &[Drawing],
    config: &AnalyzerConfig,
) -> Result<Vec<Ticket>> {
    strategies
        .iter()
        .map(|&s| generate(s, window, config))
        .collect()
}

/// Order in which strategies are tried when building a coverage portfolio.
pub const COVERAGE_ROTATION: [Strategy; 6] = [
    Strategy::JackpotSpread,
    Strategy::RecentHot,
    Strategy::AllTimeHot,
    Strategy::Balanced,
    Strategy::Overdue,
    Strategy::Cold,
];

/// Up to `count` tickets with pairwise distinct main sets, limited to what
/// `budget_cents` buys at the configured stake.
pub fn coverage_portfolio(
    window: &[Drawing],
    count: usize,
    budget_cents: i64,
    config: &AnalyzerConfig,
) -> Result<Vec<Ticket>> {
    let affordable = if config.stake_cents > 0 {
        (budget_cents.max(0) / config.stake_cents) as usize
    } else {
        count
    };
    let limit = count.min(affordable);

    let mut tickets: Vec<Ticket> = Vec::with_capacity(limit);
    for strategy in COVERAGE_ROTATION {
        if tickets.len() >= limit {
            break;
        }
        let ticket = generate(strategy, window, config)?;
        if tickets.iter().any(|t| t.main == ticket.main) {
            log::debug!("coverage: {} duplicates an earlier ticket, skipped", strategy);
            continue;
        }
        tickets.push(ticket);
    }
    Ok(tickets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{make_test_draws, three_draws};

    #[test]
    fn test_strategy_names_roundtrip() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.name().parse::<Strategy>().unwrap(), strategy);
        }
        assert_eq!("hot".parse::<Strategy>().unwrap(), Strategy::AllTimeHot);
        assert_eq!("Recent-Hot".parse::<Strategy>().unwrap(), Strategy::RecentHot);
    }

    #[test]
    fn test_unknown_strategy() {
        match "lucky_guess".parse::<Strategy>() {
            Err(LuckyError::UnknownStrategy(name)) => assert_eq!(name, "lucky_guess"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_empty_window_is_insufficient() {
        let config = AnalyzerConfig::default();
        for strategy in Strategy::ALL {
            assert!(matches!(
                generate(strategy, &[], &config),
                Err(LuckyError::InsufficientData { required: 1, available: 0 })
            ));
        }
    }

    #[test]
    fn test_every_strategy_yields_valid_ticket() {
        let config = AnalyzerConfig::default();
        for window in [three_draws(), make_test_draws(120)] {
            for strategy in Strategy::ALL {
                let ticket = generate(strategy, &window, &config).unwrap();
                assert!(
                    luckyball_db::models::validate_draw(&ticket.main, ticket.lucky_ball).is_ok(),
                    "{strategy}: {:?}",
                    ticket
                );
                assert!(ticket.main.windows(2).all(|w| w[0] < w[1]));
                assert_eq!(ticket.strategy, strategy);
                assert!(ticket.reference_date.is_none());
            }
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let config = AnalyzerConfig::default();
        let window = make_test_draws(80);
        for strategy in Strategy::ALL {
            let a = generate(strategy, &window, &config).unwrap();
            let b = generate(strategy, &window, &config).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_picker_dedup_and_padding() {
        let mut picker = Picker::new();
        picker.take([3, 3, 7], 2).take([7, 9], 1);
        let main = picker.finish([3, 1]);
        assert_eq!(main, [3, 7, 9, 1, 2]);
    }

    #[test]
    fn test_generate_all_keeps_order() {
        let config = AnalyzerConfig::default();
        let window = three_draws();
        let tickets =
            generate_all(&[Strategy::Overdue, Strategy::RecentHot], &window, &config).unwrap();
        assert_eq!(tickets[0].strategy, Strategy::Overdue);
        assert_eq!(tickets[1].strategy, Strategy::RecentHot);
    }

    #[test]
    fn test_coverage_portfolio_budget_and_uniqueness() {
        let config = AnalyzerConfig::default();
        let window = make_test_draws(100);

        let tickets = coverage_portfolio(&window, 5, 1_000, &config).unwrap();
        assert!(tickets.len() <= 5);
        assert!(!tickets.is_empty());
        for (i, a) in tickets.iter().enumerate() {
            for b in &tickets[i + 1..] {
                assert_ne!(a.main, b.main);
            }
        }

        let limited = coverage_portfolio(&window, 5, 450, &config).unwrap();
        assert!(limited.len() <= 2);
        assert_eq!(limited[0].strategy, Strategy::JackpotSpread);

        assert!(coverage_portfolio(&window, 5, 0, &config).unwrap().is_empty());
    }
}
