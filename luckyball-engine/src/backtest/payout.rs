use serde::{Deserialize, Serialize};

use luckyball_db::models::MatchOutcome;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizeTier {
    pub main_matches: u8,
    pub lucky_match: bool,
    pub prize_cents: i64,
    pub label: String,
}

/// Fixed prize schedule keyed by `(main_matches, lucky_match)`.
/// Outcomes without a tier pay nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutTable {
    tiers: Vec<PrizeTier>,
}

impl PayoutTable {
    pub fn new(tiers: Vec<PrizeTier>) -> Self {
        Self { tiers }
    }

    /// Lucky for Life prize schedule. Both life-annuity prizes are
    /// approximated by a lump sum.
    pub fn lucky_for_life() -> Self {
        let tier = |main_matches, lucky_match, prize_cents, label: &str| PrizeTier {
            main_matches,
            lucky_match,
            prize_cents,
            label: label.to_string(),
        };
        Self::new(vec![
            tier(5, true, 100_000_000, "Jackpot ($1,000/day for life)"),
            tier(5, false, 2_500_000, "2nd prize ($25,000/year for life)"),
            tier(4, true, 500_000, "$5,000"),
            tier(4, false, 20_000, "$200"),
            tier(3, true, 15_000, "$150"),
            tier(3, false, 2_000, "$20"),
            tier(2, true, 2_500, "$25"),
            tier(2, false, 300, "$3"),
            tier(1, true, 600, "$6"),
            tier(0, true, 400, "$4"),
        ])
    }

    pub fn tiers(&self) -> &[PrizeTier] {
        &self.tiers
    }

    pub fn tier(&self, outcome: MatchOutcome) -> Option<&PrizeTier> {
        self.tiers
            .iter()
            .find(|t| t.main_matches == outcome.main_matches && t.lucky_match == outcome.lucky_match)
    }

    pub fn prize(&self, outcome: MatchOutcome) -> i64 {
        self.tier(outcome).map(|t| t.prize_cents).unwrap_or(0)
    }
}

impl Default for PayoutTable {
    fn default() -> Self {
        Self::lucky_for_life()
    }
}
