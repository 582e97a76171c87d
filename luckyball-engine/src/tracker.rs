//! Scoring and summarising the tickets stored in the tracker database.

use serde::{Deserialize, Serialize};

use luckyball_db::db::{TicketRecord, TicketResult};
use luckyball_db::history::DrawHistory;

use crate::backtest::payout::PayoutTable;
use crate::backtest::roi;

/// Score `ticket` against the first drawing on or after its play date.
/// `None` while that drawing is not in `history` yet.
pub fn check_ticket(
    history: &DrawHistory,
    ticket: &TicketRecord,
    payouts: &PayoutTable,
) -> Option<TicketResult> {
    let drawing = history.first_on_or_after(ticket.date_played)?;
    let outcome = drawing.matches(&ticket.main, ticket.lucky_ball);
    Some(TicketResult {
        drawing_date: drawing.date,
        main_matches: outcome.main_matches,
        lucky_match: outcome.lucky_match,
        prize_cents: payouts.prize(outcome),
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketSummary {
    pub tickets: usize,
    pub checked: usize,
    pub winners: usize,
    pub spent_cents: i64,
    pub won_cents: i64,
    pub net_cents: i64,
    pub roi: f64,
}

/// Totals over every stored ticket. Unchecked tickets count as spent.
pub fn summarize(tickets: &[TicketRecord]) -> TicketSummary {
    let mut summary = TicketSummary {
        tickets: tickets.len(),
        ..Default::default()
    };
    for ticket in tickets {
        summary.spent_cents += ticket.cost_cents;
        if let Some(result) = &ticket.result {
            summary.checked += 1;
            summary.won_cents += result.prize_cents;
            if result.prize_cents > 0 {
                summary.winners += 1;
            }
        }
    }
    summary.net_cents = summary.won_cents - summary.spent_cents;
    summary.roi = roi(summary.net_cents, summary.spent_cents);
    summary
}
