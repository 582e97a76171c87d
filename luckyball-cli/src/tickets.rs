use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};

use luckyball_db::db::{self, TicketRecord};
use luckyball_db::history::{DrawHistory, parse_date};
use luckyball_db::models::validate_draw;
use luckyball_db::rusqlite::Connection;
use luckyball_engine::config::AnalyzerConfig;
use luckyball_engine::strategies::{self, Strategy};
use luckyball_engine::tracker::{check_ticket, summarize};

use crate::display;

pub struct NewTicket {
    pub strategy: Option<Strategy>,
    pub main: Vec<u8>,
    pub lucky_ball: Option<u8>,
    pub date: Option<String>,
}

fn resolve_date(raw: Option<&str>) -> Result<NaiveDate> {
    match raw {
        Some(raw) => parse_date(raw).with_context(|| format!("Invalid date: '{}'", raw)),
        None => Ok(Local::now().date_naive()),
    }
}

/// Record a ticket, either typed in by hand or generated by a strategy from
/// the current history.
pub fn cmd_add(
    conn: &Connection,
    history: Option<&DrawHistory>,
    config: &AnalyzerConfig,
    new: NewTicket,
    json: bool,
) -> Result<()> {
    let date_played = resolve_date(new.date.as_deref())?;

    let (main, lucky_ball, strategy) = if new.main.is_empty() {
        let Some(strategy) = new.strategy else {
            bail!("Give --main and --lucky, or a --strategy to generate the ticket");
        };
        let history = history.context("Generating a ticket needs --data")?;
        let ticket = strategies::generate(strategy, history.all(), config)?;
        (ticket.main, ticket.lucky_ball, strategy.to_string())
    } else {
        let main: [u8; 5] = new
            .main
            .as_slice()
            .try_into()
            .with_context(|| format!("Expected 5 main numbers, got {}", new.main.len()))?;
        let lucky_ball = new.lucky_ball.context("--lucky is required with --main")?;
        let strategy = new
            .strategy
            .map(|s| s.to_string())
            .unwrap_or_else(|| "manual".to_string());
        (main, lucky_ball, strategy)
    };

    if let Err(reason) = validate_draw(&main, lucky_ball) {
        bail!("Invalid ticket: {}", reason);
    }

    let mut sorted = main;
    sorted.sort_unstable();
    let mut record = TicketRecord {
        id: None,
        date_played,
        strategy,
        main: sorted,
        lucky_ball,
        cost_cents: config.stake_cents,
        result: None,
    };
    record.id = Some(db::insert_ticket(conn, &record)?);

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        println!("Ticket recorded:");
        display::display_tracked(std::slice::from_ref(&record));
    }
    Ok(())
}

pub fn cmd_list(conn: &Connection, json: bool) -> Result<()> {
    let tickets = db::fetch_tickets(conn)?;
    let summary = summarize(&tickets);
    if json {
        let out = serde_json::json!({ "tickets": tickets, "summary": summary });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }
    display::display_tracked(&tickets);
    if !tickets.is_empty() {
        display::display_ticket_summary(&summary);
    }
    Ok(())
}

/// Score every pending ticket whose drawing is now in the history.
pub fn cmd_check(
    conn: &Connection,
    history: &DrawHistory,
    config: &AnalyzerConfig,
    json: bool,
) -> Result<()> {
    let tickets = db::fetch_tickets(conn)?;
    let mut checked = 0usize;
    for ticket in tickets.iter().filter(|t| t.result.is_none()) {
        let Some(id) = ticket.id else { continue };
        match check_ticket(history, ticket, &config.payouts) {
            Some(result) => {
                db::record_result(conn, id, &result)?;
                checked += 1;
            }
            None => log::warn!(
                "ticket {} played {}: no drawing yet, left pending",
                id,
                ticket.date_played
            ),
        }
    }

    let tickets = db::fetch_tickets(conn)?;
    let summary = summarize(&tickets);
    if json {
        let out = serde_json::json!({ "newly_checked": checked, "tickets": tickets, "summary": summary });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }
    println!("{} ticket(s) checked against the history.", checked);
    display::display_tracked(&tickets);
    if !tickets.is_empty() {
        display::display_ticket_summary(&summary);
    }
    Ok(())
}
