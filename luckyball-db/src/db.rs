use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS tickets (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    date_played   TEXT NOT NULL,
    strategy      TEXT NOT NULL,
    number_1      INTEGER NOT NULL,
    number_2      INTEGER NOT NULL,
    number_3      INTEGER NOT NULL,
    number_4      INTEGER NOT NULL,
    number_5      INTEGER NOT NULL,
    lucky_ball    INTEGER NOT NULL,
    cost_cents    INTEGER NOT NULL DEFAULT 200,
    drawing_date  TEXT,
    main_matches  INTEGER,
    lucky_match   INTEGER,
    prize_cents   INTEGER
);
";

/// A ticket the user actually played.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketRecord {
    pub id: Option<i64>,
    pub date_played: NaiveDate,
    pub strategy: String,
    pub main: [u8; 5],
    pub lucky_ball: u8,
    pub cost_cents: i64,
    pub result: Option<TicketResult>,
}

/// Outcome of a played ticket once its drawing is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketResult {
    pub drawing_date: NaiveDate,
    pub main_matches: u8,
    pub lucky_match: bool,
    pub prize_cents: i64,
}

pub fn db_path() -> std::path::PathBuf {
    let mut path = std::env::current_dir().unwrap_or_default();
    path.push("data");
    path.push("luckyball.db");
    path
}

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let conn = Connection::open(path)?;
    Ok(conn)
}

pub fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

pub fn insert_ticket(conn: &Connection, ticket: &TicketRecord) -> Result<i64> {
    conn.execute(
        "INSERT INTO tickets (date_played, strategy, number_1, number_2, number_3, number_4, number_5, lucky_ball, cost_cents)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        rusqlite::params![
            ticket.date_played,
            ticket.strategy,
            ticket.main[0],
            ticket.main[1],
            ticket.main[2],
            ticket.main[3],
            ticket.main[4],
            ticket.lucky_ball,
            ticket.cost_cents,
        ],
    )?;
    let id = conn.last_insert_rowid();
    if let Some(result) = &ticket.result {
        record_result(conn, id, result)?;
    }
    Ok(id)
}

pub fn record_result(conn: &Connection, id: i64, result: &TicketResult) -> Result<bool> {
    let changed = conn.execute(
        "UPDATE tickets SET drawing_date = ?2, main_matches = ?3, lucky_match = ?4, prize_cents = ?5
         WHERE id = ?1",
        rusqlite::params![
            id,
            result.drawing_date,
            result.main_matches,
            result.lucky_match,
            result.prize_cents,
        ],
    )?;
    Ok(changed > 0)
}

fn ticket_from_row(row: &Row<'_>) -> rusqlite::Result<TicketRecord> {
    let drawing_date: Option<NaiveDate> = row.get(10)?;
    let result = match drawing_date {
        Some(drawing_date) => Some(TicketResult {
            drawing_date,
            main_matches: row.get::<_, Option<u8>>(11)?.unwrap_or(0),
            lucky_match: row.get::<_, Option<bool>>(12)?.unwrap_or(false),
            prize_cents: row.get::<_, Option<i64>>(13)?.unwrap_or(0),
        }),
        None => None,
    };

    Ok(TicketRecord {
        id: Some(row.get(0)?),
        date_played: row.get(1)?,
        strategy: row.get(2)?,
        main: [
            row.get::<_, u8>(3)?,
            row.get::<_, u8>(4)?,
            row.get::<_, u8>(5)?,
            row.get::<_, u8>(6)?,
            row.get::<_, u8>(7)?,
        ],
        lucky_ball: row.get(8)?,
        cost_cents: row.get(9)?,
        result,
    })
}

const SELECT_TICKETS: &str = "SELECT id, date_played, strategy, number_1, number_2, number_3, number_4, number_5,
        lucky_ball, cost_cents, drawing_date, main_matches, lucky_match, prize_cents
 FROM tickets";

/// All tickets, oldest play date first.
pub fn fetch_tickets(conn: &Connection) -> Result<Vec<TicketRecord>> {
    let mut stmt = conn.prepare(&format!("{SELECT_TICKETS} ORDER BY date_played ASC, id ASC"))?;
    let tickets = stmt
        .query_map([], ticket_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(tickets)
}

pub fn fetch_ticket(conn: &Connection, id: i64) -> Result<Option<TicketRecord>> {
    let ticket = conn
        .query_row(&format!("{SELECT_TICKETS} WHERE id = ?1"), [id], ticket_from_row)
        .optional()?;
    Ok(ticket)
}

pub fn count_tickets(conn: &Connection) -> Result<u32> {
    let count: u32 = conn.query_row("SELECT COUNT(*) FROM tickets", [], |row| row.get(0))?;
    Ok(count)
}
