use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use textplots::Plot;

use luckyball_db::db::TicketRecord;
use luckyball_db::models::Drawing;
use luckyball_engine::backtest::metrics::cumulative_net;
use luckyball_engine::backtest::payout::PayoutTable;
use luckyball_engine::backtest::BacktestResult;
use luckyball_engine::report::{AnalysisReport, NumberCount};
use luckyball_engine::stats::{FrequencyTable, NumberStats, PairCount};
use luckyball_engine::strategies::Ticket;
use luckyball_engine::tracker::TicketSummary;

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

/// `-1234` -> `-$12.34`, with thousands separators.
pub fn format_money(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let dollars = (abs / 100).to_string();
    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}.{:02}", abs % 100)
}

fn money_cell(cents: i64) -> Cell {
    let color = if cents > 0 {
        Color::Green
    } else if cents < 0 {
        Color::Red
    } else {
        Color::White
    };
    Cell::new(format_money(cents)).fg(color)
}

pub fn format_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:2}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

pub fn display_history(draws: &[Drawing]) {
    if draws.is_empty() {
        println!("No drawings to show.");
        return;
    }

    let mut table = new_table(vec!["Date", "Main numbers", "Lucky Ball"]);
    for draw in draws.iter().rev() {
        let mut sorted = draw.main;
        sorted.sort_unstable();
        table.add_row(vec![
            draw.date.format("%Y-%m-%d").to_string(),
            format_numbers(&sorted),
            format!("{:2}", draw.lucky_ball),
        ]);
    }
    println!("{table}");
}

pub fn display_stats(main: &[NumberStats], lucky: &[NumberStats], window: usize) {
    println!("\nStatistics over the last {} drawing(s)\n", window);

    println!("── Main numbers (1-48) ──");
    display_number_stats(main);

    println!("\n── Lucky Ball (1-18) ──");
    display_number_stats(lucky);
}

fn display_number_stats(stats: &[NumberStats]) {
    let mut table = new_table(vec!["Number", "Frequency", "Gap"]);

    let mut sorted = stats.to_vec();
    sorted.sort_by(|a, b| b.frequency.cmp(&a.frequency).then(a.number.cmp(&b.number)));

    for stat in &sorted {
        table.add_row(vec![
            format!("{:2}", stat.number),
            stat.frequency.to_string(),
            stat.gap.to_string(),
        ]);
    }
    println!("{table}");
}

pub fn display_positional(tables: &[FrequencyTable]) {
    println!("\n── Most frequent by position ──");
    let mut table = new_table(vec!["Position", "1st", "2nd", "3rd"]);
    for (i, freq) in tables.iter().enumerate() {
        let mut row = vec![format!("{}", i + 1)];
        row.extend(freq.top(3).iter().map(|(n, c)| format!("{:2} ({})", n, c)));
        table.add_row(row);
    }
    println!("{table}");
}

pub fn display_pairs(pairs: &[PairCount]) {
    println!("\n── Most common pairs ──");
    let mut table = new_table(vec!["Pair", "Count"]);
    for p in pairs {
        table.add_row(vec![
            format!("{:2} - {:2}", p.pair.0, p.pair.1),
            p.count.to_string(),
        ]);
    }
    println!("{table}");
}

pub fn display_frequency_chart(freq: &FrequencyTable) {
    let points: Vec<(f32, f32)> = freq.iter().map(|(n, c)| (n as f32, c as f32)).collect();
    if points.is_empty() {
        return;
    }
    let x_max = points.len() as f32;
    println!("\n== Frequency by number ==\n");
    let shape = textplots::Shape::Bars(&points);
    let mut chart = textplots::Chart::new(120, 40, 0.5, x_max + 0.5);
    println!("{}", chart.lineplot(&shape));
}

fn display_counts(title: &str, counts: &[NumberCount]) {
    println!("\n── {title} ──");
    let mut table = new_table(vec!["Number", "Count"]);
    for c in counts {
        table.add_row(vec![format!("{:2}", c.number), c.count.to_string()]);
    }
    println!("{table}");
}

pub fn display_report(report: &AnalysisReport) {
    println!(
        "\nLucky for Life analysis: {} drawing(s) from {} to {}",
        report.drawings, report.first_date, report.last_date
    );

    display_counts("Hot numbers", &report.hot);
    display_counts("Cold numbers", &report.cold);
    display_counts(
        &format!("Hot in the last {} drawing(s)", report.recent_window),
        &report.recent_hot,
    );

    println!("\n── Overdue numbers ──");
    if report.overdue.is_empty() {
        println!("No number is currently overdue.");
    } else {
        let mut table = new_table(vec!["Number", "Current gap", "Average gap", "Ratio"]);
        for o in &report.overdue {
            table.add_row(vec![
                format!("{:2}", o.number),
                o.current_gap.to_string(),
                format!("{:.1}", o.average_gap),
                format!("{:.2}", o.ratio),
            ]);
        }
        println!("{table}");
    }

    display_pairs(&report.pairs);
    display_counts("Hot Lucky Balls", &report.lucky_hot);
    display_counts("Cold Lucky Balls", &report.lucky_cold);
    display_tickets(&report.recommendations);
}

pub fn display_tickets(tickets: &[Ticket]) {
    println!("\n── Recommended tickets ──");
    let mut table = new_table(vec!["#", "Strategy", "Main numbers", "Lucky Ball"]);
    for (i, ticket) in tickets.iter().enumerate() {
        table.add_row(vec![
            format!("{}", i + 1),
            ticket.strategy.to_string(),
            format_numbers(&ticket.main),
            format!("{:2}", ticket.lucky_ball),
        ]);
    }
    println!("{table}");
}

pub fn display_backtest(results: &[BacktestResult], best: Option<&BacktestResult>) {
    println!("\n== Backtest results ==\n");
    let mut table = new_table(vec![
        "Strategy", "Tickets", "Staked", "Won", "Net", "ROI", "Wins", "Hit rate", "Max drawdown",
    ]);
    for r in results {
        table.add_row(vec![
            Cell::new(r.strategy),
            Cell::new(r.tickets_played),
            Cell::new(format_money(r.total_stake)),
            Cell::new(format_money(r.total_payout)),
            money_cell(r.net),
            Cell::new(format!("{:+.1}%", r.roi * 100.0)),
            Cell::new(r.wins),
            Cell::new(format!("{:.1}%", r.metrics.hit_rate * 100.0)),
            Cell::new(format_money(r.metrics.max_drawdown_cents)),
        ]);
    }
    println!("{table}");

    println!("\n── Main matches per ticket ──");
    let mut header = vec!["Strategy".to_string()];
    header.extend((0..=5).map(|m| m.to_string()));
    header.push("Lucky Ball".to_string());
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    for r in results {
        let mut row = vec![r.strategy.to_string()];
        row.extend(
            (0..=5u8).map(|m| r.match_distribution.get(&m).copied().unwrap_or(0).to_string()),
        );
        row.push(r.lucky_matches.to_string());
        table.add_row(row);
    }
    println!("{table}");

    if let Some(best) = best {
        println!(
            "\nBest strategy: {} (net {}, ROI {:+.1}%)",
            best.strategy,
            format_money(best.net),
            best.roi * 100.0
        );
    }
    println!("Past results do not predict future drawings.");
}

pub fn display_plays(result: &BacktestResult, payouts: &PayoutTable) {
    println!("\n── Plays: {} ──", result.strategy);
    let mut table = new_table(vec!["Date", "Ticket", "LB", "Drawn", "LB", "Match", "Prize"]);
    for play in &result.plays {
        let mut drawn = play.drawing.main;
        drawn.sort_unstable();
        let label = payouts
            .tier(play.outcome)
            .map(|t| format!("{} ({})", play.outcome, t.label))
            .unwrap_or_else(|| play.outcome.to_string());
        table.add_row(vec![
            Cell::new(play.drawing.date.format("%Y-%m-%d")),
            Cell::new(format_numbers(&play.main)),
            Cell::new(play.lucky_ball),
            Cell::new(format_numbers(&drawn)),
            Cell::new(play.drawing.lucky_ball),
            Cell::new(label),
            money_cell(play.payout_cents),
        ]);
    }
    println!("{table}");
}

pub fn display_net_chart(results: &[BacktestResult]) {
    let series: Vec<(&BacktestResult, Vec<(f32, f32)>)> = results
        .iter()
        .map(|r| {
            let points: Vec<(f32, f32)> = cumulative_net(&r.plays)
                .into_iter()
                .enumerate()
                .map(|(i, net)| ((i + 1) as f32, net as f32 / 100.0))
                .collect();
            (r, points)
        })
        .filter(|(_, points)| points.len() > 1)
        .collect();
    if series.is_empty() {
        return;
    }

    let x_max = series.iter().map(|(_, p)| p.len()).max().unwrap_or(1) as f32;
    let (y_min, y_max) = series
        .iter()
        .flat_map(|(_, p)| p.iter().map(|&(_, y)| y))
        .fold((0.0f32, 0.0f32), |(lo, hi), y| (lo.min(y), hi.max(y)));

    println!("\n== Cumulative net ($) ==\n");
    for (result, points) in &series {
        println!("  {} :", result.strategy);
        let shape = textplots::Shape::Lines(points);
        let mut chart =
            textplots::Chart::new_with_y_range(120, 40, 1.0, x_max, y_min - 1.0, y_max + 1.0);
        println!("{}", chart.lineplot(&shape));
    }
}

pub fn display_tracked(tickets: &[TicketRecord]) {
    if tickets.is_empty() {
        println!("No tickets recorded yet. Add one with: luckyball ticket add");
        return;
    }

    let mut table = new_table(vec![
        "ID", "Played", "Strategy", "Main numbers", "LB", "Cost", "Drawing", "Match", "Prize",
    ]);
    for t in tickets {
        let (drawing, matched, prize) = match &t.result {
            Some(r) => (
                Cell::new(r.drawing_date.format("%Y-%m-%d")),
                Cell::new(if r.lucky_match {
                    format!("{}+LB", r.main_matches)
                } else {
                    r.main_matches.to_string()
                }),
                money_cell(r.prize_cents),
            ),
            None => (Cell::new("pending"), Cell::new("—"), Cell::new("—")),
        };
        table.add_row(vec![
            Cell::new(t.id.map(|id| id.to_string()).unwrap_or_default()),
            Cell::new(t.date_played.format("%Y-%m-%d")),
            Cell::new(&t.strategy),
            Cell::new(format_numbers(&t.main)),
            Cell::new(t.lucky_ball),
            Cell::new(format_money(t.cost_cents)),
            drawing,
            matched,
            prize,
        ]);
    }
    println!("{table}");
}

pub fn display_ticket_summary(summary: &TicketSummary) {
    println!("\nTickets      : {} ({} checked)", summary.tickets, summary.checked);
    println!("Winners      : {}", summary.winners);
    println!("Spent        : {}", format_money(summary.spent_cents));
    println!("Won          : {}", format_money(summary.won_cents));
    println!("Net          : {}", format_money(summary.net_cents));
    println!("ROI          : {:+.1}%", summary.roi * 100.0);
}
