mod display;
mod tickets;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use luckyball_db::db::{db_path, migrate, open_db};
use luckyball_db::history::DrawHistory;
use luckyball_db::models::Pool;
use luckyball_engine::backtest::{backtest_all_with_progress, best_strategy};
use luckyball_engine::config::{AnalyzerConfig, load_config, save_config};
use luckyball_engine::report::AnalysisReport;
use luckyball_engine::stats;
use luckyball_engine::strategies::{self, Strategy};

use crate::tickets::NewTicket;

#[derive(Parser)]
#[command(
    name = "luckyball",
    about = "Lucky for Life statistics, strategies and backtests"
)]
struct Cli {
    /// Drawing history CSV (Date, Number 1..5, Lucky Ball)
    #[arg(short, long, global = true, default_value = "data/lucky-for-life.csv")]
    data: PathBuf,

    /// JSON file with analyzer settings
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Frequency, gap, positional and pair statistics
    Stats {
        /// Number of most recent drawings to analyse (all when omitted)
        #[arg(short, long)]
        window: Option<usize>,

        /// Draw an ASCII frequency chart
        #[arg(long)]
        chart: bool,
    },

    /// Full analysis report with one recommendation per strategy
    Report {
        #[arg(short, long)]
        window: Option<usize>,
    },

    /// Recommend tickets for the next drawing
    Recommend {
        /// Strategies to use (all when omitted)
        #[arg(short, long, value_delimiter = ',')]
        strategy: Vec<Strategy>,

        /// Override the recent window size
        #[arg(long)]
        recent_window: Option<usize>,
    },

    /// Replay strategies over the most recent drawings
    Backtest {
        /// Number of drawings to evaluate
        #[arg(short, long, default_value = "100")]
        lookback: usize,

        #[arg(short, long, value_delimiter = ',')]
        strategy: Vec<Strategy>,

        /// Override the stake per ticket, in cents
        #[arg(long)]
        stake_cents: Option<i64>,

        /// Smallest history a ticket may be generated from
        #[arg(long)]
        min_history: Option<usize>,

        /// List every simulated ticket
        #[arg(long)]
        plays: bool,

        /// Chart the cumulative net of each strategy
        #[arg(long)]
        chart: bool,
    },

    /// Several distinct tickets within a budget
    Coverage {
        #[arg(short = 'n', long, default_value = "5")]
        count: usize,

        /// Budget in dollars
        #[arg(short, long, default_value = "10")]
        budget: f64,
    },

    /// List the latest drawings
    History {
        #[arg(short, long, default_value = "10")]
        last: usize,
    },

    /// Track tickets actually played
    Ticket {
        /// SQLite database (defaults to data/luckyball.db)
        #[arg(long)]
        db: Option<PathBuf>,

        #[command(subcommand)]
        action: TicketAction,
    },

    /// Write the current settings to a JSON file
    InitConfig {
        #[arg(default_value = "luckyball.json")]
        output: PathBuf,
    },
}

#[derive(Subcommand)]
enum TicketAction {
    /// Record a ticket, typed in or generated by a strategy
    Add {
        #[arg(short, long)]
        strategy: Option<Strategy>,

        /// Five main numbers, comma separated
        #[arg(short, long, value_delimiter = ',')]
        main: Vec<u8>,

        #[arg(short, long)]
        lucky: Option<u8>,

        /// Play date (YYYY-MM-DD or MM/DD/YYYY), today when omitted
        #[arg(long)]
        date: Option<String>,
    },

    /// Show recorded tickets and totals
    List,

    /// Score pending tickets against the history
    Check,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Unable to read config {:?}", path))?,
        None => AnalyzerConfig::default(),
    };

    match cli.command {
        Command::Stats { window, chart } => cmd_stats(&cli.data, window, chart, cli.json),
        Command::Report { window } => cmd_report(&cli.data, window, &config, cli.json),
        Command::Recommend {
            strategy,
            recent_window,
        } => {
            let mut config = config;
            if let Some(size) = recent_window {
                config.recent_window = size;
            }
            cmd_recommend(&cli.data, &strategy, &config, cli.json)
        }
        Command::Backtest {
            lookback,
            strategy,
            stake_cents,
            min_history,
            plays,
            chart,
        } => {
            let mut config = config;
            if let Some(stake) = stake_cents {
                config.stake_cents = stake;
            }
            if let Some(min) = min_history {
                config.min_history = min;
            }
            cmd_backtest(&cli.data, lookback, &strategy, &config, plays, chart, cli.json)
        }
        Command::Coverage { count, budget } => {
            cmd_coverage(&cli.data, count, budget, &config, cli.json)
        }
        Command::History { last } => cmd_history(&cli.data, last, cli.json),
        Command::Ticket { db, action } => {
            let path = db.unwrap_or_else(db_path);
            let conn = open_db(&path)?;
            migrate(&conn)?;
            match action {
                TicketAction::Add {
                    strategy,
                    main,
                    lucky,
                    date,
                } => {
                    let history = if main.is_empty() {
                        Some(load_history(&cli.data)?)
                    } else {
                        None
                    };
                    let new = NewTicket {
                        strategy,
                        main,
                        lucky_ball: lucky,
                        date,
                    };
                    tickets::cmd_add(&conn, history.as_ref(), &config, new, cli.json)
                }
                TicketAction::List => tickets::cmd_list(&conn, cli.json),
                TicketAction::Check => {
                    let history = load_history(&cli.data)?;
                    tickets::cmd_check(&conn, &history, &config, cli.json)
                }
            }
        }
        Command::InitConfig { output } => {
            save_config(&config, &output)
                .with_context(|| format!("Unable to write {:?}", output))?;
            println!("Settings written to {}", output.display());
            Ok(())
        }
    }
}

fn load_history(path: &Path) -> Result<DrawHistory> {
    let history = DrawHistory::load_csv(path)
        .with_context(|| format!("Unable to load drawings from {:?}", path))?;
    if history.is_empty() {
        bail!("{:?} contains no drawings", path);
    }
    Ok(history)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn selected(strategies: &[Strategy]) -> Vec<Strategy> {
    if strategies.is_empty() {
        Strategy::ALL.to_vec()
    } else {
        strategies.to_vec()
    }
}

fn cmd_stats(data: &Path, window: Option<usize>, chart: bool, json: bool) -> Result<()> {
    let history = load_history(data)?;
    let window = history.last(window.unwrap_or(history.len()));

    let main = stats::number_stats(window, Pool::Main);
    let lucky = stats::number_stats(window, Pool::LuckyBall);
    let positional = stats::positional(window);
    let pairs = stats::pairs(window, 10);

    if json {
        let out = serde_json::json!({
            "drawings": window.len(),
            "main": main,
            "lucky_ball": lucky,
            "positional": positional.iter().map(|t| t.ranked()).collect::<Vec<_>>(),
            "pairs": pairs,
        });
        return print_json(&out);
    }

    display::display_stats(&main, &lucky, window.len());
    display::display_positional(&positional);
    display::display_pairs(&pairs);
    if chart {
        display::display_frequency_chart(&stats::frequency(window, Pool::Main));
    }
    Ok(())
}

fn cmd_report(
    data: &Path,
    window: Option<usize>,
    config: &AnalyzerConfig,
    json: bool,
) -> Result<()> {
    let history = load_history(data)?;
    let window = history.last(window.unwrap_or(history.len()));
    let report = AnalysisReport::build(window, config)?;
    if json {
        return print_json(&report);
    }
    display::display_report(&report);
    Ok(())
}

fn cmd_recommend(
    data: &Path,
    strategies: &[Strategy],
    config: &AnalyzerConfig,
    json: bool,
) -> Result<()> {
    let history = load_history(data)?;
    let tickets = strategies::generate_all(&selected(strategies), history.all(), config)?;
    if json {
        return print_json(&tickets);
    }
    if let Some(last) = history.last_date() {
        println!("Based on {} drawing(s) up to {}", history.len(), last);
    }
    display::display_tickets(&tickets);
    Ok(())
}

fn cmd_backtest(
    data: &Path,
    lookback: usize,
    strategies: &[Strategy],
    config: &AnalyzerConfig,
    plays: bool,
    chart: bool,
    json: bool,
) -> Result<()> {
    let history = load_history(data)?;
    let strategies = selected(strategies);

    info!(
        "backtesting {} strategies over the last {} of {} drawing(s)",
        strategies.len(),
        lookback,
        history.len()
    );

    let pb = if json {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(strategies.len() as u64)
    };
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )?
        .progress_chars("=> "),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(120));

    let results = backtest_all_with_progress(history.all(), &strategies, lookback, config, |r| {
        pb.set_message(r.strategy.to_string());
        pb.inc(1);
    })
    .with_context(|| format!("Backtest over {} drawing(s) failed", lookback))?;
    pb.finish_and_clear();

    let best = best_strategy(&results);
    if json {
        let out = serde_json::json!({
            "lookback": lookback,
            "results": results,
            "best": best.map(|b| b.strategy),
        });
        return print_json(&out);
    }

    display::display_backtest(&results, best);
    if plays {
        for result in &results {
            display::display_plays(result, &config.payouts);
        }
    }
    if chart {
        display::display_net_chart(&results);
    }
    Ok(())
}

fn cmd_coverage(
    data: &Path,
    count: usize,
    budget: f64,
    config: &AnalyzerConfig,
    json: bool,
) -> Result<()> {
    if !budget.is_finite() || budget < 0.0 {
        bail!("Budget must be a positive amount, got {}", budget);
    }
    let history = load_history(data)?;
    let budget_cents = (budget * 100.0).round() as i64;
    let tickets = strategies::coverage_portfolio(history.all(), count, budget_cents, config)?;
    if json {
        return print_json(&tickets);
    }
    println!(
        "{} ticket(s) for {} (budget {})",
        tickets.len(),
        display::format_money(tickets.len() as i64 * config.stake_cents),
        display::format_money(budget_cents)
    );
    display::display_tickets(&tickets);
    Ok(())
}

fn cmd_history(data: &Path, last: usize, json: bool) -> Result<()> {
    let history = load_history(data)?;
    let draws = history.last(last);
    if json {
        return print_json(&draws);
    }
    println!(
        "{} drawing(s) loaded, showing the latest {}",
        history.len(),
        draws.len()
    );
    display::display_history(draws);
    Ok(())
}
