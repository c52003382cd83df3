//! CricStats - cricket tournament statistics analyzer
//!
//! A CLI tool that loads a season's batting, bowling, fielding, and
//! standings CSVs, answers ranking and comparison queries, draws terminal
//! charts, and generates a plain-text season report.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (load failure, unknown player, bad config, etc.)

mod analysis;
mod chart;
mod cli;
mod config;
mod data;
mod models;
mod report;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, ChartKind, Command, OutputFormat};
use config::{Config, TournamentFacts};
use data::DataStore;
use models::{Category, PlayerComparison, SeasonSummary, StatsError};
use report::ReportContext;
use std::io::{BufRead, Write};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle init-config early (no logging needed)
    if matches!(args.command, Command::InitConfig) {
        if let Err(e) = handle_init_config() {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    // Initialize logging
    init_logging(&args);

    info!("CricStats v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(args) {
        error!("Command failed: {}", e);
        eprintln!("\nError: {:#}", e);
        std::process::exit(1);
    }
}

/// Handle init-config: generate a default .cricstats.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".cricstats.toml");

    if path.exists() {
        anyhow::bail!(".cricstats.toml already exists. Remove it first or edit it manually.");
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .cricstats.toml")?;

    println!("Created .cricstats.toml with default settings.");
    println!("Edit it to customize dataset paths and tournament facts.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level())
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .cricstats.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}

/// Load config and data, then dispatch the requested command.
fn run(args: Args) -> Result<()> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let store = DataStore::load(&config.data);

    if store.is_empty() {
        warn!("All four datasets are empty; queries will return no results");
    } else {
        info!(
            "Loaded {} batsmen, {} bowlers, {} fielders, {} teams",
            store.batting.len(),
            store.bowling.len(),
            store.fielding.len(),
            store.teams.len()
        );
    }

    match args.command {
        Command::Summary { format } => print_summary(&store, &config.tournament, format),
        Command::Top {
            category,
            count,
            format,
        } => print_top(&store, category, count, format),
        Command::Compare {
            player1,
            player2,
            category,
            chart,
            format,
        } => print_compare(
            &store,
            &player1,
            &player2,
            category,
            chart,
            config.chart.bar_width,
            format,
        ),
        Command::Chart { kind, count } => {
            print_chart(&store, kind, count, config.chart.bar_width)
        }
        Command::Report { output } => {
            let path = output.unwrap_or_else(|| config.report.output.clone());
            let ctx = ReportContext {
                facts: &config.tournament,
                generated_at: Utc::now(),
                top_n: config.report.top_n,
            };
            report::write_report(&store, &ctx, &path)?;
            println!("Report generated: {}", path.display());
            Ok(())
        }
        Command::Menu => run_menu(&store, &config),
        Command::InitConfig => unreachable!("handled before dispatch"),
    }
}

/// Print the tournament summary to the console.
fn print_summary(store: &DataStore, facts: &TournamentFacts, format: OutputFormat) -> Result<()> {
    let summary = analysis::season_summary(store)?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", "=".repeat(60));
    println!("{} TOURNAMENT SUMMARY", facts.name.to_uppercase());
    println!("{}", "=".repeat(60));
    println!("Champion: {}", facts.champion);
    println!("Runner-up: {}", facts.runner_up);
    println!("Final Margin: {}", facts.final_margin);
    println!();
    print_awards(&summary);
    println!();
    println!("POINTS TABLE (Top {}):", summary.top_teams.len());
    for team in &summary.top_teams {
        println!(
            "{}. {} - {} pts (NRR: {:+.3})",
            team.position, team.team, team.points, team.nrr
        );
    }

    Ok(())
}

fn print_awards(summary: &SeasonSummary) {
    let orange = &summary.leading_run_scorer;
    let purple = &summary.leading_wicket_taker;
    let fielder = &summary.best_fielder;
    println!(
        "Orange Cap: {} ({}) - {} runs",
        orange.player, orange.team, orange.runs
    );
    println!(
        "Purple Cap: {} ({}) - {} wickets",
        purple.player, purple.team, purple.wickets
    );
    println!(
        "Best Fielder: {} ({}) - {} catches",
        fielder.player, fielder.team, fielder.catches
    );
}

/// Print a top-N ranking to the console.
fn print_top(
    store: &DataStore,
    category: Category,
    count: usize,
    format: OutputFormat,
) -> Result<()> {
    let ranking = analysis::top_performers(store, category, count);

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&ranking)?);
        return Ok(());
    }

    println!(
        "TOP {} {} PERFORMERS",
        count,
        category.to_string().to_uppercase()
    );
    println!("{}", "-".repeat(50));

    if ranking.is_empty() {
        println!("(no data)");
        return Ok(());
    }

    match ranking {
        analysis::Ranking::Batting(rows) => {
            println!(
                "{:<20} {:<5} {:>5} {:>8} {:>12}",
                "Player", "Team", "Runs", "Average", "Strike_Rate"
            );
            for r in rows {
                println!(
                    "{:<20} {:<5} {:>5} {:>8.2} {:>12.2}",
                    r.player, r.team, r.runs, r.average, r.strike_rate
                );
            }
        }
        analysis::Ranking::Bowling(rows) => {
            println!(
                "{:<20} {:<5} {:>8} {:>8} {:>8}",
                "Player", "Team", "Wickets", "Economy", "Average"
            );
            for r in rows {
                println!(
                    "{:<20} {:<5} {:>8} {:>8.2} {:>8.2}",
                    r.player, r.team, r.wickets, r.economy, r.average
                );
            }
        }
        analysis::Ranking::Fielding(rows) => {
            println!(
                "{:<20} {:<5} {:>8} {:>8}",
                "Player", "Team", "Catches", "Matches"
            );
            for r in rows {
                println!(
                    "{:<20} {:<5} {:>8} {:>8}",
                    r.player, r.team, r.catches, r.matches
                );
            }
        }
    }

    Ok(())
}

/// Print a two-player comparison to the console.
fn print_compare(
    store: &DataStore,
    player1: &str,
    player2: &str,
    category: Category,
    with_chart: bool,
    bar_width: usize,
    format: OutputFormat,
) -> Result<()> {
    let comparison = analysis::compare_players(store, player1, player2, category)?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
        return Ok(());
    }

    print_comparison_table(&comparison);

    if with_chart {
        println!();
        print!("{}", chart::comparison_chart(&comparison, bar_width));
    }

    Ok(())
}

fn print_comparison_table(comparison: &PlayerComparison) {
    let left = format!("{} ({})", comparison.left_player, comparison.left_team);
    let right = format!("{} ({})", comparison.right_player, comparison.right_team);

    println!(
        "{} comparison: {} vs {}",
        comparison.category, comparison.left_player, comparison.right_player
    );
    println!("{}", "-".repeat(50));
    println!("{:<14} {:>16} {:>16}", "Metric", left, right);
    for m in &comparison.metrics {
        println!("{:<14} {:>16.2} {:>16.2}", m.metric, m.left, m.right);
    }
}

/// Draw one of the standalone charts.
fn print_chart(store: &DataStore, kind: ChartKind, count: usize, bar_width: usize) -> Result<()> {
    let rendered = match kind {
        ChartKind::Batsmen => {
            match analysis::top_performers(store, Category::Batting, count) {
                analysis::Ranking::Batting(rows) => {
                    chart::batting_runs_chart(&rows, bar_width).render()
                }
                _ => unreachable!(),
            }
        }
        ChartKind::Bowlers => {
            match analysis::top_performers(store, Category::Bowling, count) {
                analysis::Ranking::Bowling(rows) => {
                    chart::bowling_wickets_chart(&rows, bar_width).render()
                }
                _ => unreachable!(),
            }
        }
        ChartKind::Points => chart::team_points_chart(&store.team_standings(), bar_width).render(),
        ChartKind::Nrr => chart::team_nrr_chart(&store.team_standings(), bar_width).render(),
    };

    print!("{}", rendered);
    Ok(())
}

const MENU: &str = "\
MENU OPTIONS:
1. Tournament Summary
2. Top Batting Performers
3. Top Bowling Performers
4. Top Fielding Performers
5. Chart: Top Batsmen
6. Chart: Top Bowlers
7. Charts: Team Points & NRR
8. Compare Players
9. Generate Report
0. Exit";

/// Interactive numbered menu over stdin. Query errors are reported and the
/// loop continues; only exit or end of input leaves it.
fn run_menu(store: &DataStore, config: &Config) -> Result<()> {
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    println!("Welcome to {} Statistics Analyzer!", config.tournament.name);

    loop {
        println!("\n{}", MENU);
        let Some(choice) = prompt(&mut lines, "\nEnter your choice (0-9): ")? else {
            break;
        };

        let result = match choice.as_str() {
            "1" => print_summary(store, &config.tournament, OutputFormat::Text),
            "2" => print_top(store, Category::Batting, 10, OutputFormat::Text),
            "3" => print_top(store, Category::Bowling, 10, OutputFormat::Text),
            "4" => print_top(store, Category::Fielding, 10, OutputFormat::Text),
            "5" => print_chart(store, ChartKind::Batsmen, 10, config.chart.bar_width),
            "6" => print_chart(store, ChartKind::Bowlers, 10, config.chart.bar_width),
            "7" => print_chart(store, ChartKind::Points, 10, config.chart.bar_width)
                .and_then(|_| print_chart(store, ChartKind::Nrr, 10, config.chart.bar_width)),
            "8" => menu_compare(store, config, &mut lines),
            "9" => {
                let ctx = ReportContext {
                    facts: &config.tournament,
                    generated_at: Utc::now(),
                    top_n: config.report.top_n,
                };
                report::write_report(store, &ctx, &config.report.output).map(|_| {
                    println!("Report generated: {}", config.report.output.display());
                })
            }
            "0" => {
                println!("Goodbye!");
                break;
            }
            other => {
                println!("Invalid choice '{}'. Please try again.", other);
                continue;
            }
        };

        // Report query errors without leaving the menu
        if let Err(e) = result {
            println!("Error: {:#}", e);
        }
    }

    Ok(())
}

/// Collect the category and player names for a menu comparison.
fn menu_compare(
    store: &DataStore,
    config: &Config,
    lines: &mut std::io::Lines<std::io::StdinLock<'_>>,
) -> Result<()> {
    println!("Available categories: batting, bowling");

    let Some(category) = prompt(lines, "Enter category: ")? else {
        return Ok(());
    };
    let category: Category = match category.parse() {
        Ok(c) => c,
        Err(e @ StatsError::InvalidCategory(_)) => {
            println!("{}", e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let Some(player1) = prompt(lines, "Enter first player name: ")? else {
        return Ok(());
    };
    let Some(player2) = prompt(lines, "Enter second player name: ")? else {
        return Ok(());
    };

    print_compare(
        store,
        &player1,
        &player2,
        category,
        true,
        config.chart.bar_width,
        OutputFormat::Text,
    )
}

/// Print a prompt and read one trimmed line. `Ok(None)` on end of input.
fn prompt(
    lines: &mut std::io::Lines<std::io::StdinLock<'_>>,
    message: &str,
) -> Result<Option<String>> {
    print!("{}", message);
    std::io::stdout().flush().context("Failed to flush stdout")?;

    match lines.next() {
        Some(line) => Ok(Some(line.context("Failed to read input")?.trim().to_string())),
        None => Ok(None),
    }
}
