//! Season report rendering.
//!
//! Produces the fixed-width plain-text season report. Output is
//! deterministic for a given set of tables; the only varying line is the
//! generation timestamp, which the caller injects through `ReportContext`
//! so tests can pin it.

use crate::analysis::{season_summary, top_performers, Ranking};
use crate::config::TournamentFacts;
use crate::data::DataStore;
use crate::models::{Category, StatsError};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fmt::Write as _;
use std::path::Path;

/// Inputs to report rendering beyond the tables themselves.
pub struct ReportContext<'a> {
    /// Static season facts from configuration.
    pub facts: &'a TournamentFacts,
    /// Timestamp stamped into the header.
    pub generated_at: DateTime<Utc>,
    /// How many batting and bowling rows to include.
    pub top_n: usize,
}

/// Render the full report as a string.
///
/// Fails with `MissingTable` if any of the player tables is empty, since
/// the award lines cannot be computed without them.
pub fn generate_text_report(store: &DataStore, ctx: &ReportContext) -> Result<String, StatsError> {
    let summary = season_summary(store)?;
    let mut out = String::new();

    // Header
    let _ = writeln!(
        out,
        "{} COMPREHENSIVE ANALYSIS REPORT",
        ctx.facts.name.to_uppercase()
    );
    let _ = writeln!(out, "{}\n", "=".repeat(50));
    let _ = writeln!(
        out,
        "Generated on: {}\n",
        ctx.generated_at.format("%Y-%m-%d %H:%M:%S")
    );

    // Static tournament facts
    let _ = writeln!(out, "TOURNAMENT SUMMARY");
    let _ = writeln!(out, "{}", "-".repeat(20));
    let _ = writeln!(out, "Champion: {}", ctx.facts.champion);
    let _ = writeln!(out, "Runner-up: {}", ctx.facts.runner_up);
    let _ = writeln!(out, "Total Teams: {}", ctx.facts.total_teams);
    let _ = writeln!(out, "Total Matches: {}\n", ctx.facts.total_matches);

    // Individual awards
    let _ = writeln!(out, "INDIVIDUAL AWARDS");
    let _ = writeln!(out, "{}", "-".repeat(20));
    let orange = &summary.leading_run_scorer;
    let purple = &summary.leading_wicket_taker;
    let fielder = &summary.best_fielder;
    let _ = writeln!(
        out,
        "Orange Cap: {} ({}) - {} runs",
        orange.player, orange.team, orange.runs
    );
    let _ = writeln!(
        out,
        "Purple Cap: {} ({}) - {} wickets",
        purple.player, purple.team, purple.wickets
    );
    let _ = writeln!(
        out,
        "Best Fielder: {} ({}) - {} catches\n",
        fielder.player, fielder.team, fielder.catches
    );

    // Full standings, position ascending, fixed-width columns
    let _ = writeln!(out, "FINAL POINTS TABLE");
    let _ = writeln!(out, "{}", "-".repeat(20));
    for team in store.team_standings() {
        let _ = writeln!(
            out,
            "{:2}. {:<4} - {:2} pts | W: {:2} L: {:2} | NRR: {:+.3}",
            team.position, team.team, team.points, team.won, team.lost, team.nrr
        );
    }

    // Top performer blocks
    let _ = writeln!(out, "\nTOP {} BATSMEN", ctx.top_n);
    let _ = writeln!(out, "{}", "-".repeat(20));
    if let Ranking::Batting(rows) = top_performers(store, Category::Batting, ctx.top_n) {
        for p in rows {
            let _ = writeln!(
                out,
                "{:<20} ({}) - {:3} runs @ {:.2} avg, SR: {:.2}",
                p.player, p.team, p.runs, p.average, p.strike_rate
            );
        }
    }

    let _ = writeln!(out, "\nTOP {} BOWLERS", ctx.top_n);
    let _ = writeln!(out, "{}", "-".repeat(20));
    if let Ranking::Bowling(rows) = top_performers(store, Category::Bowling, ctx.top_n) {
        for p in rows {
            let _ = writeln!(
                out,
                "{:<20} ({}) - {:2} wickets @ {:.2} avg, Econ: {:.2}",
                p.player, p.team, p.wickets, p.average, p.economy
            );
        }
    }

    Ok(out)
}

/// Render the report and write it to `path`, overwriting any existing file.
pub fn write_report(store: &DataStore, ctx: &ReportContext, path: &Path) -> Result<()> {
    let content = generate_text_report(store, ctx)?;

    std::fs::write(path, content.as_bytes())
        .with_context(|| format!("Failed to write report to {}", path.display()))?;

    Ok(())
}
