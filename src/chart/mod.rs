//! Terminal bar charts.
//!
//! Renders ranked data slices as Unicode bar charts for the console. The
//! aggregation layer hands over labels and values only; everything about
//! layout (scaling, padding, glyphs) is decided here.

use crate::models::{BattingRecord, BowlingRecord, PlayerComparison, TeamRecord};

const FULL_BLOCK: char = '█';
const LIGHT_BLOCK: char = '░';

/// A titled horizontal bar chart.
#[derive(Debug, Clone)]
pub struct BarChart {
    title: String,
    /// Maximum bar length in characters.
    width: usize,
    /// Decimal places shown after each bar.
    precision: usize,
    rows: Vec<(String, f64)>,
}

impl BarChart {
    pub fn new(title: impl Into<String>, width: usize) -> Self {
        Self {
            title: title.into(),
            width: width.max(1),
            precision: 0,
            rows: Vec::new(),
        }
    }

    /// Set how many decimal places the value column shows.
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn row(mut self, label: impl Into<String>, value: f64) -> Self {
        self.rows.push((label.into(), value));
        self
    }

    /// Render the chart. Bars scale to the largest absolute value;
    /// negative values draw with a light block so the sign reads at a
    /// glance even before the numeric suffix.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.title);
        out.push('\n');
        out.push_str(&"─".repeat(self.title.chars().count().max(4)));
        out.push('\n');

        if self.rows.is_empty() {
            out.push_str("(no data)\n");
            return out;
        }

        let label_width = self
            .rows
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0);
        let max_abs = self
            .rows
            .iter()
            .map(|(_, v)| v.abs())
            .fold(0.0_f64, f64::max);

        for (label, value) in &self.rows {
            let len = if max_abs > 0.0 {
                ((value.abs() / max_abs) * self.width as f64).round() as usize
            } else {
                0
            };
            let glyph = if *value < 0.0 { LIGHT_BLOCK } else { FULL_BLOCK };
            let bar: String = std::iter::repeat(glyph).take(len).collect();

            out.push_str(&format!(
                "{:<label_width$} │{} {:.prec$}\n",
                label,
                bar,
                value,
                label_width = label_width,
                prec = self.precision,
            ));
        }

        out
    }
}

/// Chart of total runs for a ranked batting slice.
pub fn batting_runs_chart(rows: &[BattingRecord], width: usize) -> BarChart {
    rows.iter().fold(
        BarChart::new("Top Run Scorers", width),
        |chart, r| chart.row(format!("{} ({})", r.player, r.team), r.runs as f64),
    )
}

/// Chart of total wickets for a ranked bowling slice.
pub fn bowling_wickets_chart(rows: &[BowlingRecord], width: usize) -> BarChart {
    rows.iter().fold(
        BarChart::new("Top Wicket Takers", width),
        |chart, r| chart.row(format!("{} ({})", r.player, r.team), r.wickets as f64),
    )
}

/// Chart of points for the full standings.
pub fn team_points_chart(teams: &[TeamRecord], width: usize) -> BarChart {
    teams.iter().fold(
        BarChart::new("Points Table", width),
        |chart, t| chart.row(t.team.clone(), t.points as f64),
    )
}

/// Chart of net run rate for the full standings. NRR is signed, so
/// relegated sides render with the light glyph.
pub fn team_nrr_chart(teams: &[TeamRecord], width: usize) -> BarChart {
    teams
        .iter()
        .fold(BarChart::new("Net Run Rate", width), |chart, t| {
            chart.row(t.team.clone(), t.nrr)
        })
        .precision(3)
}

/// Render a two-player comparison as one paired bar chart per metric.
pub fn comparison_chart(comparison: &PlayerComparison, width: usize) -> String {
    let left_label = format!("{} ({})", comparison.left_player, comparison.left_team);
    let right_label = format!("{} ({})", comparison.right_player, comparison.right_team);

    let mut out = format!(
        "{} comparison: {} vs {}\n\n",
        comparison.category, comparison.left_player, comparison.right_player
    );

    for m in &comparison.metrics {
        let chart = BarChart::new(m.metric, width)
            .precision(2)
            .row(left_label.clone(), m.left)
            .row(right_label.clone(), m.right);
        out.push_str(&chart.render());
        out.push('\n');
    }

    out
}
