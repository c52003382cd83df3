//! Data models for the statistics aggregator.
//!
//! This module contains the four record types backing the in-memory tables,
//! the query category enum, and the error taxonomy used throughout the
//! application.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// A single batting row, one per player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattingRecord {
    #[serde(rename = "Player")]
    pub player: String,
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Runs")]
    pub runs: u32,
    #[serde(rename = "Average")]
    pub average: f64,
    #[serde(rename = "Strike_Rate")]
    pub strike_rate: f64,
    #[serde(rename = "Fours")]
    pub fours: u32,
    #[serde(rename = "Sixes")]
    pub sixes: u32,
}

/// A single bowling row, one per player.
///
/// `Strike_Rate` is optional in the source data; bowlers with no recorded
/// strike rate deserialize to `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BowlingRecord {
    #[serde(rename = "Player")]
    pub player: String,
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Wickets")]
    pub wickets: u32,
    #[serde(rename = "Economy")]
    pub economy: f64,
    #[serde(rename = "Average")]
    pub average: f64,
    #[serde(rename = "Strike_Rate", default)]
    pub strike_rate: Option<f64>,
}

/// A single fielding row, one per player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldingRecord {
    #[serde(rename = "Player")]
    pub player: String,
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Catches")]
    pub catches: u32,
    #[serde(rename = "Matches")]
    pub matches: u32,
}

/// A single team standings row.
///
/// `Team` holds the short team code the player tables reference. The
/// reference is by name only; nothing enforces it at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    #[serde(rename = "Position")]
    pub position: u32,
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Points")]
    pub points: u32,
    #[serde(rename = "NRR")]
    pub nrr: f64,
    #[serde(rename = "Total_Runs")]
    pub total_runs: u32,
    #[serde(rename = "Won")]
    pub won: u32,
    #[serde(rename = "Lost")]
    pub lost: u32,
    #[serde(rename = "Highest_Total")]
    pub highest_total: u32,
}

/// Statistical category for ranking and comparison queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Ranked by total runs.
    Batting,
    /// Ranked by total wickets.
    Bowling,
    /// Ranked by total catches.
    Fielding,
}

impl Category {
    /// The metric each category ranks by.
    pub fn metric_name(&self) -> &'static str {
        match self {
            Category::Batting => "Runs",
            Category::Bowling => "Wickets",
            Category::Fielding => "Catches",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Batting => write!(f, "batting"),
            Category::Bowling => write!(f, "bowling"),
            Category::Fielding => write!(f, "fielding"),
        }
    }
}

impl FromStr for Category {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "batting" => Ok(Category::Batting),
            "bowling" => Ok(Category::Bowling),
            "fielding" => Ok(Category::Fielding),
            other => Err(StatsError::InvalidCategory(other.to_string())),
        }
    }
}

/// Errors surfaced by loading and query operations.
///
/// None of these are fatal to the process: a load failure leaves the
/// affected table empty, and query errors are reported to the operator.
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    /// A source CSV file is absent or malformed.
    #[error("failed to load {table} data from {path}")]
    DataLoad {
        table: &'static str,
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A category string outside {batting, bowling, fielding}.
    #[error("unknown category '{0}' (expected batting, bowling, or fielding)")]
    InvalidCategory(String),

    /// No row with an exactly matching player name.
    #[error("player '{player}' not found in the {category} dataset")]
    PlayerNotFound { player: String, category: Category },

    /// An operation needed a table that failed to load or is empty.
    #[error("no {0} data loaded")]
    MissingTable(&'static str),
}

/// The season summary: one award row per player table plus the playoff
/// qualifiers from the standings.
#[derive(Debug, Clone, Serialize)]
pub struct SeasonSummary {
    /// Batting row with the most runs (Orange Cap).
    pub leading_run_scorer: BattingRecord,
    /// Bowling row with the most wickets (Purple Cap).
    pub leading_wicket_taker: BowlingRecord,
    /// Fielding row with the most catches.
    pub best_fielder: FieldingRecord,
    /// First four standings rows by position.
    pub top_teams: Vec<TeamRecord>,
}

/// One metric of a two-player comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparedMetric {
    pub metric: &'static str,
    pub left: f64,
    pub right: f64,
}

/// Side-by-side comparison of two players within one category.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerComparison {
    pub category: Category,
    pub left_player: String,
    pub left_team: String,
    pub right_player: String,
    pub right_team: String,
    pub metrics: Vec<ComparedMetric>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_str() {
        assert_eq!("batting".parse::<Category>().unwrap(), Category::Batting);
        assert_eq!("BOWLING".parse::<Category>().unwrap(), Category::Bowling);
        assert_eq!(" Fielding ".parse::<Category>().unwrap(), Category::Fielding);
    }

    #[test]
    fn test_category_from_str_invalid() {
        let err = "batsman".parse::<Category>().unwrap_err();
        assert!(matches!(err, StatsError::InvalidCategory(ref s) if s == "batsman"));
    }

    #[test]
    fn test_category_metric_names() {
        assert_eq!(Category::Batting.metric_name(), "Runs");
        assert_eq!(Category::Bowling.metric_name(), "Wickets");
        assert_eq!(Category::Fielding.metric_name(), "Catches");
    }

    #[test]
    fn test_batting_record_csv_headers() {
        let data = "Player,Team,Runs,Average,Strike_Rate,Fours,Sixes\n\
                    Virat Kohli,RCB,657,54.75,145.99,62,19\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let record: BattingRecord = reader.deserialize().next().unwrap().unwrap();
        assert_eq!(record.player, "Virat Kohli");
        assert_eq!(record.runs, 657);
        assert_eq!(record.fours, 62);
    }

    #[test]
    fn test_bowling_record_optional_strike_rate() {
        let data = "Player,Team,Wickets,Economy,Average\n\
                    Prasidh Krishna,GT,25,8.27,17.08\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let record: BowlingRecord = reader.deserialize().next().unwrap().unwrap();
        assert_eq!(record.wickets, 25);
        assert_eq!(record.strike_rate, None);
    }

    #[test]
    fn test_team_record_signed_nrr() {
        let data = "Position,Team,Points,NRR,Total_Runs,Won,Lost,Highest_Total\n\
                    10,CSK,10,-0.647,2406,5,9,190\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let record: TeamRecord = reader.deserialize().next().unwrap().unwrap();
        assert_eq!(record.position, 10);
        assert!(record.nrr < 0.0);
    }
}
