//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.cricstats.toml` files. The tournament facts that appear verbatim in the
//! report (champion, runner-up, team and match counts) live here rather than
//! in the formatting logic, so a different season only needs a config edit.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Dataset file locations.
    #[serde(default)]
    pub data: DataConfig,

    /// Static tournament facts rendered into reports.
    #[serde(default)]
    pub tournament: TournamentFacts,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,

    /// Chart settings.
    #[serde(default)]
    pub chart: ChartConfig,
}

/// Locations of the four CSV sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Batting statistics CSV.
    #[serde(default = "default_batting_path")]
    pub batting: PathBuf,

    /// Bowling statistics CSV.
    #[serde(default = "default_bowling_path")]
    pub bowling: PathBuf,

    /// Fielding statistics CSV.
    #[serde(default = "default_fielding_path")]
    pub fielding: PathBuf,

    /// Team standings CSV.
    #[serde(default = "default_teams_path")]
    pub teams: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            batting: default_batting_path(),
            bowling: default_bowling_path(),
            fielding: default_fielding_path(),
            teams: default_teams_path(),
        }
    }
}

impl DataConfig {
    /// Re-root all four paths under `dir`, keeping file names.
    pub fn rebase(&mut self, dir: &Path) {
        for path in [
            &mut self.batting,
            &mut self.bowling,
            &mut self.fielding,
            &mut self.teams,
        ] {
            if let Some(name) = path.file_name() {
                *path = dir.join(name);
            }
        }
    }
}

fn default_batting_path() -> PathBuf {
    PathBuf::from("data/batting_stats.csv")
}

fn default_bowling_path() -> PathBuf {
    PathBuf::from("data/bowling_stats.csv")
}

fn default_fielding_path() -> PathBuf {
    PathBuf::from("data/fielding_stats.csv")
}

fn default_teams_path() -> PathBuf {
    PathBuf::from("data/team_standings.csv")
}

/// Descriptive facts about the tournament.
///
/// These are not derived from the datasets; they are season constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentFacts {
    /// Tournament display name.
    #[serde(default = "default_name")]
    pub name: String,

    /// Tournament champion.
    #[serde(default = "default_champion")]
    pub champion: String,

    /// Tournament runner-up.
    #[serde(default = "default_runner_up")]
    pub runner_up: String,

    /// Winning margin in the final.
    #[serde(default = "default_final_margin")]
    pub final_margin: String,

    /// Number of participating teams.
    #[serde(default = "default_total_teams")]
    pub total_teams: u32,

    /// Number of matches played.
    #[serde(default = "default_total_matches")]
    pub total_matches: u32,
}

impl Default for TournamentFacts {
    fn default() -> Self {
        Self {
            name: default_name(),
            champion: default_champion(),
            runner_up: default_runner_up(),
            final_margin: default_final_margin(),
            total_teams: default_total_teams(),
            total_matches: default_total_matches(),
        }
    }
}

fn default_name() -> String {
    "IPL 2025".to_string()
}

fn default_champion() -> String {
    "Royal Challengers Bengaluru".to_string()
}

fn default_runner_up() -> String {
    "Punjab Kings".to_string()
}

fn default_final_margin() -> String {
    "6 runs".to_string()
}

fn default_total_teams() -> u32 {
    10
}

fn default_total_matches() -> u32 {
    74
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// How many batting and bowling rows the report includes.
    #[serde(default = "default_report_top_n")]
    pub top_n: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            top_n: default_report_top_n(),
        }
    }
}

fn default_output() -> PathBuf {
    PathBuf::from("analysis_report.txt")
}

fn default_report_top_n() -> usize {
    5
}

/// Terminal chart settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Maximum bar width in characters.
    #[serde(default = "default_bar_width")]
    pub bar_width: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            bar_width: default_bar_width(),
        }
    }
}

fn default_bar_width() -> usize {
    40
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but
    /// can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".cricstats.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// where the CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref dir) = args.data_dir {
            self.data.rebase(dir);
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.tournament.name, "IPL 2025");
        assert_eq!(config.tournament.total_teams, 10);
        assert_eq!(config.report.top_n, 5);
        assert_eq!(config.data.batting, PathBuf::from("data/batting_stats.csv"));
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[data]
batting = "season/bat.csv"

[tournament]
name = "IPL 2024"
champion = "Kolkata Knight Riders"
runner_up = "Sunrisers Hyderabad"
total_matches = 71

[report]
output = "ipl_2024.txt"
top_n = 10
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.data.batting, PathBuf::from("season/bat.csv"));
        // Unspecified paths keep their defaults
        assert_eq!(config.data.bowling, PathBuf::from("data/bowling_stats.csv"));
        assert_eq!(config.tournament.champion, "Kolkata Knight Riders");
        assert_eq!(config.tournament.total_matches, 71);
        assert_eq!(config.report.top_n, 10);
    }

    #[test]
    fn test_rebase_data_paths() {
        let mut data = DataConfig::default();
        data.rebase(Path::new("/srv/ipl"));
        assert_eq!(data.batting, PathBuf::from("/srv/ipl/batting_stats.csv"));
        assert_eq!(data.teams, PathBuf::from("/srv/ipl/team_standings.csv"));
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[data]"));
        assert!(toml_str.contains("[tournament]"));
        assert!(toml_str.contains("[report]"));
    }
}
