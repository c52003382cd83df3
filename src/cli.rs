//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::models::Category;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CricStats - cricket tournament statistics analyzer
///
/// Loads a season's batting, bowling, fielding, and standings CSVs and
/// answers ranking and comparison queries, draws terminal charts, and
/// generates a plain-text season report.
///
/// Examples:
///   cricstats summary
///   cricstats top --category bowling -n 5
///   cricstats compare "Virat Kohli" "Sai Sudharsan" --category batting
///   cricstats chart nrr
///   cricstats report -o season.txt
///   cricstats menu
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file
    ///
    /// If not specified, looks for .cricstats.toml in the current directory
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Directory containing the season CSV files
    ///
    /// Overrides the directory part of every configured dataset path.
    #[arg(long, value_name = "DIR", env = "CRICSTATS_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// The operation to run.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show the tournament summary: individual awards and playoff spots
    Summary {
        /// Output format (text, json)
        #[arg(long, default_value = "text", value_name = "FORMAT")]
        format: OutputFormat,
    },

    /// List top performers in a category
    Top {
        /// Category to rank (batting, bowling, fielding)
        #[arg(short = 'C', long, value_enum, default_value_t = Category::Batting)]
        category: Category,

        /// How many rows to show
        #[arg(short = 'n', long, default_value = "10", value_name = "COUNT")]
        count: usize,

        /// Output format (text, json)
        #[arg(long, default_value = "text", value_name = "FORMAT")]
        format: OutputFormat,
    },

    /// Compare two players side by side
    Compare {
        /// First player name (exact match)
        player1: String,

        /// Second player name (exact match)
        player2: String,

        /// Comparison category (batting or bowling)
        #[arg(short = 'C', long, value_enum, default_value_t = Category::Batting)]
        category: Category,

        /// Also draw the paired bar chart
        #[arg(long)]
        chart: bool,

        /// Output format (text, json)
        #[arg(long, default_value = "text", value_name = "FORMAT")]
        format: OutputFormat,
    },

    /// Draw a terminal bar chart
    Chart {
        /// Which chart to draw
        #[arg(value_enum)]
        kind: ChartKind,

        /// How many player rows to chart (ignored for team charts)
        #[arg(short = 'n', long, default_value = "10", value_name = "COUNT")]
        count: usize,
    },

    /// Generate the season report file
    Report {
        /// Output file path (defaults to the configured report path)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Run the interactive numbered menu
    Menu,

    /// Generate a default .cricstats.toml configuration file
    InitConfig,
}

/// Output format for query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text (default)
    #[default]
    Text,
    /// JSON format
    Json,
}

/// Chart selection for the `chart` subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ChartKind {
    /// Total runs of the top batsmen
    Batsmen,
    /// Total wickets of the top bowlers
    Bowlers,
    /// Points for every team
    Points,
    /// Net run rate for every team
    Nrr,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        match &self.command {
            Command::Top { count, .. } | Command::Chart { count, .. } => {
                if *count == 0 {
                    return Err("Count must be at least 1".to_string());
                }
            }
            Command::Compare {
                player1, player2, ..
            } => {
                if player1.trim().is_empty() || player2.trim().is_empty() {
                    return Err("Player names must not be empty".to_string());
                }
            }
            _ => {}
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args(command: Command) -> Args {
        Args {
            command,
            config: None,
            data_dir: None,
            verbose: false,
            quiet: false,
        }
    }

    #[test]
    fn test_validation_conflicting_verbosity() {
        let mut args = make_args(Command::Summary {
            format: OutputFormat::Text,
        });
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_zero_count() {
        let args = make_args(Command::Top {
            category: Category::Batting,
            count: 0,
            format: OutputFormat::Text,
        });
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_empty_player_name() {
        let args = make_args(Command::Compare {
            player1: "  ".to_string(),
            player2: "Virat Kohli".to_string(),
            category: Category::Batting,
            chart: false,
            format: OutputFormat::Text,
        });
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args(Command::Menu);
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }

    #[test]
    fn test_parse_top_subcommand() {
        let args =
            Args::try_parse_from(["cricstats", "top", "--category", "bowling", "-n", "5"]).unwrap();
        match args.command {
            Command::Top {
                category, count, ..
            } => {
                assert_eq!(category, Category::Bowling);
                assert_eq!(count, 5);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_compare_subcommand() {
        let args = Args::try_parse_from([
            "cricstats",
            "compare",
            "Virat Kohli",
            "Sai Sudharsan",
            "--chart",
        ])
        .unwrap();
        match args.command {
            Command::Compare {
                player1,
                player2,
                category,
                chart,
                ..
            } => {
                assert_eq!(player1, "Virat Kohli");
                assert_eq!(player2, "Sai Sudharsan");
                assert_eq!(category, Category::Batting);
                assert!(chart);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
