//! Ranking, award, and comparison queries.
//!
//! Every query here is a pure read over the loaded tables. Ties are broken
//! by source row order throughout: rankings use a stable descending sort,
//! and award rows take the first occurrence of the maximum.

use crate::data::DataStore;
use crate::models::{
    BattingRecord, BowlingRecord, Category, ComparedMetric, FieldingRecord, PlayerComparison,
    SeasonSummary, StatsError,
};
use serde::Serialize;
use std::cmp::Reverse;

/// How many standings rows the season summary includes.
const PLAYOFF_SPOTS: usize = 4;

/// Result of a top-N query, carrying the rows of the queried table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Ranking {
    Batting(Vec<BattingRecord>),
    Bowling(Vec<BowlingRecord>),
    Fielding(Vec<FieldingRecord>),
}

impl Ranking {
    /// The category this ranking was computed for.
    pub fn category(&self) -> Category {
        match self {
            Ranking::Batting(_) => Category::Batting,
            Ranking::Bowling(_) => Category::Bowling,
            Ranking::Fielding(_) => Category::Fielding,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Ranking::Batting(rows) => rows.len(),
            Ranking::Bowling(rows) => rows.len(),
            Ranking::Fielding(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Compute the season summary: the three individual award rows plus the
/// playoff qualifiers from the standings.
///
/// Fails with `MissingTable` if any of the three player tables is empty,
/// which is how a load failure surfaces here.
pub fn season_summary(store: &DataStore) -> Result<SeasonSummary, StatsError> {
    let leading_run_scorer = first_max(&store.batting, |r| r.runs)
        .ok_or(StatsError::MissingTable("batting"))?
        .clone();
    let leading_wicket_taker = first_max(&store.bowling, |r| r.wickets)
        .ok_or(StatsError::MissingTable("bowling"))?
        .clone();
    let best_fielder = first_max(&store.fielding, |r| r.catches)
        .ok_or(StatsError::MissingTable("fielding"))?
        .clone();

    let mut top_teams = store.team_standings();
    top_teams.truncate(PLAYOFF_SPOTS);

    Ok(SeasonSummary {
        leading_run_scorer,
        leading_wicket_taker,
        best_fielder,
        top_teams,
    })
}

/// Top-n rows of a category's table, descending by its primary metric.
///
/// `n` may exceed the table size; the whole table comes back. An empty
/// table (e.g. after a load failure) yields an empty ranking, not an error.
pub fn top_performers(store: &DataStore, category: Category, n: usize) -> Ranking {
    match category {
        Category::Batting => Ranking::Batting(top_n(&store.batting, n, |r| r.runs)),
        Category::Bowling => Ranking::Bowling(top_n(&store.bowling, n, |r| r.wickets)),
        Category::Fielding => Ranking::Fielding(top_n(&store.fielding, n, |r| r.catches)),
    }
}

/// Compare two players side by side within one category.
///
/// Lookup is by exact player name, first match wins. Comparison is defined
/// for batting and bowling only.
pub fn compare_players(
    store: &DataStore,
    name1: &str,
    name2: &str,
    category: Category,
) -> Result<PlayerComparison, StatsError> {
    match category {
        Category::Batting => {
            let left = find_player(&store.batting, name1, category, |r| &r.player)?;
            let right = find_player(&store.batting, name2, category, |r| &r.player)?;
            Ok(PlayerComparison {
                category,
                left_player: left.player.clone(),
                left_team: left.team.clone(),
                right_player: right.player.clone(),
                right_team: right.team.clone(),
                metrics: batting_metrics(left, right),
            })
        }
        Category::Bowling => {
            let left = find_player(&store.bowling, name1, category, |r| &r.player)?;
            let right = find_player(&store.bowling, name2, category, |r| &r.player)?;
            Ok(PlayerComparison {
                category,
                left_player: left.player.clone(),
                left_team: left.team.clone(),
                right_player: right.player.clone(),
                right_team: right.team.clone(),
                metrics: bowling_metrics(left, right),
            })
        }
        Category::Fielding => Err(StatsError::InvalidCategory(category.to_string())),
    }
}

/// First row holding the maximum key, or `None` for an empty table.
fn first_max<T, K: Ord>(rows: &[T], key: impl Fn(&T) -> K) -> Option<&T> {
    rows.iter()
        .reduce(|best, row| if key(row) > key(best) { row } else { best })
}

/// Stable descending top-n: equal keys keep their source order.
fn top_n<T: Clone, K: Ord>(rows: &[T], n: usize, key: impl Fn(&T) -> K) -> Vec<T> {
    let mut sorted = rows.to_vec();
    sorted.sort_by_key(|r| Reverse(key(r)));
    sorted.truncate(n);
    sorted
}

fn find_player<'a, T>(
    rows: &'a [T],
    name: &str,
    category: Category,
    player: impl Fn(&T) -> &String,
) -> Result<&'a T, StatsError> {
    rows.iter()
        .find(|&r| player(r).as_str() == name)
        .ok_or_else(|| StatsError::PlayerNotFound {
            player: name.to_string(),
            category,
        })
}

fn batting_metrics(left: &BattingRecord, right: &BattingRecord) -> Vec<ComparedMetric> {
    vec![
        metric("Runs", left.runs as f64, right.runs as f64),
        metric("Average", left.average, right.average),
        metric("Strike_Rate", left.strike_rate, right.strike_rate),
        metric("Fours", left.fours as f64, right.fours as f64),
        metric("Sixes", left.sixes as f64, right.sixes as f64),
    ]
}

fn bowling_metrics(left: &BowlingRecord, right: &BowlingRecord) -> Vec<ComparedMetric> {
    vec![
        metric("Wickets", left.wickets as f64, right.wickets as f64),
        metric("Economy", left.economy, right.economy),
        metric("Average", left.average, right.average),
        metric(
            "Strike_Rate",
            left.strike_rate.unwrap_or(0.0),
            right.strike_rate.unwrap_or(0.0),
        ),
    ]
}

fn metric(name: &'static str, left: f64, right: f64) -> ComparedMetric {
    ComparedMetric {
        metric: name,
        left,
        right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TeamRecord;

    fn batting(player: &str, team: &str, runs: u32) -> BattingRecord {
        BattingRecord {
            player: player.to_string(),
            team: team.to_string(),
            runs,
            average: runs as f64 / 10.0,
            strike_rate: 140.0,
            fours: runs / 10,
            sixes: runs / 20,
        }
    }

    fn bowling(player: &str, team: &str, wickets: u32) -> BowlingRecord {
        BowlingRecord {
            player: player.to_string(),
            team: team.to_string(),
            wickets,
            economy: 8.0,
            average: 20.0,
            strike_rate: Some(15.0),
        }
    }

    fn fielding(player: &str, team: &str, catches: u32) -> FieldingRecord {
        FieldingRecord {
            player: player.to_string(),
            team: team.to_string(),
            catches,
            matches: 14,
        }
    }

    fn team(position: u32, name: &str, points: u32, nrr: f64) -> TeamRecord {
        TeamRecord {
            position,
            team: name.to_string(),
            points,
            nrr,
            total_runs: 2400,
            won: points / 2,
            lost: 14 - points / 2,
            highest_total: 220,
        }
    }

    fn test_store() -> DataStore {
        DataStore {
            batting: vec![
                batting("A", "GT", 50),
                batting("B", "MI", 80),
                batting("C", "GT", 80),
            ],
            bowling: vec![bowling("X", "GT", 25), bowling("Y", "MI", 20)],
            fielding: vec![fielding("F1", "RCB", 12), fielding("F2", "CSK", 17)],
            teams: vec![
                team(2, "RCB", 19, 0.301),
                team(1, "PBKS", 19, 0.372),
                team(4, "MI", 16, 1.142),
                team(3, "GT", 18, 0.254),
                team(5, "DC", 15, 0.011),
            ],
            load_errors: Vec::new(),
        }
    }

    #[test]
    fn test_top_performers_tie_broken_by_row_order() {
        let store = test_store();
        let ranking = top_performers(&store, Category::Batting, 2);

        match ranking {
            Ranking::Batting(rows) => {
                assert_eq!(rows.len(), 2);
                assert_eq!(rows[0].player, "B");
                assert_eq!(rows[1].player, "C");
            }
            _ => panic!("expected batting ranking"),
        }
    }

    #[test]
    fn test_top_performers_n_exceeds_table() {
        let store = test_store();
        let ranking = top_performers(&store, Category::Bowling, 99);
        assert_eq!(ranking.len(), 2);
    }

    #[test]
    fn test_top_performers_sorted_descending() {
        let store = test_store();
        if let Ranking::Batting(rows) = top_performers(&store, Category::Batting, 10) {
            for pair in rows.windows(2) {
                assert!(pair[0].runs >= pair[1].runs);
            }
        } else {
            panic!("expected batting ranking");
        }
    }

    #[test]
    fn test_top_performers_empty_table() {
        let mut store = test_store();
        store.fielding.clear();
        let ranking = top_performers(&store, Category::Fielding, 5);
        assert!(ranking.is_empty());
    }

    #[test]
    fn test_season_summary_awards() {
        let store = test_store();
        let summary = season_summary(&store).unwrap();

        // Tie at 80 runs between B and C; the first row wins
        assert_eq!(summary.leading_run_scorer.player, "B");
        assert_eq!(summary.leading_wicket_taker.player, "X");
        assert_eq!(summary.best_fielder.player, "F2");
    }

    #[test]
    fn test_season_summary_top_teams_by_position() {
        let store = test_store();
        let summary = season_summary(&store).unwrap();

        let order: Vec<&str> = summary.top_teams.iter().map(|t| t.team.as_str()).collect();
        assert_eq!(order, vec!["PBKS", "RCB", "GT", "MI"]);
    }

    #[test]
    fn test_season_summary_missing_table() {
        let mut store = test_store();
        store.bowling.clear();
        let err = season_summary(&store).unwrap_err();
        assert!(matches!(err, StatsError::MissingTable("bowling")));
    }

    #[test]
    fn test_compare_players_batting() {
        let store = test_store();
        let cmp = compare_players(&store, "A", "B", Category::Batting).unwrap();

        assert_eq!(cmp.left_player, "A");
        assert_eq!(cmp.right_player, "B");
        assert_eq!(cmp.metrics[0].metric, "Runs");
        assert_eq!(cmp.metrics[0].left, 50.0);
        assert_eq!(cmp.metrics[0].right, 80.0);
        assert_eq!(cmp.metrics.len(), 5);
    }

    #[test]
    fn test_compare_players_swap_symmetry() {
        let store = test_store();
        let ab = compare_players(&store, "A", "B", Category::Batting).unwrap();
        let ba = compare_players(&store, "B", "A", Category::Batting).unwrap();

        for (m1, m2) in ab.metrics.iter().zip(ba.metrics.iter()) {
            assert_eq!(m1.left, m2.right);
            assert_eq!(m1.right, m2.left);
        }
    }

    #[test]
    fn test_compare_players_not_found() {
        let store = test_store();
        let err = compare_players(&store, "Z", "B", Category::Batting).unwrap_err();
        assert!(matches!(
            err,
            StatsError::PlayerNotFound { ref player, .. } if player == "Z"
        ));
    }

    #[test]
    fn test_compare_players_fielding_rejected() {
        let store = test_store();
        let err = compare_players(&store, "F1", "F2", Category::Fielding).unwrap_err();
        assert!(matches!(err, StatsError::InvalidCategory(_)));
    }

    #[test]
    fn test_compare_players_bowling_metrics() {
        let store = test_store();
        let cmp = compare_players(&store, "X", "Y", Category::Bowling).unwrap();

        let names: Vec<&str> = cmp.metrics.iter().map(|m| m.metric).collect();
        assert_eq!(names, vec!["Wickets", "Economy", "Average", "Strike_Rate"]);
    }
}
