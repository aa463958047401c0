//! Scoreboard to contest outcome conversion
//!
//! A scoreboard lists teams; several teams may belong to the same school.
//! Each school is ranked by its best team, and equal scores share the
//! minimum rank.

use crate::types::{ContestOutcome, EntityId, Rank};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Weight of one solved problem relative to one penalty unit
pub const SOLVED_WEIGHT: i64 = 1_000_000;

/// One team's line on a contest scoreboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreboardRow {
    #[serde(alias = "school", alias = "School")]
    pub entity: EntityId,
    #[serde(alias = "Solved")]
    pub solved: u32,
    #[serde(alias = "Penalty")]
    pub penalty: i64,
}

impl ScoreboardRow {
    pub fn new(entity: impl Into<EntityId>, solved: u32, penalty: i64) -> Self {
        Self {
            entity: entity.into(),
            solved,
            penalty,
        }
    }

    /// More solved problems always win; penalty breaks the tie
    pub fn score(&self) -> i64 {
        self.solved as i64 * SOLVED_WEIGHT - self.penalty
    }
}

/// Rank entities by their best row, ties sharing the minimum rank (1, 2, 2, 4)
pub fn rank_standings(rows: &[ScoreboardRow]) -> ContestOutcome {
    let mut sorted: Vec<&ScoreboardRow> = rows.iter().collect();
    sorted.sort_by(|a, b| b.score().cmp(&a.score()));

    let mut seen: HashSet<&str> = HashSet::new();
    let best: Vec<&ScoreboardRow> = sorted
        .into_iter()
        .filter(|row| seen.insert(row.entity.as_str()))
        .collect();

    let mut outcome = ContestOutcome::new();
    let mut previous: Option<(i64, Rank)> = None;
    for (position, row) in best.iter().enumerate() {
        let score = row.score();
        let rank = match previous {
            Some((previous_score, previous_rank)) if previous_score == score => previous_rank,
            _ => position as Rank + 1,
        };
        outcome.insert(row.entity.clone(), rank);
        previous = Some((score, rank));
    }

    outcome
}
