//! Test fixtures for replay integration testing

use school_rating::standings::ScoreboardRow;
use school_rating::types::{ContestOutcome, Rank};
use std::path::Path;

/// Build an outcome from `(entity, rank)` pairs
pub fn outcome(entries: &[(&str, Rank)]) -> ContestOutcome {
    entries
        .iter()
        .map(|(entity, rank)| (*entity, *rank))
        .collect()
}

/// Data directory with a schedule and standings files
pub struct DataDirBuilder<'a> {
    root: &'a Path,
    schedule: Vec<serde_json::Value>,
}

impl<'a> DataDirBuilder<'a> {
    pub fn new(root: &'a Path) -> Self {
        Self {
            root,
            schedule: Vec::new(),
        }
    }

    /// Schedule a contest without writing standings for it
    pub fn schedule(mut self, id: &str, date: &str, priority: u32) -> Self {
        self.schedule.push(serde_json::json!({
            "id": id,
            "date": date,
            "priority": priority,
        }));
        self
    }

    /// Schedule a contest and write its scoreboard
    pub fn contest(self, id: &str, date: &str, priority: u32, rows: &[ScoreboardRow]) -> Self {
        let dir = self.root.join("standings");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join(format!("{}.json", id)),
            serde_json::to_string(rows).unwrap(),
        )
        .unwrap();
        self.schedule(id, date, priority)
    }

    pub fn build(self) {
        std::fs::write(
            self.root.join("contests.json"),
            serde_json::to_string_pretty(&self.schedule).unwrap(),
        )
        .unwrap();
    }
}
