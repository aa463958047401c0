//! Contest outcome providers
//!
//! A provider resolves a contest identifier to the contest's outcome, or to
//! "no data" when the contest cannot be used. The replay skips such contests.

use crate::error::{RatingError, Result};
use crate::replay::schedule::ContestSchedule;
use crate::standings::{rank_standings, ScoreboardRow};
use crate::types::{ContestId, ContestOutcome};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Trait for resolving contest outcomes
pub trait OutcomeProvider: Send + Sync {
    /// Outcome of a contest, `Ok(None)` when it has no usable data
    fn outcome(&self, contest_id: &ContestId) -> Result<Option<ContestOutcome>>;
}

/// In-memory outcome provider
#[derive(Debug, Clone, Default)]
pub struct StaticOutcomeProvider {
    outcomes: HashMap<ContestId, ContestOutcome>,
}

impl StaticOutcomeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, contest_id: impl Into<ContestId>, outcome: ContestOutcome) {
        self.outcomes.insert(contest_id.into(), outcome);
    }

    pub fn with_outcome(
        mut self,
        contest_id: impl Into<ContestId>,
        outcome: ContestOutcome,
    ) -> Self {
        self.insert(contest_id, outcome);
        self
    }
}

impl OutcomeProvider for StaticOutcomeProvider {
    fn outcome(&self, contest_id: &ContestId) -> Result<Option<ContestOutcome>> {
        Ok(self.outcomes.get(contest_id).cloned())
    }
}

/// Provider reading scoreboards from a data directory
///
/// Layout:
/// - `<root>/contests.json`: the contest schedule
/// - `<root>/standings/<contest>.json`: array of scoreboard rows
#[derive(Debug, Clone)]
pub struct DirectoryOutcomeProvider {
    root: PathBuf,
}

impl DirectoryOutcomeProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn schedule_path(&self) -> PathBuf {
        self.root.join("contests.json")
    }

    pub fn standings_path(&self, contest_id: &ContestId) -> PathBuf {
        self.root.join("standings").join(format!("{}.json", contest_id))
    }

    /// Load the contest schedule stored next to the standings
    pub fn load_schedule(&self) -> Result<ContestSchedule> {
        ContestSchedule::load(&self.schedule_path())
    }
}

impl OutcomeProvider for DirectoryOutcomeProvider {
    fn outcome(&self, contest_id: &ContestId) -> Result<Option<ContestOutcome>> {
        let path = self.standings_path(contest_id);
        if !path.exists() {
            debug!("No standings file for {} at {}", contest_id, path.display());
            return Ok(None);
        }

        let contents =
            std::fs::read_to_string(&path).map_err(|e| RatingError::ContestDataUnavailable {
                contest_id: contest_id.clone(),
                reason: format!("failed to read {}: {}", path.display(), e),
            })?;

        // A scoreboard without the required fields is unusable, not fatal
        let rows: Vec<ScoreboardRow> = match serde_json::from_str(&contents) {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Ignoring malformed standings for {}: {}", contest_id, e);
                return Ok(None);
            }
        };

        Ok(Some(rank_standings(&rows)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::schedule::ContestOrdering;

    fn write_standings(root: &Path, contest: &str, body: &str) {
        let dir = root.join("standings");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(format!("{}.json", contest)), body).unwrap();
    }

    #[test]
    fn test_static_provider() {
        let outcome: ContestOutcome = vec![("a", 1)].into_iter().collect();
        let provider = StaticOutcomeProvider::new().with_outcome("c1", outcome.clone());

        assert_eq!(provider.outcome(&"c1".to_string()).unwrap(), Some(outcome));
        assert_eq!(provider.outcome(&"c2".to_string()).unwrap(), None);
    }

    #[test]
    fn test_directory_provider_reads_standings() {
        let dir = tempfile::tempdir().unwrap();
        write_standings(
            dir.path(),
            "2024 ICPC Kunming",
            r#"[{"school": "a", "solved": 8, "penalty": 900},
                {"school": "b", "solved": 9, "penalty": 1200},
                {"school": "a", "solved": 4, "penalty": 300}]"#,
        );

        let provider = DirectoryOutcomeProvider::new(dir.path());
        let outcome = provider
            .outcome(&"2024 ICPC Kunming".to_string())
            .unwrap()
            .unwrap();

        assert_eq!(outcome.len(), 2);
        assert_eq!(outcome.rank_of("b"), Some(1));
        assert_eq!(outcome.rank_of("a"), Some(2));
    }

    #[test]
    fn test_directory_provider_missing_file_is_no_data() {
        let dir = tempfile::tempdir().unwrap();
        let provider = DirectoryOutcomeProvider::new(dir.path());
        assert_eq!(provider.outcome(&"absent".to_string()).unwrap(), None);
    }

    #[test]
    fn test_directory_provider_malformed_file_is_no_data() {
        let dir = tempfile::tempdir().unwrap();
        write_standings(dir.path(), "broken", r#"[{"team": "x", "rank": 1}]"#);

        let provider = DirectoryOutcomeProvider::new(dir.path());
        assert_eq!(provider.outcome(&"broken".to_string()).unwrap(), None);
    }

    #[test]
    fn test_directory_provider_schedule() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("contests.json"),
            r#"[{"id": "late", "date": "2024-05-01"}, {"id": "early", "date": "2024-04-01"}]"#,
        )
        .unwrap();

        let provider = DirectoryOutcomeProvider::new(dir.path());
        let schedule = provider.load_schedule().unwrap();
        assert_eq!(schedule.ordered_contests(), vec!["early", "late"]);
    }
}
