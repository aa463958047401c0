//! Chronological contest ordering
//!
//! Contests are replayed by event date. Contests on the same day are ordered
//! by priority, then by identifier; contests without a date go last.

use crate::error::{RatingError, Result};
use crate::types::ContestId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Source of the replay order
pub trait ContestOrdering {
    /// Contest identifiers in the order they must be replayed
    fn ordered_contests(&self) -> Vec<ContestId>;
}

impl ContestOrdering for Vec<ContestId> {
    fn ordered_contests(&self) -> Vec<ContestId> {
        self.clone()
    }
}

/// A contest with the data needed to place it in the replay order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledContest {
    pub id: ContestId,
    #[serde(default, with = "contest_date")]
    pub date: Option<NaiveDate>,
    /// Lower values are replayed first among same-day contests
    #[serde(default)]
    pub priority: u32,
}

impl ScheduledContest {
    pub fn new(id: impl Into<ContestId>, date: Option<NaiveDate>, priority: u32) -> Self {
        Self {
            id: id.into(),
            date,
            priority,
        }
    }
}

/// Set of contests to replay
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContestSchedule {
    contests: Vec<ScheduledContest>,
}

impl ContestSchedule {
    pub fn new(contests: Vec<ScheduledContest>) -> Self {
        Self { contests }
    }

    /// Load a schedule from a JSON array of contests
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| RatingError::ConfigurationError {
                message: format!("Failed to read schedule {}: {}", path.display(), e),
            })?;

        let schedule: Self =
            serde_json::from_str(&contents).map_err(|e| RatingError::ConfigurationError {
                message: format!("Failed to parse schedule {}: {}", path.display(), e),
            })?;

        Ok(schedule)
    }

    pub fn push(&mut self, contest: ScheduledContest) {
        self.contests.push(contest);
    }

    pub fn len(&self) -> usize {
        self.contests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contests.is_empty()
    }
}

impl ContestOrdering for ContestSchedule {
    fn ordered_contests(&self) -> Vec<ContestId> {
        let mut contests: Vec<&ScheduledContest> = self.contests.iter().collect();
        contests.sort_by(|a, b| {
            a.date
                .is_none()
                .cmp(&b.date.is_none())
                .then_with(|| a.date.cmp(&b.date))
                .then_with(|| a.priority.cmp(&b.priority))
                .then_with(|| a.id.cmp(&b.id))
        });
        contests.into_iter().map(|contest| contest.id.clone()).collect()
    }
}

/// Dates as `2023-10-15` or `2023/10/15`
mod contest_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => serializer.serialize_str(&date.format(FORMATS[0]).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        let raw = match raw {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Ok(None),
        };

        FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(raw.trim(), format).ok())
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid contest date: {}", raw)))
    }
}
