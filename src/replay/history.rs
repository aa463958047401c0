//! Rating history recorded during a replay

use crate::types::{ContestId, EntityId, Rating};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Ratings of every known entity right after one contest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub contest_id: ContestId,
    pub ratings: BTreeMap<EntityId, Rating>,
}

/// Append-only sequence of post-contest snapshots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingHistory {
    default_rating: Rating,
    entries: Vec<HistoryEntry>,
}

impl RatingHistory {
    pub fn new(default_rating: Rating) -> Self {
        Self {
            default_rating,
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, contest_id: ContestId, ratings: BTreeMap<EntityId, Rating>) {
        self.entries.push(HistoryEntry {
            contest_id,
            ratings,
        });
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contest_ids(&self) -> Vec<ContestId> {
        self.entries
            .iter()
            .map(|entry| entry.contest_id.clone())
            .collect()
    }

    /// Every entity present in some snapshot, sorted
    pub fn entities(&self) -> BTreeSet<EntityId> {
        self.entries
            .iter()
            .flat_map(|entry| entry.ratings.keys().cloned())
            .collect()
    }

    /// Rating after the contest at `index`; the default before first appearance
    pub fn rating_at(&self, entity: &str, index: usize) -> Option<Rating> {
        self.entries.get(index).map(|entry| {
            entry
                .ratings
                .get(entity)
                .copied()
                .unwrap_or(self.default_rating)
        })
    }

    /// Dense entity × contest matrix
    pub fn to_table(&self) -> HistoryTable {
        let entities: Vec<EntityId> = self.entities().into_iter().collect();
        let ratings = entities
            .iter()
            .map(|entity| {
                self.entries
                    .iter()
                    .map(|entry| {
                        entry
                            .ratings
                            .get(entity)
                            .copied()
                            .unwrap_or(self.default_rating)
                    })
                    .collect()
            })
            .collect();

        HistoryTable {
            contests: self.contest_ids(),
            entities,
            ratings,
        }
    }
}

/// Dense rating history: one row per entity, one column per valid contest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryTable {
    pub contests: Vec<ContestId>,
    pub entities: Vec<EntityId>,
    pub ratings: Vec<Vec<Rating>>,
}

impl HistoryTable {
    pub fn row(&self, entity: &str) -> Option<&[Rating]> {
        let index = self.entities.iter().position(|e| e == entity)?;
        self.ratings.get(index).map(|row| row.as_slice())
    }

    pub fn get(&self, entity: &str, contest_id: &str) -> Option<Rating> {
        let column = self.contests.iter().position(|c| c == contest_id)?;
        self.row(entity)?.get(column).copied()
    }
}
