//! Persistent rating state for a replay
//!
//! The `RatingBook` is the single owner of every entity's current rating. It
//! is mutated only by merging the output of a contest's rating update, so
//! entities that sit a contest out carry their rating forward unchanged.

use crate::types::{ContestId, ContestOutcome, EntityId, Rating, RatingMap};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Storage entry for an entity's rating with metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingEntry {
    pub entity: EntityId,
    pub rating: Rating,
    pub contests_played: u32,
    pub last_contest: Option<ContestId>,
}

impl RatingEntry {
    /// Create a new rating entry for a first-seen entity
    pub fn new(entity: EntityId, initial_rating: Rating) -> Self {
        Self {
            entity,
            rating: initial_rating,
            contests_played: 0,
            last_contest: None,
        }
    }

    /// Update the rating and count the contest
    pub fn update_rating(&mut self, contest_id: &ContestId, new_rating: Rating) {
        self.rating = new_rating;
        self.contests_played += 1;
        self.last_contest = Some(contest_id.clone());
    }
}

/// Current rating of every entity seen so far
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingBook {
    default_rating: Rating,
    entries: HashMap<EntityId, RatingEntry>,
}

impl RatingBook {
    pub fn new(default_rating: Rating) -> Self {
        Self {
            default_rating,
            entries: HashMap::new(),
        }
    }

    pub fn default_rating(&self) -> Rating {
        self.default_rating
    }

    pub fn get(&self, entity: &str) -> Option<&RatingEntry> {
        self.entries.get(entity)
    }

    /// Current rating, or the default for an unseen entity
    pub fn rating_of(&self, entity: &str) -> Rating {
        self.entries
            .get(entity)
            .map(|entry| entry.rating)
            .unwrap_or(self.default_rating)
    }

    pub fn contains(&self, entity: &str) -> bool {
        self.entries.contains_key(entity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Give every participant of `outcome` a rating, defaulting new entities.
    /// Returns the number of entities added.
    pub fn ensure_participants(&mut self, outcome: &ContestOutcome) -> usize {
        let mut added = 0;
        for entity in outcome.entities() {
            if !self.entries.contains_key(entity) {
                self.entries.insert(
                    entity.clone(),
                    RatingEntry::new(entity.clone(), self.default_rating),
                );
                added += 1;
            }
        }
        added
    }

    /// Copy of the current ratings
    pub fn ratings(&self) -> RatingMap {
        self.entries
            .iter()
            .map(|(entity, entry)| (entity.clone(), entry.rating))
            .collect()
    }

    /// Merge a contest's new ratings; every other entity keeps its rating
    pub fn apply(&mut self, contest_id: &ContestId, new_ratings: &RatingMap) {
        let default_rating = self.default_rating;
        for (entity, rating) in new_ratings {
            self.entries
                .entry(entity.clone())
                .or_insert_with(|| RatingEntry::new(entity.clone(), default_rating))
                .update_rating(contest_id, *rating);
        }
    }

    /// Ordered copy of the current ratings for the history
    pub fn snapshot(&self) -> BTreeMap<EntityId, Rating> {
        self.entries
            .iter()
            .map(|(entity, entry)| (entity.clone(), entry.rating))
            .collect()
    }

    /// Entries by rating descending, ties by entity ascending
    pub fn leaderboard(&self, limit: usize) -> Vec<&RatingEntry> {
        let mut entries: Vec<&RatingEntry> = self.entries.values().collect();
        entries.sort_by(|a, b| b.rating.cmp(&a.rating).then_with(|| a.entity.cmp(&b.entity)));
        entries.truncate(limit);
        entries
    }
}

impl Default for RatingBook {
    fn default() -> Self {
        Self::new(crate::types::DEFAULT_RATING)
    }
}
