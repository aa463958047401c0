//! Common types used throughout the rating engine

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Opaque identifier for a rated entity (a school)
pub type EntityId = String;

/// Identifier for a contest in the replay sequence
pub type ContestId = String;

/// Integer rating value
pub type Rating = i64;

/// 1-based ordinal rank; tied entities share the minimum rank
pub type Rank = u32;

/// Rating assigned to an entity the first time it is seen
pub const DEFAULT_RATING: Rating = 1400;

/// Current ratings keyed by entity
pub type RatingMap = HashMap<EntityId, Rating>;

/// Outcome of a single contest: every participant with its achieved rank
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContestOutcome {
    ranks: HashMap<EntityId, Rank>,
}

impl ContestOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a participant. A repeated entity keeps its better (lower) rank.
    pub fn insert(&mut self, entity: impl Into<EntityId>, rank: Rank) {
        self.ranks
            .entry(entity.into())
            .and_modify(|existing| *existing = (*existing).min(rank))
            .or_insert(rank);
    }

    pub fn rank_of(&self, entity: &str) -> Option<Rank> {
        self.ranks.get(entity).copied()
    }

    pub fn contains(&self, entity: &str) -> bool {
        self.ranks.contains_key(entity)
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EntityId, Rank)> {
        self.ranks.iter().map(|(entity, rank)| (entity, *rank))
    }

    pub fn entities(&self) -> impl Iterator<Item = &EntityId> {
        self.ranks.keys()
    }
}

impl<S: Into<EntityId>> FromIterator<(S, Rank)> for ContestOutcome {
    fn from_iter<I: IntoIterator<Item = (S, Rank)>>(iter: I) -> Self {
        let mut outcome = Self::new();
        for (entity, rank) in iter {
            outcome.insert(entity, rank);
        }
        outcome
    }
}

/// Rating change information for one contest participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingChange {
    pub entity: EntityId,
    pub old_rating: Rating,
    pub new_rating: Rating,
    pub rank: Rank,
    /// Expected rank at the prior rating
    pub expected_seed: f64,
    /// Rating whose expected rank matches the performance target
    pub performance_rating: Rating,
}

impl RatingChange {
    pub fn delta(&self) -> Rating {
        self.new_rating - self.old_rating
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_keeps_best_rank_for_duplicates() {
        let mut outcome = ContestOutcome::new();
        outcome.insert("pku", 3);
        outcome.insert("pku", 1);
        outcome.insert("pku", 2);

        assert_eq!(outcome.len(), 1);
        assert_eq!(outcome.rank_of("pku"), Some(1));
    }

    #[test]
    fn test_outcome_from_iter() {
        let outcome: ContestOutcome = vec![("a", 1), ("b", 2), ("c", 2)].into_iter().collect();

        assert_eq!(outcome.len(), 3);
        assert!(outcome.contains("c"));
        assert_eq!(outcome.rank_of("c"), Some(2));
        assert_eq!(outcome.rank_of("d"), None);
    }

    #[test]
    fn test_rating_change_delta() {
        let change = RatingChange {
            entity: "a".to_string(),
            old_rating: 1400,
            new_rating: 1375,
            rank: 7,
            expected_seed: 4.5,
            performance_rating: 1352,
        };
        assert_eq!(change.delta(), -25);
    }
}
